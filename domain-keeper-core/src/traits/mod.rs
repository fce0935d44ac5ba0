//! Storage layer abstraction trait definition

mod domain_repository;
mod key_value_store;
mod ledger_repository;
mod notification_sink;
mod profile_repository;
mod settings_repository;

pub use domain_repository::DomainRepository;
pub use key_value_store::{
    KeyValueStore, DOMAINS_KEY, REMINDER_LEDGER_KEY, USER_KEY, USER_SETTINGS_KEY,
};
pub use ledger_repository::LedgerRepository;
pub use notification_sink::NotificationSink;
pub use profile_repository::ProfileRepository;
pub use settings_repository::SettingsRepository;
