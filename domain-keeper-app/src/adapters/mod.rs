//! Storage and notification adapters.

mod json_file_store;
mod kv_repository;
mod memory_store;
mod sinks;

pub use json_file_store::JsonFileStore;
pub use kv_repository::{
    KvDomainRepository, KvLedgerRepository, KvProfileRepository, KvSettingsRepository,
};
pub use memory_store::MemoryStore;
pub use sinks::{LogNotificationSink, MailLogSink};
