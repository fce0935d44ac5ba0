//! Application bootstrap for Domain Keeper.
//!
//! Provides `AppState` (service container), `AppStateBuilder` (adapter
//! injection) and the storage/notification adapters frontends plug in.

pub mod adapters;

use std::sync::Arc;

use chrono::{Local, NaiveDate};

use domain_keeper_core::error::CoreResult;
use domain_keeper_core::services::{
    DispatchReport, DomainService, ProfileService, ReminderService, ServiceContext,
    SettingsService,
};
use domain_keeper_core::traits::{KeyValueStore, NotificationSink};

use adapters::{
    KvDomainRepository, KvLedgerRepository, KvProfileRepository, KvSettingsRepository,
    LogNotificationSink, MemoryStore,
};

/// Platform-agnostic application state.
///
/// Holds all services and the `ServiceContext`. Every frontend constructs this
/// once at startup via `AppStateBuilder`.
pub struct AppState {
    /// Service context (holds all storage adapters)
    pub ctx: Arc<ServiceContext>,
    pub domain_service: DomainService,
    pub settings_service: SettingsService,
    pub profile_service: ProfileService,
    pub reminder_service: ReminderService,
}

impl AppState {
    /// Startup sequence: seed sample data on first run, then refresh cached statuses.
    pub async fn run_startup(&self) -> CoreResult<()> {
        let today = today();
        if self.domain_service.seed_if_empty(today).await? {
            log::info!("首次启动，已写入示例域名");
        }
        let changed = self.domain_service.refresh_statuses(today).await?;
        log::info!("Startup complete: {changed} domain statuses updated");
        Ok(())
    }

    /// One reminder cycle for the local date.
    pub async fn run_reminders(&self) -> CoreResult<DispatchReport> {
        self.reminder_service.run(today()).await
    }
}

/// The local calendar date all "today" computations use.
#[must_use]
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Builder for constructing `AppState` with platform-specific adapters.
///
/// # Optional
/// - `store`: defaults to `MemoryStore`
/// - `notification_sink`: defaults to `LogNotificationSink`
pub struct AppStateBuilder {
    store: Option<Arc<dyn KeyValueStore>>,
    notification_sink: Option<Arc<dyn NotificationSink>>,
}

impl AppStateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            store: None,
            notification_sink: None,
        }
    }

    #[must_use]
    pub fn store(mut self, store: Arc<dyn KeyValueStore>) -> Self {
        self.store = Some(store);
        self
    }

    #[must_use]
    pub fn notification_sink(mut self, sink: Arc<dyn NotificationSink>) -> Self {
        self.notification_sink = Some(sink);
        self
    }

    /// Build the `AppState`.
    #[must_use]
    pub fn build(self) -> AppState {
        let store = self
            .store
            .unwrap_or_else(|| Arc::new(MemoryStore::new()));
        let notification_sink = self
            .notification_sink
            .unwrap_or_else(|| Arc::new(LogNotificationSink));

        let ctx = Arc::new(ServiceContext::new(
            Arc::new(KvDomainRepository::new(Arc::clone(&store))),
            Arc::new(KvSettingsRepository::new(Arc::clone(&store))),
            Arc::new(KvProfileRepository::new(Arc::clone(&store))),
            Arc::new(KvLedgerRepository::new(store)),
            notification_sink,
        ));

        AppState {
            domain_service: DomainService::new(Arc::clone(&ctx)),
            settings_service: SettingsService::new(Arc::clone(&ctx)),
            profile_service: ProfileService::new(Arc::clone(&ctx)),
            reminder_service: ReminderService::new(Arc::clone(&ctx)),
            ctx,
        }
    }
}

impl Default for AppStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
