//! 到期提醒调度
//!
//! Each run sweeps domain and SSL expirations, skips reminders already in the
//! persisted ledger and hands the rest to the configured sink.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tokio::sync::Mutex;

use crate::engine::ReminderPolicy;
use crate::error::{CoreError, CoreResult};
use crate::reminder::{
    sweep_reminders, sweep_ssl_reminders, ReminderConfig, ReminderEvent, ReminderLedger,
    SweepError,
};
use crate::services::{ServiceContext, SettingsService};
use crate::types::{DomainRecord, UserSettings};

/// An event the sink refused; it stays eligible for the next run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeliveryFailure {
    pub event: ReminderEvent,
    pub reason: String,
}

/// Outcome of one dispatch run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchReport {
    pub delivered: Vec<ReminderEvent>,
    /// Events suppressed because their threshold already fired
    pub duplicates: usize,
    pub failures: Vec<DeliveryFailure>,
    pub sweep_errors: Vec<SweepError>,
}

pub struct ReminderService {
    ctx: Arc<ServiceContext>,
    settings: SettingsService,
    /// Serializes runs so two cycles never read the same ledger
    run_lock: Mutex<()>,
    policy: ReminderPolicy,
}

impl ReminderService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self::with_policy(ctx, ReminderPolicy::default())
    }

    #[must_use]
    pub fn with_policy(ctx: Arc<ServiceContext>, policy: ReminderPolicy) -> Self {
        Self {
            settings: SettingsService::new(ctx.clone()),
            ctx,
            run_lock: Mutex::new(()),
            policy,
        }
    }

    /// Reminders that would fire on `today`, ignoring the ledger and delivering nothing.
    pub async fn preview(
        &self,
        today: NaiveDate,
    ) -> CoreResult<(Vec<ReminderEvent>, Vec<SweepError>)> {
        let domains = self.ctx.domain_repository.find_all().await?;
        let settings = self.settings.load().await?;
        Ok(self.due(&domains, &settings, today))
    }

    /// 执行一次提醒调度
    pub async fn run(&self, today: NaiveDate) -> CoreResult<DispatchReport> {
        let _guard = self.run_lock.lock().await;

        let domains = self.ctx.domain_repository.find_all().await?;
        let settings = self.settings.load().await?;
        let (events, sweep_errors) = self.due(&domains, &settings, today);

        let mut ledger = self.load_ledger().await?;
        let mut dirty = ledger.retain_live(&domains) > 0;

        let mut report = DispatchReport {
            sweep_errors,
            ..DispatchReport::default()
        };

        for event in events {
            let key = event.key();
            if ledger.has_fired(&key) {
                report.duplicates += 1;
                continue;
            }

            match self
                .ctx
                .notification_sink
                .notify(&settings.email, &event)
                .await
            {
                Ok(()) => {
                    ledger.mark_fired(key);
                    dirty = true;
                    report.delivered.push(event);
                }
                Err(e) => {
                    log::error!(
                        "Failed to deliver {:?} reminder for {}: {e}",
                        event.kind,
                        event.domain_name
                    );
                    report.failures.push(DeliveryFailure {
                        event,
                        reason: e.to_string(),
                    });
                }
            }
        }

        if dirty {
            self.ctx.ledger_repository.save(&ledger).await?;
            log::debug!("Reminder ledger saved ({} entries)", ledger.len());
        }

        log::info!(
            "Reminder run for {today}: {} delivered, {} duplicate, {} failed, {} unreadable",
            report.delivered.len(),
            report.duplicates,
            report.failures.len(),
            report.sweep_errors.len()
        );
        Ok(report)
    }

    fn due(
        &self,
        domains: &[DomainRecord],
        settings: &UserSettings,
        today: NaiveDate,
    ) -> (Vec<ReminderEvent>, Vec<SweepError>) {
        let domain_config =
            ReminderConfig::domain_expiry(&settings.notifications).with_policy(self.policy);
        let ssl_config =
            ReminderConfig::ssl_expiry(&settings.notifications).with_policy(self.policy);

        let mut due = sweep_reminders(domains, &domain_config, today);
        let ssl = sweep_ssl_reminders(domains, &ssl_config, today);
        due.events.extend(ssl.events);
        due.errors.extend(ssl.errors);
        (due.events, due.errors)
    }

    async fn load_ledger(&self) -> CoreResult<ReminderLedger> {
        match self.ctx.ledger_repository.load().await {
            Ok(ledger) => Ok(ledger.unwrap_or_default()),
            Err(CoreError::SerializationError(e)) => {
                log::warn!("Reminder ledger is unreadable, starting empty: {e}");
                Ok(ReminderLedger::new())
            }
            Err(e) => Err(e),
        }
    }
}
