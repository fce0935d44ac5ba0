//! Reminder evaluation sweep
//!
//! Turns a domain collection plus reminder configuration into the
//! notification events due today. The sweep never records what it emitted;
//! [`ReminderLedger`] is the dedup state the dispatcher keeps between runs.

use std::collections::{BTreeSet, HashSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::engine::{
    days_remaining, is_within_reminder_window, parse_calendar_date, ReminderPolicy,
};
use crate::error::ParseError;
use crate::types::{DomainRecord, NotificationSettings};

/// Which date a reminder is about
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "kebab-case")]
pub enum ReminderKind {
    DomainExpiry,
    SslExpiry,
}

/// Reminder thresholds for one [`ReminderKind`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderConfig {
    pub enabled: bool,
    pub threshold_days: BTreeSet<u32>,
    #[serde(default)]
    pub policy: ReminderPolicy,
}

impl ReminderConfig {
    #[must_use]
    pub fn new(enabled: bool, threshold_days: impl IntoIterator<Item = u32>) -> Self {
        Self {
            enabled,
            threshold_days: threshold_days.into_iter().collect(),
            policy: ReminderPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: ReminderPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Domain expiry config from the notification settings
    #[must_use]
    pub fn domain_expiry(settings: &NotificationSettings) -> Self {
        Self::new(settings.expiry_reminders, settings.reminder_days.iter().copied())
    }

    /// SSL expiry config from the notification settings
    #[must_use]
    pub fn ssl_expiry(settings: &NotificationSettings) -> Self {
        Self::new(
            settings.ssl_expiry_reminders,
            settings.ssl_reminder_days.iter().copied(),
        )
    }

    /// The narrowest threshold matching `days`, if any.
    fn matching_threshold(&self, days: i64) -> Option<u32> {
        self.threshold_days
            .iter()
            .copied()
            .find(|t| is_within_reminder_window(days, *t, self.policy))
    }
}

/// One notification due for a domain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderEvent {
    pub domain_id: String,
    pub domain_name: String,
    pub kind: ReminderKind,
    /// The configured threshold that matched
    pub threshold_days: u32,
    /// Actual remaining days on the sweep date
    pub days_remaining: i64,
    pub expiry_date: NaiveDate,
}

impl ReminderEvent {
    /// Ledger key
    #[must_use]
    pub fn key(&self) -> ReminderKey {
        ReminderKey {
            domain_id: self.domain_id.clone(),
            kind: self.kind,
            threshold_days: self.threshold_days,
            expiry_date: self.expiry_date,
        }
    }

    /// Notification subject line
    #[must_use]
    pub fn subject(&self) -> String {
        match self.kind {
            ReminderKind::DomainExpiry => format!("域名 {} 即将到期", self.domain_name),
            ReminderKind::SslExpiry => format!("域名 {} 的 SSL 证书即将到期", self.domain_name),
        }
    }

    /// Notification body
    #[must_use]
    pub fn message(&self) -> String {
        let what = match self.kind {
            ReminderKind::DomainExpiry => format!("您的域名 {}", self.domain_name),
            ReminderKind::SslExpiry => format!("您的域名 {} 的 SSL 证书", self.domain_name),
        };
        if self.days_remaining == 0 {
            format!("{what} 今天到期，请及时续费。")
        } else {
            format!("{what} 将在 {} 天后到期，请及时续费。", self.days_remaining)
        }
    }
}

/// A record skipped because its date did not parse
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SweepError {
    pub record_id: String,
    pub kind: ReminderKind,
    pub error: ParseError,
}

/// Collected sweep output
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReminderSweep {
    pub events: Vec<ReminderEvent>,
    pub errors: Vec<SweepError>,
}

impl ReminderSweep {
    fn absorb(&mut self, items: impl Iterator<Item = Result<ReminderEvent, SweepError>>) {
        for item in items {
            match item {
                Ok(event) => self.events.push(event),
                Err(error) => {
                    log::warn!(
                        "Skipping record {} in reminder sweep: {}",
                        error.record_id,
                        error.error
                    );
                    self.errors.push(error);
                }
            }
        }
    }
}

/// Lazily evaluates `config` against every record for `kind`.
///
/// Yields at most one event per record: the tightest matching threshold.
/// Records whose relevant date fails to parse yield an error instead and the
/// sweep carries on. A disabled config yields nothing.
pub fn sweep<'a>(
    domains: &'a [DomainRecord],
    config: &'a ReminderConfig,
    kind: ReminderKind,
    today: NaiveDate,
) -> impl Iterator<Item = Result<ReminderEvent, SweepError>> + 'a {
    let domains: &[DomainRecord] = if config.enabled { domains } else { &[] };
    domains
        .iter()
        .filter_map(move |record| evaluate(record, config, kind, today))
}

fn evaluate(
    record: &DomainRecord,
    config: &ReminderConfig,
    kind: ReminderKind,
    today: NaiveDate,
) -> Option<Result<ReminderEvent, SweepError>> {
    let raw = match kind {
        ReminderKind::DomainExpiry => record.expiry_date.as_str(),
        ReminderKind::SslExpiry => record.ssl_certificate.as_ref()?.expiry_date.as_str(),
    };

    let expiry = match parse_calendar_date(raw) {
        Ok(date) => date,
        Err(error) => {
            return Some(Err(SweepError {
                record_id: record.id.clone(),
                kind,
                error,
            }));
        }
    };

    let days = days_remaining(expiry, today);
    config.matching_threshold(days).map(|threshold_days| {
        Ok(ReminderEvent {
            domain_id: record.id.clone(),
            domain_name: record.name.clone(),
            kind,
            threshold_days,
            days_remaining: days,
            expiry_date: expiry,
        })
    })
}

/// Domain expiry reminders due on `today`.
pub fn sweep_reminders(
    domains: &[DomainRecord],
    config: &ReminderConfig,
    today: NaiveDate,
) -> ReminderSweep {
    let mut out = ReminderSweep::default();
    out.absorb(sweep(domains, config, ReminderKind::DomainExpiry, today));
    out
}

/// SSL certificate reminders due on `today`; records without a certificate are ignored.
pub fn sweep_ssl_reminders(
    domains: &[DomainRecord],
    config: &ReminderConfig,
    today: NaiveDate,
) -> ReminderSweep {
    let mut out = ReminderSweep::default();
    out.absorb(sweep(domains, config, ReminderKind::SslExpiry, today));
    out
}

/// Identity of a fired reminder
///
/// The expiry date is part of the key, so renewing a domain re-arms every
/// threshold for the new date.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderKey {
    pub domain_id: String,
    pub kind: ReminderKind,
    pub threshold_days: u32,
    pub expiry_date: NaiveDate,
}

/// Reminders already delivered, persisted between runs
///
/// Each (domain, kind, threshold, expiry date) fires once. Entries are only
/// dropped by [`ReminderLedger::retain_live`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReminderLedger {
    fired: BTreeSet<ReminderKey>,
}

impl ReminderLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_fired(&self, key: &ReminderKey) -> bool {
        self.fired.contains(key)
    }

    /// Returns `false` if the key was already recorded.
    pub fn mark_fired(&mut self, key: ReminderKey) -> bool {
        self.fired.insert(key)
    }

    /// Forgets entries whose domain is gone or whose expiry date changed.
    ///
    /// Returns how many entries were dropped.
    pub fn retain_live(&mut self, domains: &[DomainRecord]) -> usize {
        let live: HashSet<(&str, ReminderKind, NaiveDate)> = domains
            .iter()
            .flat_map(|r| {
                let domain = parse_calendar_date(&r.expiry_date)
                    .ok()
                    .map(|d| (r.id.as_str(), ReminderKind::DomainExpiry, d));
                let ssl = r
                    .ssl_certificate
                    .as_ref()
                    .and_then(|c| parse_calendar_date(&c.expiry_date).ok())
                    .map(|d| (r.id.as_str(), ReminderKind::SslExpiry, d));
                domain.into_iter().chain(ssl)
            })
            .collect();

        let before = self.fired.len();
        self.fired
            .retain(|k| live.contains(&(k.domain_id.as_str(), k.kind, k.expiry_date)));
        before - self.fired.len()
    }

    pub fn len(&self) -> usize {
        self.fired.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fired.is_empty()
    }
}
