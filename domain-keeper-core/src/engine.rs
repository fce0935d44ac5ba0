//! Domain status engine
//!
//! Pure date arithmetic: remaining days, status bucketing and reminder
//! window matching. Nothing here reads the clock; callers pass "today".

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ParseError;
use crate::types::{DomainRecord, DomainStatus, SslCertificate};

/// Default expiry window, in days
pub const DEFAULT_HORIZON_DAYS: i64 = 30;

const MILLIS_PER_DAY: i64 = 86_400_000;

/// How a reminder threshold matches a remaining-day count
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ReminderPolicy {
    /// Matches every day with `0 <= days <= threshold`; pair with a ledger to avoid refiring
    #[default]
    Inclusive,
    /// Matches only on the day `days == threshold`
    ExactDay,
}

/// Parses a persisted calendar date.
///
/// Accepts `YYYY-MM-DD` and RFC3339 timestamps; a timestamp is truncated to
/// its own calendar date so time of day never shifts the result.
pub fn parse_calendar_date(input: &str) -> Result<NaiveDate, ParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ParseError::new(input, "empty date"));
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| dt.date_naive())
        .map_err(|e| ParseError::new(input, e.to_string()))
}

/// Signed whole days from `today` until `expiry`.
pub fn days_remaining(expiry: NaiveDate, today: NaiveDate) -> i64 {
    (expiry - today).num_days()
}

/// Remaining days measured from an instant.
///
/// `expiry` is taken at UTC midnight; any partial day still ahead counts as a
/// full day (ceiling of the millisecond difference). Callers working from a
/// local calendar date should use [`days_remaining`] instead, since near
/// midnight the UTC instant and the local date can disagree by one day.
pub fn days_remaining_at(expiry: NaiveDate, now: DateTime<Utc>) -> i64 {
    let expiry_ms = expiry.and_time(chrono::NaiveTime::MIN).and_utc().timestamp_millis();
    let diff = expiry_ms - now.timestamp_millis();
    diff.div_euclid(MILLIS_PER_DAY) + i64::from(diff.rem_euclid(MILLIS_PER_DAY) != 0)
}

/// Buckets a remaining-day count into a status.
///
/// Day 0 is expiring-soon, never expired.
pub fn classify(days: i64, horizon_days: i64) -> DomainStatus {
    if days < 0 {
        DomainStatus::Expired
    } else if days <= horizon_days {
        DomainStatus::ExpiringSoon
    } else {
        DomainStatus::Active
    }
}

/// Days past expiry, `0` while not yet expired.
pub fn days_overdue(days: i64) -> u64 {
    if days < 0 {
        days.unsigned_abs()
    } else {
        0
    }
}

pub fn is_within_reminder_window(days: i64, threshold_days: u32, policy: ReminderPolicy) -> bool {
    let threshold = i64::from(threshold_days);
    match policy {
        ReminderPolicy::Inclusive => (0..=threshold).contains(&days),
        ReminderPolicy::ExactDay => days == threshold,
    }
}

/// Status of a domain record as of `today`, ignoring the cached field.
pub fn compute_status(record: &DomainRecord, today: NaiveDate) -> Result<DomainStatus, ParseError> {
    let expiry = parse_calendar_date(&record.expiry_date)?;
    Ok(classify(days_remaining(expiry, today), DEFAULT_HORIZON_DAYS))
}

pub fn compute_ssl_status(
    certificate: &SslCertificate,
    today: NaiveDate,
) -> Result<DomainStatus, ParseError> {
    let expiry = parse_calendar_date(&certificate.expiry_date)?;
    Ok(classify(days_remaining(expiry, today), DEFAULT_HORIZON_DAYS))
}

/// Overwrites every cached status on the record.
///
/// Fields whose dates fail to parse become [`DomainStatus::Unknown`]; the
/// first parse failure is returned after the remaining fields are refreshed.
pub fn refresh_status(record: &mut DomainRecord, today: NaiveDate) -> Result<(), ParseError> {
    let mut first_error = None;

    match compute_status(record, today) {
        Ok(status) => record.status = status,
        Err(e) => {
            record.status = DomainStatus::Unknown;
            first_error = Some(e);
        }
    }
    if let Some(cert) = record.ssl_certificate.as_mut() {
        match compute_ssl_status(cert, today) {
            Ok(status) => cert.status = status,
            Err(e) => {
                cert.status = DomainStatus::Unknown;
                first_error.get_or_insert(e);
            }
        }
    }

    first_error.map_or(Ok(()), Err)
}

/// Dashboard wording for a remaining-day count.
pub fn describe_remaining(days: i64) -> String {
    match days {
        0 => "今天到期".to_string(),
        d if d > 0 => format!("将在 {d} 天后到期"),
        d => format!("已过期 {} 天", days_overdue(d)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::IcpRecordStatus;

    fn date(s: &str) -> NaiveDate {
        parse_calendar_date(s).unwrap()
    }

    fn record(expiry: &str) -> DomainRecord {
        DomainRecord {
            id: "d1".to_string(),
            name: "example.com".to_string(),
            registrar: "阿里云".to_string(),
            dns_provider: "Cloudflare".to_string(),
            purchase_date: "2024-01-15".to_string(),
            expiry_date: expiry.to_string(),
            auto_renew: false,
            status: DomainStatus::Active,
            notes: None,
            icp_record_number: None,
            icp_record_status: IcpRecordStatus::None,
            ssl_certificate: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn same_day_is_expiring_soon() {
        for s in ["2024-02-29", "2025-01-01", "2030-12-31"] {
            let d = date(s);
            assert_eq!(days_remaining(d, d), 0);
            assert_eq!(
                classify(days_remaining(d, d), DEFAULT_HORIZON_DAYS),
                DomainStatus::ExpiringSoon
            );
        }
    }

    #[test]
    fn past_dates_are_expired() {
        let today = date("2025-06-01");
        for offset in [1, 2, 31, 400] {
            let expiry = today - chrono::Days::new(offset);
            assert_eq!(
                classify(days_remaining(expiry, today), DEFAULT_HORIZON_DAYS),
                DomainStatus::Expired
            );
        }
    }

    #[test]
    fn window_boundaries() {
        assert_eq!(classify(1, 30), DomainStatus::ExpiringSoon);
        assert_eq!(classify(30, 30), DomainStatus::ExpiringSoon);
        assert_eq!(classify(31, 30), DomainStatus::Active);
        assert_eq!(classify(-1, 30), DomainStatus::Expired);
    }

    #[test]
    fn custom_horizon() {
        assert_eq!(classify(10, 7), DomainStatus::Active);
        assert_eq!(classify(7, 7), DomainStatus::ExpiringSoon);
    }

    #[test]
    fn days_remaining_is_antisymmetric() {
        let a = date("2024-03-10");
        let b = date("2025-01-01");
        assert_eq!(days_remaining(a, b), -days_remaining(b, a));
    }

    #[test]
    fn renewal_scenario() {
        let expiry = date("2025-01-15");
        let today = date("2025-01-10");
        let days = days_remaining(expiry, today);
        assert_eq!(days, 5);
        assert_eq!(classify(days, DEFAULT_HORIZON_DAYS), DomainStatus::ExpiringSoon);
    }

    #[test]
    fn overdue_scenario() {
        let days = days_remaining(date("2024-03-10"), date("2025-01-01"));
        assert_eq!(classify(days, DEFAULT_HORIZON_DAYS), DomainStatus::Expired);
        assert_eq!(days_overdue(days), 297);
        assert_eq!(describe_remaining(days), "已过期 297 天");
    }

    #[test]
    fn partial_day_rounds_up() {
        let expiry = date("2025-01-02");
        let half_day_before = "2025-01-01T12:00:00Z".parse::<DateTime<Utc>>().unwrap();
        assert_eq!(days_remaining_at(expiry, half_day_before), 1);

        let exactly = "2025-01-02T00:00:00Z".parse::<DateTime<Utc>>().unwrap();
        assert_eq!(days_remaining_at(expiry, exactly), 0);

        let half_day_after = "2025-01-02T12:00:00Z".parse::<DateTime<Utc>>().unwrap();
        assert_eq!(days_remaining_at(expiry, half_day_after), 0);

        let day_and_half_after = "2025-01-03T12:00:00Z".parse::<DateTime<Utc>>().unwrap();
        assert_eq!(days_remaining_at(expiry, day_and_half_after), -1);
    }

    #[test]
    fn time_of_day_does_not_change_status() {
        let today = date("2025-01-10");
        for expiry in ["2025-01-15", "2025-01-15T00:00:00Z", "2025-01-15T23:59:59+08:00"] {
            assert_eq!(
                compute_status(&record(expiry), today).unwrap(),
                DomainStatus::ExpiringSoon
            );
        }
    }

    #[test]
    fn parse_rejects_garbage() {
        let err = parse_calendar_date("not-a-date").unwrap_err();
        assert_eq!(err.input, "not-a-date");
        assert!(parse_calendar_date("").is_err());
        assert!(parse_calendar_date("2025-02-30").is_err());
    }

    #[test]
    fn inclusive_window() {
        assert!(is_within_reminder_window(7, 7, ReminderPolicy::Inclusive));
        assert!(is_within_reminder_window(0, 7, ReminderPolicy::Inclusive));
        assert!(is_within_reminder_window(3, 7, ReminderPolicy::Inclusive));
        assert!(!is_within_reminder_window(8, 7, ReminderPolicy::Inclusive));
        assert!(!is_within_reminder_window(-1, 7, ReminderPolicy::Inclusive));
    }

    #[test]
    fn exact_day_window() {
        assert!(is_within_reminder_window(7, 7, ReminderPolicy::ExactDay));
        assert!(!is_within_reminder_window(6, 7, ReminderPolicy::ExactDay));
    }

    #[test]
    fn stale_cached_status_is_overwritten() {
        let mut r = record("2024-03-10");
        r.status = DomainStatus::Active;
        refresh_status(&mut r, date("2025-01-01")).unwrap();
        assert_eq!(r.status, DomainStatus::Expired);
    }

    #[test]
    fn refresh_updates_ssl_even_when_domain_date_is_bad() {
        let mut r = record("garbage");
        r.ssl_certificate = Some(SslCertificate {
            provider: "Let's Encrypt".to_string(),
            issue_date: "2024-10-01".to_string(),
            expiry_date: "2025-01-05".to_string(),
            status: DomainStatus::Active,
            auto_renew: true,
        });
        assert!(refresh_status(&mut r, date("2025-01-01")).is_err());
        assert_eq!(r.status, DomainStatus::Unknown);
        assert_eq!(
            r.ssl_certificate.as_ref().map(|c| c.status),
            Some(DomainStatus::ExpiringSoon)
        );
    }

    #[test]
    fn describe_uses_sign() {
        assert_eq!(describe_remaining(0), "今天到期");
        assert_eq!(describe_remaining(12), "将在 12 天后到期");
        assert_eq!(describe_remaining(-3), "已过期 3 天");
    }
}
