//! Dashboard statistics and chart data

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::engine::{days_remaining, parse_calendar_date};
use crate::types::{DomainRecord, DomainStatus};

/// Headline numbers for the dashboard cards
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub total: usize,
    pub active: usize,
    pub expiring_soon: usize,
    pub expired: usize,
    /// Records whose expiry date does not parse
    pub unknown: usize,
    /// Whole-number percentage of domains with auto-renew on
    pub auto_renew_percent: u32,
}

/// One slice of the status pie chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusSlice {
    pub status: DomainStatus,
    pub label: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrarCount {
    pub name: String,
    pub count: usize,
}

/// Expirations falling in one calendar month (any year)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthBucket {
    /// 1-12
    pub month: u32,
    pub label: String,
    pub count: usize,
}

/// A domain approaching expiry, for the "upcoming" panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingExpiration {
    pub domain_id: String,
    pub name: String,
    pub expiry_date: NaiveDate,
    pub days_remaining: i64,
}

/// Expects statuses already refreshed.
pub fn summarize(records: &[DomainRecord]) -> PortfolioSummary {
    let count = |status| records.iter().filter(|r| r.status == status).count();
    let auto_renew = records.iter().filter(|r| r.auto_renew).count();

    PortfolioSummary {
        total: records.len(),
        active: count(DomainStatus::Active),
        expiring_soon: count(DomainStatus::ExpiringSoon),
        expired: count(DomainStatus::Expired),
        unknown: count(DomainStatus::Unknown),
        auto_renew_percent: percent(auto_renew, records.len()),
    }
}

fn percent(part: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    // rounded half up, like Math.round
    u32::try_from((part * 200 + total) / (total * 2)).unwrap_or(100)
}

pub fn status_distribution(records: &[DomainRecord]) -> Vec<StatusSlice> {
    DomainStatus::ALL
        .iter()
        .map(|&status| StatusSlice {
            status,
            label: status.label(),
            count: records.iter().filter(|r| r.status == status).count(),
        })
        .collect()
}

/// Domains per registrar, most common first, ties by name.
pub fn registrar_distribution(records: &[DomainRecord]) -> Vec<RegistrarCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for record in records {
        *counts.entry(record.registrar.as_str()).or_default() += 1;
    }

    let mut out: Vec<RegistrarCount> = counts
        .into_iter()
        .map(|(name, count)| RegistrarCount {
            name: name.to_string(),
            count,
        })
        .collect();
    out.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    out
}

/// Twelve buckets counting expirations by calendar month.
///
/// Records whose expiry date does not parse are left out.
pub fn monthly_expiry_histogram(records: &[DomainRecord]) -> Vec<MonthBucket> {
    let mut counts = [0usize; 12];
    for record in records {
        if let Ok(date) = parse_calendar_date(&record.expiry_date) {
            counts[date.month0() as usize] += 1;
        }
    }

    (1..=12u32)
        .zip(counts)
        .map(|(month, count)| MonthBucket {
            month,
            label: format!("{month}月"),
            count,
        })
        .collect()
}

/// Expiring-soon domains, closest first, at most `limit`.
pub fn upcoming_expirations(
    records: &[DomainRecord],
    today: NaiveDate,
    limit: usize,
) -> Vec<UpcomingExpiration> {
    let mut upcoming: Vec<UpcomingExpiration> = records
        .iter()
        .filter(|r| r.status == DomainStatus::ExpiringSoon)
        .filter_map(|r| {
            let expiry_date = parse_calendar_date(&r.expiry_date).ok()?;
            Some(UpcomingExpiration {
                domain_id: r.id.clone(),
                name: r.name.clone(),
                expiry_date,
                days_remaining: days_remaining(expiry_date, today),
            })
        })
        .collect();

    upcoming.sort_by_key(|u| u.days_remaining);
    upcoming.truncate(limit);
    upcoming
}
