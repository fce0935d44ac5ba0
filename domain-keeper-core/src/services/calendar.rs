//! 到期日历视图数据

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::engine::parse_calendar_date;
use crate::reminder::ReminderKind;
use crate::types::{DomainRecord, DomainStatus};

/// One expiration shown in a calendar cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEntry {
    pub domain_id: String,
    pub name: String,
    pub kind: ReminderKind,
    pub status: DomainStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub is_today: bool,
    pub entries: Vec<CalendarEntry>,
}

/// Month grid, weeks starting on Sunday
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarMonth {
    pub year: i32,
    pub month: u32,
    /// Empty cells before the 1st
    pub leading_blanks: u32,
    pub days: Vec<CalendarDay>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthOverview {
    pub month: u32,
    pub days_in_month: u32,
    pub expiring_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearOverview {
    pub year: i32,
    pub months: Vec<MonthOverview>,
}

/// Number of days in `month` of `year`, `None` for an invalid month.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    u32::try_from((next - first).num_days()).ok()
}

/// Every dated expiration (domain and SSL) in the collection.
fn expirations(records: &[DomainRecord]) -> impl Iterator<Item = (NaiveDate, CalendarEntry)> + '_ {
    records.iter().flat_map(|r| {
        let domain = parse_calendar_date(&r.expiry_date).ok().map(|d| {
            (
                d,
                CalendarEntry {
                    domain_id: r.id.clone(),
                    name: r.name.clone(),
                    kind: ReminderKind::DomainExpiry,
                    status: r.status,
                },
            )
        });
        let ssl = r.ssl_certificate.as_ref().and_then(|c| {
            parse_calendar_date(&c.expiry_date).ok().map(|d| {
                (
                    d,
                    CalendarEntry {
                        domain_id: r.id.clone(),
                        name: r.name.clone(),
                        kind: ReminderKind::SslExpiry,
                        status: c.status,
                    },
                )
            })
        });
        domain.into_iter().chain(ssl)
    })
}

/// Builds the grid for one month. Expects statuses already refreshed.
pub fn month_view(
    records: &[DomainRecord],
    year: i32,
    month: u32,
    today: NaiveDate,
) -> Option<CalendarMonth> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let count = days_in_month(year, month)?;

    let mut days: Vec<CalendarDay> = first
        .iter_days()
        .take(count as usize)
        .map(|date| CalendarDay {
            date,
            is_today: date == today,
            entries: Vec::new(),
        })
        .collect();

    for (date, entry) in expirations(records) {
        if date.year() == year && date.month() == month {
            days[date.day0() as usize].entries.push(entry);
        }
    }

    Some(CalendarMonth {
        year,
        month,
        leading_blanks: first.weekday().num_days_from_sunday(),
        days,
    })
}

/// Per-month domain expiration counts for one year.
pub fn year_overview(records: &[DomainRecord], year: i32) -> YearOverview {
    let mut counts = [0usize; 12];
    for (date, entry) in expirations(records) {
        if date.year() == year && entry.kind == ReminderKind::DomainExpiry {
            counts[date.month0() as usize] += 1;
        }
    }

    let months = (1..=12u32)
        .zip(counts)
        .map(|(month, expiring_count)| MonthOverview {
            month,
            days_in_month: days_in_month(year, month).unwrap_or_default(),
            expiring_count,
        })
        .collect();

    YearOverview { year, months }
}
