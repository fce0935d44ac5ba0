//! 域名列表筛选与排序

use std::cmp::Ordering;

use crate::engine::parse_calendar_date;
use crate::types::{DomainQuery, DomainRecord, SortField, SortOrder};

/// Whether `record` matches the search term and status filter.
///
/// Expects statuses already refreshed.
pub fn matches(record: &DomainRecord, query: &DomainQuery) -> bool {
    let matches_search = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .is_none_or(|term| {
            let term = term.to_lowercase();
            record.name.to_lowercase().contains(&term)
                || record.registrar.to_lowercase().contains(&term)
                || record.dns_provider.to_lowercase().contains(&term)
        });
    let matches_status = query.status.is_none_or(|s| record.status == s);
    matches_search && matches_status
}

/// Filters then sorts.
///
/// Unparseable expiry dates sort after every valid date in both directions.
pub fn apply_query(records: Vec<DomainRecord>, query: &DomainQuery) -> Vec<DomainRecord> {
    let mut filtered: Vec<DomainRecord> =
        records.into_iter().filter(|r| matches(r, query)).collect();

    filtered.sort_by(|a, b| compare(a, b, query.sort_field, query.sort_order));
    filtered
}

fn compare(a: &DomainRecord, b: &DomainRecord, field: SortField, order: SortOrder) -> Ordering {
    let directed = |o: Ordering| match order {
        SortOrder::Asc => o,
        SortOrder::Desc => o.reverse(),
    };

    match field {
        SortField::Name => directed(a.name.to_lowercase().cmp(&b.name.to_lowercase())),
        SortField::Registrar => directed(a.registrar.cmp(&b.registrar)),
        SortField::ExpiryDate => match (
            parse_calendar_date(&a.expiry_date).ok(),
            parse_calendar_date(&b.expiry_date).ok(),
        ) {
            (Some(x), Some(y)) => directed(x.cmp(&y)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
    }
}
