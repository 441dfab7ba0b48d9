//! Review-Volume-Over-Time Aggregator

use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::date_key;
use super::types::ReviewTimeline;
use crate::logic::snapshot::RemediationRecord;

/// Manual reviews per calendar date, dates ascending.
///
/// With `today` set, the series always contains that date (count 0 when
/// no review happened on it).
pub fn review_timeline<'a, I>(records: I, today: Option<NaiveDate>) -> ReviewTimeline
where
    I: IntoIterator<Item = &'a RemediationRecord>,
{
    let mut by_date: BTreeMap<String, u64> = BTreeMap::new();

    for record in records.into_iter().filter(|r| r.review_required) {
        *by_date.entry(date_key(record.time_occurred.as_deref())).or_insert(0) += 1;
    }

    if let Some(today) = today {
        by_date.entry(today.format("%Y-%m-%d").to_string()).or_insert(0);
    }

    let (dates, counts) = by_date.into_iter().unzip();
    ReviewTimeline { dates, counts }
}
