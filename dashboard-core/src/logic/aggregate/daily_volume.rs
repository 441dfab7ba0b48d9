//! Daily-Volume Aggregator

use std::collections::BTreeMap;

use super::date_key;
use super::types::DailyVolume;
use crate::logic::snapshot::RemediationRecord;

/// Automated vs manual per calendar date, dates ascending
pub fn daily_volume<'a, I>(records: I) -> DailyVolume
where
    I: IntoIterator<Item = &'a RemediationRecord>,
{
    let mut by_date: BTreeMap<String, (u64, u64)> = BTreeMap::new();

    for record in records {
        let bucket = by_date.entry(date_key(record.time_occurred.as_deref())).or_default();
        if record.is_automated() {
            bucket.0 += 1;
        } else {
            bucket.1 += 1;
        }
    }

    let mut out = DailyVolume::default();
    for (date, (automated, manual)) in by_date {
        out.dates.push(date);
        out.automated.push(automated);
        out.manual.push(manual);
    }
    out
}
