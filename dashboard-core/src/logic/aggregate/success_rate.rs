//! Success-Rate Aggregator

use super::types::SuccessRate;
use super::round1;
use crate::logic::snapshot::RemediationRecord;

/// Completed vs remaining; both percentages are 0 on an empty set
pub fn success_rate<'a, I>(records: I) -> SuccessRate
where
    I: IntoIterator<Item = &'a RemediationRecord>,
{
    let (completed, total) = records.into_iter().fold((0u64, 0u64), |(done, all), r| {
        (done + u64::from(r.is_completed()), all + 1)
    });

    if total == 0 {
        return SuccessRate::default();
    }

    let success_percent = round1(completed as f64 / total as f64 * 100.0);

    SuccessRate {
        completed,
        remaining: total - completed,
        total,
        success_percent,
        remaining_percent: round1(100.0 - success_percent),
    }
}
