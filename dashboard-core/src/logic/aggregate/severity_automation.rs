//! Severity/Automation Aggregator

use super::types::SeverityAutomation;
use crate::logic::severity::{normalize, Severity};
use crate::logic::snapshot::RemediationRecord;

/// Automated (no review) and manual (review required) counts per severity.
///
/// Records whose normalized severity is not among the reported buckets
/// (only `Unknown`, when `include_unknown` is false) are left out.
pub fn severity_automation<'a, I>(records: I, include_unknown: bool) -> SeverityAutomation
where
    I: IntoIterator<Item = &'a RemediationRecord>,
{
    let buckets = Severity::buckets(include_unknown);
    let mut automated = vec![0u64; buckets.len()];
    let mut manual = vec![0u64; buckets.len()];

    for record in records {
        let severity = normalize(record.severity.as_deref());
        let Some(i) = buckets.iter().position(|b| *b == severity) else {
            continue;
        };

        if record.is_automated() {
            automated[i] += 1;
        } else {
            manual[i] += 1;
        }
    }

    SeverityAutomation {
        labels: buckets.iter().map(|s| s.as_str().to_string()).collect(),
        automated,
        manual,
    }
}
