//! Category-Volume Aggregator

use super::types::{LabeledCounts, SeverityDistribution};
use super::{percent, FirstSeen};
use crate::logic::categorize::{categorize, category_or_raw_label, Category, CategoryGrouping};
use crate::logic::severity::{normalize, Severity};
use crate::logic::snapshot::{FindingLabeled, RemediationRecord};

/// Count per finding label.
///
/// `Canonical` always yields the eight categories in canonical order
/// (zeros included, unmatched types excluded). `CategoryOrRaw` yields the
/// labels in first-seen order.
pub fn category_volume<'a, T, I>(records: I, grouping: CategoryGrouping) -> LabeledCounts
where
    T: FindingLabeled + 'a,
    I: IntoIterator<Item = &'a T>,
{
    match grouping {
        CategoryGrouping::Canonical => {
            let mut counts = vec![0u64; Category::CANONICAL.len()];
            for record in records {
                if let Some(category) = categorize(record.finding_type()) {
                    counts[category.index()] += 1;
                }
            }

            LabeledCounts {
                labels: Category::CANONICAL.iter().map(|c| c.label().to_string()).collect(),
                counts,
            }
        }
        CategoryGrouping::CategoryOrRaw => {
            let mut seen = FirstSeen::default();
            let mut counts: Vec<u64> = Vec::new();

            for record in records {
                let slot = seen.slot(category_or_raw_label(record.finding_type()));
                if slot == counts.len() {
                    counts.push(0);
                }
                counts[slot] += 1;
            }

            LabeledCounts {
                labels: seen.into_labels(),
                counts,
            }
        }
    }
}

/// Count and share per normalized severity, in fixed severity order
pub fn severity_distribution<'a, I>(records: I, include_unknown: bool) -> SeverityDistribution
where
    I: IntoIterator<Item = &'a RemediationRecord>,
{
    let buckets = Severity::buckets(include_unknown);
    let mut counts = vec![0u64; buckets.len()];

    for record in records {
        let severity = normalize(record.severity.as_deref());
        if let Some(i) = buckets.iter().position(|b| *b == severity) {
            counts[i] += 1;
        }
    }

    let total: u64 = counts.iter().sum();

    SeverityDistribution {
        labels: buckets.iter().map(|s| s.as_str().to_string()).collect(),
        percentages: counts.iter().map(|c| percent(*c, total)).collect(),
        counts,
    }
}
