//! Latency (MTTR) Aggregator

use super::types::LatencyAverages;
use super::{round2, FirstSeen};
use crate::logic::categorize::{categorize, category_or_raw_label, Category, CategoryGrouping};
use crate::logic::snapshot::RemediationRecord;

#[derive(Debug, Default, Clone, Copy)]
struct Samples {
    sum: f64,
    count: u64,
}

impl Samples {
    fn add(&mut self, value: Option<f64>) {
        if let Some(v) = value {
            self.sum += v;
            self.count += 1;
        }
    }

    fn average(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            round2(self.sum / self.count as f64)
        }
    }
}

/// Mean latency per finding label, from values that read as finite numbers.
///
/// `Canonical` reports all eight categories (0 when a category has no
/// valid sample). `CategoryOrRaw` omits groups without a valid sample and
/// keeps first-seen order otherwise.
pub fn latency_by_group<'a, I>(records: I, grouping: CategoryGrouping) -> LatencyAverages
where
    I: IntoIterator<Item = &'a RemediationRecord>,
{
    match grouping {
        CategoryGrouping::Canonical => {
            let mut groups = [Samples::default(); 8];
            for record in records {
                if let Some(category) = categorize(record.finding_type.as_deref()) {
                    groups[category.index()].add(record.latency());
                }
            }

            LatencyAverages {
                labels: Category::CANONICAL.iter().map(|c| c.label().to_string()).collect(),
                averages: groups.iter().map(Samples::average).collect(),
                samples: groups.iter().map(|g| g.count).collect(),
            }
        }
        CategoryGrouping::CategoryOrRaw => {
            let mut seen = FirstSeen::default();
            let mut groups: Vec<Samples> = Vec::new();

            for record in records {
                let slot = seen.slot(category_or_raw_label(record.finding_type.as_deref()));
                if slot == groups.len() {
                    groups.push(Samples::default());
                }
                groups[slot].add(record.latency());
            }

            let mut out = LatencyAverages::default();
            for (label, group) in seen.into_labels().into_iter().zip(groups) {
                if group.count == 0 {
                    continue;
                }
                out.labels.push(label);
                out.averages.push(group.average());
                out.samples.push(group.count);
            }
            out
        }
    }
}
