//! Aggregators
//!
//! One pure function per metric family. Each takes already-filtered
//! records and returns parallel, index-aligned arrays ready for a chart.
//! No aggregator keeps state between calls.
//!
//! ## Structure
//! - `types`: output shapes
//! - `severity_automation`: automated vs manual per severity
//! - `success_rate`: completed vs remaining
//! - `category_volume`: counts per finding label (and per severity)
//! - `latency`: mean time to respond per finding label
//! - `daily_volume`: automated vs manual per calendar date
//! - `review_volume`: manual reviews per calendar date

pub mod types;
pub mod severity_automation;
pub mod success_rate;
pub mod category_volume;
pub mod latency;
pub mod daily_volume;
pub mod review_volume;


pub use types::{
    DailyVolume, LabeledCounts, LatencyAverages, ReviewTimeline, SeverityAutomation,
    SeverityDistribution, SuccessRate,
};
pub use severity_automation::severity_automation;
pub use success_rate::success_rate;
pub use category_volume::{category_volume, severity_distribution};
pub use latency::latency_by_group;
pub use daily_volume::daily_volume;
pub use review_volume::review_timeline;

use chrono::NaiveDate;
use std::collections::HashMap;

/// Bucket key for records without a usable date
pub const UNKNOWN_DATE: &str = "Unknown";

/// Calendar-date key (`YYYY-MM-DD`) of an ISO-8601 timestamp
pub fn date_key(raw: Option<&str>) -> String {
    raw.map(str::trim)
        .and_then(|s| s.get(..10))
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| UNKNOWN_DATE.to_string())
}

/// Round to one decimal place
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Round to two decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Share of `part` in `total` as a one-decimal percentage, 0 on empty
pub fn percent(part: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        round1(part as f64 / total as f64 * 100.0)
    }
}

/// Label -> slot map that remembers first-seen order
#[derive(Debug, Default)]
pub(crate) struct FirstSeen {
    index: HashMap<String, usize>,
    labels: Vec<String>,
}

impl FirstSeen {
    /// Slot for `label`, allocating a new one on first sight
    pub(crate) fn slot(&mut self, label: String) -> usize {
        if let Some(&slot) = self.index.get(&label) {
            return slot;
        }

        let slot = self.labels.len();
        self.index.insert(label.clone(), slot);
        self.labels.push(label);
        slot
    }

    pub(crate) fn into_labels(self) -> Vec<String> {
        self.labels
    }
}
