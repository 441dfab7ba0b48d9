//! Aggregate output shapes. All arrays are aligned by index.

use serde::{Deserialize, Serialize};

/// Automated vs manual counts per severity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeverityAutomation {
    pub labels: Vec<String>,
    pub automated: Vec<u64>,
    pub manual: Vec<u64>,
}

impl SeverityAutomation {
    /// (automated, manual) for one label
    pub fn counts_for(&self, label: &str) -> Option<(u64, u64)> {
        let i = self.labels.iter().position(|l| l == label)?;
        Some((self.automated[i], self.manual[i]))
    }
}

/// Completed vs remaining remediation actions
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SuccessRate {
    pub completed: u64,
    pub remaining: u64,
    pub total: u64,
    pub success_percent: f64,
    pub remaining_percent: f64,
}

/// Count per label
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LabeledCounts {
    pub labels: Vec<String>,
    pub counts: Vec<u64>,
}

impl LabeledCounts {
    pub fn count_for(&self, label: &str) -> Option<u64> {
        let i = self.labels.iter().position(|l| l == label)?;
        Some(self.counts[i])
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }
}

/// Mean latency (seconds, two decimals) per label
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LatencyAverages {
    pub labels: Vec<String>,
    pub averages: Vec<f64>,
    /// Number of valid latency samples behind each average
    pub samples: Vec<u64>,
}

impl LatencyAverages {
    pub fn average_for(&self, label: &str) -> Option<f64> {
        let i = self.labels.iter().position(|l| l == label)?;
        Some(self.averages[i])
    }
}

/// Automated vs manual counts per calendar date, ascending
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyVolume {
    pub dates: Vec<String>,
    pub automated: Vec<u64>,
    pub manual: Vec<u64>,
}

/// Manual reviews per calendar date, ascending
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReviewTimeline {
    pub dates: Vec<String>,
    pub counts: Vec<u64>,
}

/// Count and share per severity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeverityDistribution {
    pub labels: Vec<String>,
    pub counts: Vec<u64>,
    pub percentages: Vec<f64>,
}
