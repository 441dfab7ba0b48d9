//! Severity Normalizer
//!
//! Canonicalizes free-form severity labels into a fixed ordered set.
//! Total: anything unrecognized (including absent) is `Unknown`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
    Unknown,
}

impl Severity {
    /// Display order used by every severity-keyed aggregate
    pub const ALL: [Severity; 5] = [
        Severity::Low,
        Severity::Medium,
        Severity::High,
        Severity::Critical,
        Severity::Unknown,
    ];

    /// The four labels with defined meaning
    pub const KNOWN: [Severity; 4] = [
        Severity::Low,
        Severity::Medium,
        Severity::High,
        Severity::Critical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
            Severity::Critical => "Critical",
            Severity::Unknown => "Unknown",
        }
    }

    /// Buckets to report, optionally dropping `Unknown`
    pub fn buckets(include_unknown: bool) -> &'static [Severity] {
        if include_unknown {
            &Self::ALL
        } else {
            &Self::KNOWN
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive match against the four known labels
pub fn normalize(raw: Option<&str>) -> Severity {
    let Some(raw) = raw else {
        return Severity::Unknown;
    };

    match raw.trim().to_ascii_lowercase().as_str() {
        "low" => Severity::Low,
        "medium" => Severity::Medium,
        "high" => Severity::High,
        "critical" => Severity::Critical,
        _ => Severity::Unknown,
    }
}
