use serde::{Deserialize, Serialize};

/// Closed threat taxonomy for the canonical category view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    SshBruteForce,
    PortScanning,
    IamAnomalousBehavior,
    CredentialExfiltration,
    TorAccess,
    WebLoginAbuse,
    S3UnauthorizedAccess,
    GeoRiskAccess,
}

impl Category {
    /// Fixed display order of the eight-category view
    pub const CANONICAL: [Category; 8] = [
        Category::SshBruteForce,
        Category::PortScanning,
        Category::IamAnomalousBehavior,
        Category::CredentialExfiltration,
        Category::TorAccess,
        Category::WebLoginAbuse,
        Category::S3UnauthorizedAccess,
        Category::GeoRiskAccess,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::SshBruteForce => "SSH Brute Force",
            Category::PortScanning => "Port Scanning",
            Category::IamAnomalousBehavior => "IAM Anomalous Behavior",
            Category::CredentialExfiltration => "Credential Exfiltration",
            Category::TorAccess => "Tor Access",
            Category::WebLoginAbuse => "Web Login Abuse",
            Category::S3UnauthorizedAccess => "S3 Unauthorized Access",
            Category::GeoRiskAccess => "Geo-Risk Access",
        }
    }

    /// Position in [`Category::CANONICAL`]
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// How a view turns raw finding types into group labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryGrouping {
    /// Eight fixed categories, zeros emitted, unmatched types excluded
    #[default]
    Canonical,
    /// Category label when a rule matches, otherwise the raw type string
    CategoryOrRaw,
}

impl CategoryGrouping {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "canonical" => Some(CategoryGrouping::Canonical),
            "raw" | "category_or_raw" => Some(CategoryGrouping::CategoryOrRaw),
            _ => None,
        }
    }
}
