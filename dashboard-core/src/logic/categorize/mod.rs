//! Finding Categorizer
//!
//! Maps raw, free-form finding-type strings onto the closed eight-category
//! taxonomy using one ordered rule table.
//!
//! ## Structure
//! - `types`: `Category` taxonomy and the `CategoryGrouping` policy
//! - `rules`: ordered (pattern -> category) table
//!
//! ## Usage
//! ```ignore
//! use crate::logic::categorize::{categorize, Category};
//!
//! assert_eq!(
//!     categorize(Some("UnauthorizedAccess:EC2/SSHBruteForce")),
//!     Some(Category::SshBruteForce)
//! );
//! ```

pub mod types;
pub mod rules;

pub use types::{Category, CategoryGrouping};
pub use rules::CATEGORY_RULES;

/// Literal used by sources for a missing finding type
pub const UNKNOWN_FINDING: &str = "Unknown";

/// First matching rule wins; `Unknown`/empty/absent short-circuit to `None`
pub fn categorize(raw: Option<&str>) -> Option<Category> {
    let raw = raw?.trim();
    if raw.is_empty() || raw == UNKNOWN_FINDING {
        return None;
    }

    let lowered = raw.to_lowercase();
    CATEGORY_RULES
        .iter()
        .find(|(pattern, _)| lowered.contains(pattern))
        .map(|(_, category)| *category)
}

/// Group label under the free-label policy: category label, else raw type
pub fn category_or_raw_label(raw: Option<&str>) -> String {
    if let Some(category) = categorize(raw) {
        return category.label().to_string();
    }

    match raw.map(str::trim) {
        Some(label) if !label.is_empty() => label.to_string(),
        _ => UNKNOWN_FINDING.to_string(),
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guardduty_style_types() {
        let cases = [
            ("UnauthorizedAccess:EC2/SSHBruteForce", Category::SshBruteForce),
            ("Recon:EC2/Portscan", Category::PortScanning),
            ("Recon:EC2/PortProbeUnprotectedPort", Category::PortScanning),
            ("CredentialAccess:IAMUser/AnomalousBehavior", Category::IamAnomalousBehavior),
            (
                "UnauthorizedAccess:IAMUser/InstanceCredentialExfiltration.OutsideAWS",
                Category::CredentialExfiltration,
            ),
            ("UnauthorizedAccess:EC2/TorClient", Category::TorAccess),
            ("TorAccess", Category::TorAccess),
            ("WebLoginAbuse", Category::WebLoginAbuse),
            ("Policy:S3/BucketAnonymousAccessGranted", Category::S3UnauthorizedAccess),
            ("GeoRiskAccess", Category::GeoRiskAccess),
        ];

        for (raw, expected) in cases {
            assert_eq!(categorize(Some(raw)), Some(expected), "{raw}");
        }
    }

    #[test]
    fn test_priority_order_resolves_overlaps() {
        // Matches both the Tor and the S3 rules; Tor comes first
        assert_eq!(categorize(Some("UnauthorizedAccess:S3/TorIPCaller")), Some(Category::TorAccess));
        // Matches both exfiltration and IAM rules; exfiltration comes first
        assert_eq!(
            categorize(Some("UnauthorizedAccess:IAMUser/InstanceCredentialExfiltration")),
            Some(Category::CredentialExfiltration)
        );
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(categorize(Some("SSHBRUTEFORCE")), Some(Category::SshBruteForce));
        assert_eq!(categorize(Some("recon:ec2/portscan")), Some(Category::PortScanning));
    }

    #[test]
    fn test_unknown_and_empty_short_circuit() {
        assert_eq!(categorize(None), None);
        assert_eq!(categorize(Some("")), None);
        assert_eq!(categorize(Some("   ")), None);
        assert_eq!(categorize(Some("Unknown")), None);
    }

    #[test]
    fn test_unmatched_returns_none() {
        assert_eq!(categorize(Some("Backdoor:EC2/C&CActivity.B")), None);
    }

    #[test]
    fn test_category_or_raw_label() {
        assert_eq!(category_or_raw_label(Some("Recon:EC2/Portscan")), "Port Scanning");
        assert_eq!(category_or_raw_label(Some("Backdoor:EC2/Spambot")), "Backdoor:EC2/Spambot");
        assert_eq!(category_or_raw_label(None), "Unknown");
        assert_eq!(category_or_raw_label(Some("")), "Unknown");
    }

    #[test]
    fn test_canonical_index_matches_order() {
        for (i, category) in Category::CANONICAL.iter().enumerate() {
            assert_eq!(category.index(), i);
        }
    }
}
