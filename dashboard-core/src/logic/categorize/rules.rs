//! Category Rules
//!
//! The single ordered rule table. Patterns are lower-case substrings
//! matched against the lower-cased raw finding type; the first rule that
//! matches decides the category.

use super::types::Category;

/// (pattern, category) in priority order
pub const CATEGORY_RULES: &[(&str, Category)] = &[
    // SSH brute force
    ("sshbruteforce", Category::SshBruteForce),
    ("ssh_brute_force", Category::SshBruteForce),
    ("ssh brute", Category::SshBruteForce),
    // Port scanning
    ("portscan", Category::PortScanning),
    ("portprobe", Category::PortScanning),
    ("port_scan", Category::PortScanning),
    ("port scan", Category::PortScanning),
    // Tor before IAM/S3 so "IAMUser/TorIPCaller" lands here
    ("toripcaller", Category::TorAccess),
    ("torclient", Category::TorAccess),
    ("torrelay", Category::TorAccess),
    ("toraccess", Category::TorAccess),
    ("tor_access", Category::TorAccess),
    // Credential/key exfiltration before generic IAM
    ("credentialexfiltration", Category::CredentialExfiltration),
    ("keyexfiltration", Category::CredentialExfiltration),
    ("credential_exfiltration", Category::CredentialExfiltration),
    // IAM anomalous behavior
    ("anomalousbehavior", Category::IamAnomalousBehavior),
    ("anomalous_behavior", Category::IamAnomalousBehavior),
    ("iamuser", Category::IamAnomalousBehavior),
    // Web login abuse
    ("webloginabuse", Category::WebLoginAbuse),
    ("web_login", Category::WebLoginAbuse),
    ("weblogin", Category::WebLoginAbuse),
    ("loginabuse", Category::WebLoginAbuse),
    // S3 / storage
    (":s3/", Category::S3UnauthorizedAccess),
    ("s3bucket", Category::S3UnauthorizedAccess),
    ("s3_unauthorized", Category::S3UnauthorizedAccess),
    ("bucket", Category::S3UnauthorizedAccess),
    // Geo risk
    ("georisk", Category::GeoRiskAccess),
    ("geo_risk", Category::GeoRiskAccess),
    ("unusuallocation", Category::GeoRiskAccess),
    ("impossibletravel", Category::GeoRiskAccess),
];
