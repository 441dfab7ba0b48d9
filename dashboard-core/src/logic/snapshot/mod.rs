//! Snapshot Module
//!
//! One atomic fetch result: threats, remediations and blocked IPs for the
//! requested day window. A snapshot is never mutated; the next fetch
//! replaces it whole.

pub mod record;

pub use record::{FindingLabeled, RemediationRecord, ThreatRecord, COMPLETED_STATUS};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const THREAT_KEYS: &[&str] = &["threats", "ThreatMetadata"];
const REMEDIATION_KEYS: &[&str] = &["remediations", "RemediationLog"];
const BLOCKED_IP_KEYS: &[&str] = &["blocked_ips", "BlockedIPs", "blockedIPs"];

/// Full record set handed to the pipeline.
///
/// Each array may arrive under its canonical name or a legacy alias; when
/// both are present the canonical name wins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct Snapshot {
    pub threats: Vec<ThreatRecord>,
    pub remediations: Vec<RemediationRecord>,
    pub blocked_ips: Vec<Value>,
}

impl Snapshot {
    pub fn new(
        threats: Vec<ThreatRecord>,
        remediations: Vec<RemediationRecord>,
        blocked_ips: Vec<Value>,
    ) -> Self {
        Self { threats, remediations, blocked_ips }
    }

    /// Decode a snapshot document
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn is_empty(&self) -> bool {
        self.threats.is_empty() && self.remediations.is_empty() && self.blocked_ips.is_empty()
    }
}

impl TryFrom<Map<String, Value>> for Snapshot {
    type Error = String;

    fn try_from(mut document: Map<String, Value>) -> Result<Self, Self::Error> {
        Ok(Self {
            threats: objects_only(take_array(&mut document, THREAT_KEYS)?),
            remediations: objects_only(take_array(&mut document, REMEDIATION_KEYS)?),
            blocked_ips: take_array(&mut document, BLOCKED_IP_KEYS)?,
        })
    }
}

/// First non-null entry among `keys`; missing or null decodes as empty
fn take_array(document: &mut Map<String, Value>, keys: &[&str]) -> Result<Vec<Value>, String> {
    let mut chosen = None;
    for key in keys {
        match document.remove(*key) {
            Some(Value::Null) | None => {}
            Some(value) if chosen.is_none() => chosen = Some((*key, value)),
            Some(_) => log::debug!("Ignoring `{}`: `{}` already present", key, keys[0]),
        }
    }

    match chosen {
        None => Ok(Vec::new()),
        Some((_, Value::Array(entries))) => Ok(entries),
        Some((key, _)) => Err(format!("`{}` must be an array", key)),
    }
}

/// Keep object entries, skip anything else with a warning
fn objects_only<T: From<Map<String, Value>>>(entries: Vec<Value>) -> Vec<T> {
    let mut skipped = 0usize;

    let records = entries
        .into_iter()
        .filter_map(|entry| match entry {
            Value::Object(map) => Some(T::from(map)),
            _ => {
                skipped += 1;
                None
            }
        })
        .collect();

    if skipped > 0 {
        log::warn!("Skipped {} non-object snapshot entries", skipped);
    }

    records
}

impl From<Map<String, Value>> for ThreatRecord {
    fn from(map: Map<String, Value>) -> Self {
        ThreatRecord(map)
    }
}
