//! Remediation & Threat Records
//!
//! Canonical record shapes for one snapshot. Decoding is total: a field
//! that is missing or of the wrong JSON type is treated as absent, never
//! as a failure of the whole record.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ============================================================================
// FIELD NAMES (canonical first, then accepted legacy aliases)
// ============================================================================

const FINDING_TYPE_KEYS: &[&str] = &["finding_type", "findingType", "type"];
const SEVERITY_KEYS: &[&str] = &["severity", "Severity"];
const ACTION_STATUS_KEYS: &[&str] = &["action_status", "actionStatus", "status"];
const REVIEW_REQUIRED_KEYS: &[&str] = &["review_required", "sns_sent", "reviewRequired"];
const LATENCY_KEYS: &[&str] = &["latency_seconds", "latencySeconds", "latency"];
const TIME_OCCURRED_KEYS: &[&str] = &["time_occurred", "timestamp", "timeOccurred"];

/// Threat records carry their label under one of these keys
const THREAT_TYPE_KEYS: &[&str] = &["finding_type", "findingType", "type", "Type"];

/// Action status that counts as a successful remediation
pub const COMPLETED_STATUS: &str = "completed";

// ============================================================================
// REMEDIATION RECORD
// ============================================================================

/// One automated or manual response action
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct RemediationRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finding_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_status: Option<String>,

    /// Manual path taken (human notification dispatched)
    pub review_required: bool,

    /// Raw value as received; see [`RemediationRecord::latency`]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_seconds: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_occurred: Option<String>,

    /// Every other field of the source record, kept for filtering and export
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RemediationRecord {
    /// True when the remediation finished successfully
    pub fn is_completed(&self) -> bool {
        self.action_status
            .as_deref()
            .map(|s| s.trim().eq_ignore_ascii_case(COMPLETED_STATUS))
            .unwrap_or(false)
    }

    /// True when no human review was dispatched
    pub fn is_automated(&self) -> bool {
        !self.review_required
    }

    /// Latency in seconds, only when it reads as a finite number
    pub fn latency(&self) -> Option<f64> {
        let value = match self.latency_seconds.as_ref()? {
            Value::Number(n) => n.as_f64()?,
            Value::String(s) => s.trim().parse::<f64>().ok()?,
            _ => return None,
        };

        value.is_finite().then_some(value)
    }

    /// Lossless JSON object form (canonical names + extra fields)
    pub fn to_object(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }
}

impl From<Map<String, Value>> for RemediationRecord {
    fn from(mut raw: Map<String, Value>) -> Self {
        let finding_type = take_string(&mut raw, FINDING_TYPE_KEYS);
        let severity = take_string(&mut raw, SEVERITY_KEYS);
        let action_status = take_string(&mut raw, ACTION_STATUS_KEYS);
        let review_required = take_flag(&mut raw, REVIEW_REQUIRED_KEYS);
        let latency_seconds = take_value(&mut raw, LATENCY_KEYS);
        let time_occurred = take_string(&mut raw, TIME_OCCURRED_KEYS);

        Self {
            finding_type,
            severity,
            action_status,
            review_required,
            latency_seconds,
            time_occurred,
            extra: raw,
        }
    }
}

// ============================================================================
// THREAT RECORD
// ============================================================================

/// Opaque threat finding, kept exactly as received
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThreatRecord(pub Map<String, Value>);

impl ThreatRecord {
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

// ============================================================================
// FINDING LABELS
// ============================================================================

/// Records that expose a raw finding-type label
pub trait FindingLabeled {
    fn finding_type(&self) -> Option<&str>;
}

impl FindingLabeled for RemediationRecord {
    fn finding_type(&self) -> Option<&str> {
        self.finding_type.as_deref()
    }
}

impl FindingLabeled for ThreatRecord {
    fn finding_type(&self) -> Option<&str> {
        THREAT_TYPE_KEYS
            .iter()
            .find_map(|key| self.0.get(*key).and_then(Value::as_str))
    }
}

// ============================================================================
// FIELD EXTRACTION
// ============================================================================

/// Remove the first non-null alias of a field, returning it with its key.
///
/// Aliases that are not used stay in `raw` and end up in `extra`. A null
/// canonical key is dropped so it cannot shadow the canonical field.
fn take_entry(raw: &mut Map<String, Value>, keys: &[&str]) -> Option<(String, Value)> {
    let canonical = keys[0];
    if raw.get(canonical).is_some_and(Value::is_null) {
        raw.remove(canonical);
    }

    let key = keys.iter().find(|key| raw.get(**key).is_some_and(|v| !v.is_null()))?;
    raw.remove_entry(*key)
}

fn take_value(raw: &mut Map<String, Value>, keys: &[&str]) -> Option<Value> {
    take_entry(raw, keys).map(|(_, value)| value)
}

/// String fields only; any other JSON type is absent and kept in `extra`
fn take_string(raw: &mut Map<String, Value>, keys: &[&str]) -> Option<String> {
    match take_entry(raw, keys)? {
        (_, Value::String(s)) => Some(s),
        (key, other) => {
            raw.insert(key, other);
            None
        }
    }
}

fn parse_flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|v| v != 0.0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Some(true),
            "false" | "0" | "no" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Unreadable flags count as false. An unreadable alias stays in `extra`;
/// the canonical key cannot, since the flag is always serialized.
fn take_flag(raw: &mut Map<String, Value>, keys: &[&str]) -> bool {
    let Some((key, value)) = take_entry(raw, keys) else {
        return false;
    };

    match parse_flag(&value) {
        Some(flag) => flag,
        None => {
            if key != keys[0] {
                raw.insert(key, value);
            }
            false
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
