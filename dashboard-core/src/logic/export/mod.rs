//! Export Module
//!
//! CSV export of the current snapshot's raw arrays (unfiltered).

pub mod delimited;

pub use delimited::{parse_delimited, to_delimited};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ExportError;
use crate::logic::snapshot::Snapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportDataset {
    Threats,
    Remediations,
    BlockedIps,
}

impl ExportDataset {
    pub const ALL: [ExportDataset; 3] = [Self::Threats, Self::Remediations, Self::BlockedIps];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Threats => "threats",
            Self::Remediations => "remediations",
            Self::BlockedIps => "blocked_ips",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "threats" => Some(Self::Threats),
            "remediations" => Some(Self::Remediations),
            "blocked_ips" | "blockedips" | "blocked-ips" => Some(Self::BlockedIps),
            _ => None,
        }
    }
}

impl std::fmt::Display for ExportDataset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rendered export, ready to hand to the host as a download
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CsvExport {
    pub filename: String,
    pub content: String,
    pub rows: usize,
}

/// Flatten one dataset to JSON objects; scalar blocked IPs become `{"ip": ...}`
pub fn records_for(snapshot: &Snapshot, dataset: ExportDataset) -> Vec<Map<String, Value>> {
    match dataset {
        ExportDataset::Threats => snapshot.threats.iter().map(|t| t.fields().clone()).collect(),
        ExportDataset::Remediations => snapshot.remediations.iter().map(|r| r.to_object()).collect(),
        ExportDataset::BlockedIps => snapshot
            .blocked_ips
            .iter()
            .map(|entry| match entry {
                Value::Object(map) => map.clone(),
                scalar => {
                    let mut map = Map::new();
                    map.insert("ip".to_string(), scalar.clone());
                    map
                }
            })
            .collect(),
    }
}

/// `<dataset>_<YYYYMMDDTHHMMSSZ>.csv`
pub fn export_filename(dataset: ExportDataset, at: DateTime<Utc>) -> String {
    format!("{}_{}.csv", dataset, at.format("%Y%m%dT%H%M%SZ"))
}

pub fn export_dataset(
    snapshot: &Snapshot,
    dataset: ExportDataset,
    at: DateTime<Utc>,
) -> Result<CsvExport, ExportError> {
    let records = records_for(snapshot, dataset);
    let content = to_delimited(dataset.as_str(), &records)?;

    log::info!("Exported {} {} records", records.len(), dataset);

    Ok(CsvExport {
        filename: export_filename(dataset, at),
        content,
        rows: records.len(),
    })
}
