//! Session snapshot export.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{Timestamp, ValidationError};

use super::edge_case::EdgeCase;
use super::errors::LedgerError;
use super::ledger::LedgerSummary;
use super::record::FeedbackRecord;

/// Text format of an exported snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Json,
    Yaml,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Yaml => "yaml",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Json => "application/json",
            ExportFormat::Yaml => "application/yaml",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "yaml" | "yml" => Ok(ExportFormat::Yaml),
            other => Err(ValidationError::unknown_value("format", other)),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Everything a session produced, as of `session_timestamp`.
///
/// Field names are the download format consumed by downstream review sheets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub session_timestamp: Timestamp,
    pub routing_tests: Vec<FeedbackRecord>,
    pub edge_cases: Vec<EdgeCase>,
    pub summary: LedgerSummary,
}

impl SessionSnapshot {
    /// Serializes the snapshot. JSON output is pretty-printed.
    pub fn render(&self, format: ExportFormat) -> Result<String, LedgerError> {
        match format {
            ExportFormat::Json => serde_json::to_string_pretty(self)
                .map_err(|e| LedgerError::export_failed(e.to_string())),
            ExportFormat::Yaml => {
                serde_yaml::to_string(self).map_err(|e| LedgerError::export_failed(e.to_string()))
            }
        }
    }

    /// Suggested download name, e.g. `routing_session_20240115_1030.json`.
    pub fn file_name(&self, format: ExportFormat) -> String {
        format!(
            "routing_session_{}.{}",
            self.session_timestamp.file_stamp(),
            format.extension()
        )
    }
}
