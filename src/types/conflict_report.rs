use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportSeverity {
    Info,
    Warning,
    Error,
}

/// A single diagnostic produced by the Conflict Reporter. `details` carries
/// structured, machine-readable context (e.g. `{"teacher": "...",
/// "required": 5, "available": 3}`); `message` is the human-readable form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConflictReport {
    pub severity: ReportSeverity,
    pub message: String,
    #[serde(default)]
    pub details: BTreeMap<String, serde_json::Value>,
    pub generated_at: String,
}

impl ConflictReport {
    pub fn new(
        severity: ReportSeverity,
        message: impl Into<String>,
        details: BTreeMap<String, serde_json::Value>,
    ) -> Self {
        ConflictReport {
            severity,
            message: message.into(),
            details,
            generated_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}
