//! JSON output formatter for bikeshare reports

use crate::report::SummaryReport;
use crate::{City, Result, TripRecord};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;

/// Provenance attached to a JSON report
#[derive(Debug, Clone, Serialize)]
pub struct Metadata {
    pub tool_version: String,
    pub city: Option<City>,
    pub total_records: usize,
    pub generated_at: DateTime<Utc>,
}

/// JSON formatter for summary reports
pub struct JsonFormatter {
    pretty: bool,
    metadata: Option<Metadata>,
}

impl JsonFormatter {
    /// Create a new JSON formatter producing compact output
    pub fn new() -> Self {
        Self {
            pretty: false,
            metadata: None,
        }
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Attach metadata; `total_records` counts the dataset before filtering
    pub fn with_metadata(
        mut self,
        tool_version: &str,
        city: Option<City>,
        total_records: usize,
    ) -> Self {
        self.metadata = Some(Metadata {
            tool_version: tool_version.to_string(),
            city,
            total_records,
            generated_at: Utc::now(),
        });
        self
    }

    /// Format a report, wrapped with metadata when present
    pub fn format(&self, report: &SummaryReport) -> Result<String> {
        let value = match &self.metadata {
            Some(metadata) => json!({
                "metadata": metadata,
                "report": report,
            }),
            None => serde_json::to_value(report)?,
        };
        self.render(&value)
    }

    /// Format a report together with the raw trips it summarizes
    ///
    /// Always uses the envelope form, with trips under `trips`.
    pub fn format_with_trips(
        &self,
        report: &SummaryReport,
        trips: &[TripRecord],
    ) -> Result<String> {
        let mut value = json!({
            "report": report,
            "trips": trips,
        });
        if let Some(metadata) = &self.metadata {
            value["metadata"] = serde_json::to_value(metadata)?;
        }
        self.render(&value)
    }

    fn render(&self, value: &serde_json::Value) -> Result<String> {
        let rendered = if self.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        Ok(rendered)
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}
