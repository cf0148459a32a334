//! JSON export of a priced configuration.

use chrono::{DateTime, SecondsFormat, Utc};
use log::debug;
use serde::Serialize;

use mezzanine_core::model::Configuration;

use super::{Error, ExportFormat, Exporter, Report};
use crate::pricing::PriceBreakdown;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReport<'a> {
    configuration: &'a Configuration,
    pricing: &'a PriceBreakdown,
    export_date: String,
}

/// Pretty-printed `{ configuration, pricing, exportDate }` document.
///
/// The export date is the current time unless pinned with
/// [`with_export_date`](Self::with_export_date).
#[derive(Debug, Clone, Default)]
pub struct JsonExporter {
    export_date: Option<DateTime<Utc>>,
}

impl JsonExporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_export_date(mut self, export_date: DateTime<Utc>) -> Self {
        self.export_date = Some(export_date);
        self
    }
}

impl Exporter for JsonExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Json
    }

    fn export(&self, report: &Report<'_>) -> Result<String, Error> {
        let export_date = self
            .export_date
            .unwrap_or_else(Utc::now)
            .to_rfc3339_opts(SecondsFormat::Millis, true);

        let document = JsonReport {
            configuration: report.configuration(),
            pricing: report.pricing(),
            export_date,
        };
        let json = serde_json::to_string_pretty(&document)?;

        debug!(bytes = json.len(); "JSON report rendered");
        Ok(json)
    }
}
