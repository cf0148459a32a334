//! Report export for priced configurations.
//!
//! This module provides the [`Exporter`] trait that turns a [`Report`] into a
//! document in one of the supported [`ExportFormat`]s. It is the last stage of
//! the configurator pipeline.
//!
//! # Pipeline Position
//!
//! ```text
//! Configuration
//!     ↓ validate
//!     ↓ price + layout
//! Report
//!     ↓ export (this module)
//! CSV / JSON / SVG text
//! ```
//!
//! # Available Backends
//!
//! - [`csv`]: sectioned CSV summary
//! - [`json`]: configuration and pricing with an export timestamp
//! - [`svg`]: top-down plan view drawn from the layout placements
//!
//! # Error Handling
//!
//! Export operations return [`Error`], which converts into
//! [`MezzanineError::Export`] at the crate boundary.
//!
//! [`MezzanineError::Export`]: crate::MezzanineError::Export

pub mod csv;
pub mod json;
pub mod svg;

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use mezzanine_core::model::Configuration;

use crate::{
    layout::Placement,
    pricing::{LeasingTerms, PriceBreakdown},
};

/// Output formats a report can be exported to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Csv,
    Json,
    Svg,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [Self::Csv, Self::Json, Self::Svg];

    /// File extension without the leading dot.
    pub fn extension(self) -> &'static str {
        self.into()
    }

    /// Suggested file name for a download in this format.
    pub fn default_file_name(self) -> String {
        format!("mezzanine-configuration.{}", self.extension())
    }
}

impl From<ExportFormat> for &'static str {
    fn from(val: ExportFormat) -> Self {
        match val {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Svg => "svg",
        }
    }
}

impl Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: &'static str = (*self).into();
        write!(f, "{s}")
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "svg" => Ok(Self::Svg),
            other => Err(format!("unsupported export format `{other}`")),
        }
    }
}

/// Everything an exporter may draw on.
#[derive(Debug, Clone, Copy)]
pub struct Report<'a> {
    configuration: &'a Configuration,
    pricing: &'a PriceBreakdown,
    placements: &'a [Placement],
    leasing_terms: LeasingTerms,
}

impl<'a> Report<'a> {
    /// Create a report without placements, using the standard leasing terms
    /// for labels.
    pub fn new(configuration: &'a Configuration, pricing: &'a PriceBreakdown) -> Self {
        Self {
            configuration,
            pricing,
            placements: &[],
            leasing_terms: LeasingTerms::default(),
        }
    }

    /// Attach the layout placements (needed by the plan view).
    pub fn with_placements(mut self, placements: &'a [Placement]) -> Self {
        self.placements = placements;
        self
    }

    /// Use the leasing terms the pricing was computed with.
    pub fn with_leasing_terms(mut self, leasing_terms: LeasingTerms) -> Self {
        self.leasing_terms = leasing_terms;
        self
    }

    pub fn configuration(&self) -> &'a Configuration {
        self.configuration
    }

    pub fn pricing(&self) -> &'a PriceBreakdown {
        self.pricing
    }

    pub fn placements(&self) -> &'a [Placement] {
        self.placements
    }

    pub fn leasing_terms(&self) -> LeasingTerms {
        self.leasing_terms
    }
}

/// Abstraction for report export backends.
///
/// Implementors render a [`Report`] into the text of one output format. Writing
/// the text anywhere is left to the caller.
pub trait Exporter {
    /// The format this exporter produces.
    fn format(&self) -> ExportFormat;

    /// Render `report` into the exporter's output format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the report cannot be drawn, or
    /// [`Error::Encode`] if serialization fails.
    fn export(&self, report: &Report<'_>) -> Result<String, Error>;
}

/// Errors that can occur during export.
#[derive(Debug)]
pub enum Error {
    /// A rendering failure described by `message`.
    Render(String),
    /// A serialization failure.
    Encode(serde_json::Error),
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
            Self::Encode(err) => write!(f, "Encoding error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(_) => None,
            Self::Encode(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Encode(err)
    }
}
