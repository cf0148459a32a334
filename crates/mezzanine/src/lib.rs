//! Mezzanine - A configurator for warehouse mezzanine floors.
//!
//! Pricing, accessory layout, validation, persistence, report export and quote
//! submission for a mezzanine configuration. The pricing and layout engines are
//! pure functions of a [`model::Configuration`]; everything else is wired up by
//! the [`Configurator`] from an [`config::AppConfig`].

pub mod config;
pub mod export;
pub mod format;
pub mod layout;
pub mod pricing;
pub mod quote;
pub mod store;
pub mod validate;

mod error;

pub use mezzanine_core::{color, geometry, identifier, model};

pub use error::MezzanineError;
pub use layout::compute_layout;
pub use pricing::compute_pricing;

use log::{debug, info, trace};

use config::AppConfig;
use export::{ExportFormat, Exporter, Report};
use layout::{LayoutEngine, Placement};
use model::Configuration;
use pricing::PriceBreakdown;
use quote::{MockQuoteService, QuoteRequest, QuoteResponse, QuoteService};
use store::{ConfigurationStore, StorageBackend};

/// Entry point tying the engines to an application configuration.
///
/// # Examples
///
/// ```rust
/// use mezzanine::{Configurator, config::AppConfig, export::ExportFormat};
///
/// let source = r#"{"length":5000,"width":3000,"height":3000,"loadCapacity":350}"#;
///
/// let configurator = Configurator::new(AppConfig::default());
/// let config = configurator.decode(source).expect("Failed to decode");
///
/// let pricing = configurator.price(&config);
/// assert_eq!(pricing.base_price(), 50000.0);
///
/// let csv = configurator
///     .export(&config, ExportFormat::Csv)
///     .expect("Failed to export");
/// assert!(csv.starts_with("Mezzanine Configuration Export"));
/// ```
#[derive(Debug, Default)]
pub struct Configurator {
    config: AppConfig,
}

impl Configurator {
    /// Create a configurator with the given application configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Pricing, limits, layout, style, quote and store settings
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Decode a configuration from its JSON wire format and validate it.
    ///
    /// # Errors
    ///
    /// Returns `MezzanineError::Decode` for malformed JSON, unknown load
    /// capacities or accessory variants, and `MezzanineError::Validation` for
    /// values outside the configured limits.
    pub fn decode(&self, source: &str) -> Result<Configuration, MezzanineError> {
        info!("Decoding configuration");
        let config: Configuration = serde_json::from_str(source)?;
        trace!(config:?; "Decoded configuration");

        self.validate(&config)?;
        Ok(config)
    }

    /// Check `config` against the configured limits.
    ///
    /// # Errors
    ///
    /// Returns `MezzanineError::Validation` listing every issue found.
    pub fn validate(&self, config: &Configuration) -> Result<(), MezzanineError> {
        validate::validate(config, self.config.limits())?;
        Ok(())
    }

    /// Price `config` with the configured price list.
    pub fn price(&self, config: &Configuration) -> PriceBreakdown {
        let breakdown = self.config.pricing().compute(config);
        debug!(total_price = breakdown.total_price(); "Configuration priced");
        breakdown
    }

    /// Place every accessory instance of `config`.
    pub fn layout(&self, config: &Configuration) -> Vec<Placement> {
        let layout_config = self.config.layout();
        let placements = LayoutEngine::new()
            .with_stair_width(layout_config.stair_width())
            .with_gate_clearance(layout_config.gate_clearance())
            .calculate(config)
            .into_placements();
        info!(placements_len = placements.len(); "Layout calculated");
        placements
    }

    /// Build the exporter for `format` using the configured style.
    ///
    /// # Errors
    ///
    /// Returns `MezzanineError::Config` if the style section is invalid.
    pub fn exporter(&self, format: ExportFormat) -> Result<Box<dyn Exporter>, MezzanineError> {
        Ok(match format {
            ExportFormat::Csv => Box::new(export::csv::CsvExporter::new()),
            ExportFormat::Json => Box::new(export::json::JsonExporter::new()),
            ExportFormat::Svg => Box::new(
                export::svg::SvgPlanExporter::from_style(self.config.style())
                    .map_err(|err| MezzanineError::Config(err.to_string()))?,
            ),
        })
    }

    /// Price and lay out `config`, then render it in `format`.
    ///
    /// # Errors
    ///
    /// Returns `MezzanineError::Config` for an invalid style and
    /// `MezzanineError::Export` if rendering fails.
    pub fn export(
        &self,
        config: &Configuration,
        format: ExportFormat,
    ) -> Result<String, MezzanineError> {
        info!(format:%; "Exporting configuration");
        let exporter = self.exporter(format)?;

        let pricing = self.price(config);
        let placements = self.layout(config);
        let report = Report::new(config, &pricing)
            .with_placements(&placements)
            .with_leasing_terms(*self.config.pricing().leasing());

        let output = exporter.export(&report)?;
        debug!(bytes = output.len(); "Export rendered");
        Ok(output)
    }

    /// The mock quote service configured by the `[quote]` section.
    pub fn quote_service(&self) -> MockQuoteService {
        MockQuoteService::new(self.config.quote())
    }

    /// Submit `request` through `service`.
    ///
    /// The configuration inside the request is validated first.
    ///
    /// # Errors
    ///
    /// Returns `MezzanineError::Validation` if the contact fields or the
    /// configuration are invalid.
    pub fn submit_quote(
        &self,
        service: &mut impl QuoteService,
        request: &QuoteRequest,
    ) -> Result<QuoteResponse, MezzanineError> {
        self.validate(request.configuration())?;

        info!(email = request.email(); "Submitting quote request");
        let response = service.submit(request)?;
        Ok(response)
    }

    /// Open the configuration store on `backend` with the configured key.
    ///
    /// Falls back to the default configuration when nothing valid is stored.
    pub fn open_store<B: StorageBackend>(&self, backend: B) -> ConfigurationStore<B> {
        ConfigurationStore::open(backend, self.config.store().key(), Configuration::default())
    }
}
