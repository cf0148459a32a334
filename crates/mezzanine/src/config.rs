//! Configuration types for the mezzanine configurator.
//!
//! This module provides the settings that control pricing, validation, layout,
//! plan styling, quote submission and storage. All types implement
//! [`serde::Deserialize`] for loading from external sources, and every section
//! is optional.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level application configuration combining all sections.
//! - [`PriceList`] - Cost model constants (`[pricing]`).
//! - [`Limits`] - Accepted input ranges (`[limits]`).
//! - [`LayoutConfig`] - Layout engine spacing (`[layout]`).
//! - [`StyleConfig`] - Plan view colors and scale (`[style]`).
//! - [`QuoteConfig`] - Mock quote service behavior (`[quote]`).
//! - [`StoreConfig`] - Configuration store settings (`[store]`).
//!
//! # Example
//!
//! ```
//! # use mezzanine::config::AppConfig;
//! // Use default configuration
//! let config = AppConfig::default();
//! assert!(config.style().platform_color().is_ok());
//! assert_eq!(config.store().key(), "mezzanine-config");
//! ```

use std::time::Duration;

use serde::Deserialize;

use mezzanine_core::color::Color;

pub use crate::{pricing::PriceList, validate::Limits};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Pricing constants section.
    #[serde(default)]
    pricing: PriceList,

    /// Validation limits section.
    #[serde(default)]
    limits: Limits,

    /// Layout engine section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Plan styling section.
    #[serde(default)]
    style: StyleConfig,

    /// Quote submission section.
    #[serde(default)]
    quote: QuoteConfig,

    /// Storage section.
    #[serde(default)]
    store: StoreConfig,
}

impl AppConfig {
    /// Returns the price list.
    pub fn pricing(&self) -> &PriceList {
        &self.pricing
    }

    /// Returns the validation limits.
    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Returns the quote service configuration.
    pub fn quote(&self) -> &QuoteConfig {
        &self.quote
    }

    /// Returns the store configuration.
    pub fn store(&self) -> &StoreConfig {
        &self.store
    }

    /// Replace the price list (builder style).
    pub fn with_pricing(mut self, pricing: PriceList) -> Self {
        self.pricing = pricing;
        self
    }

    /// Replace the quote configuration (builder style).
    pub fn with_quote(mut self, quote: QuoteConfig) -> Self {
        self.quote = quote;
        self
    }
}

/// Spacing used by the layout engine, in meters.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    stair_width: f64,
    gate_clearance: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            stair_width: 1.0,
            gate_clearance: 0.5,
        }
    }
}

impl LayoutConfig {
    /// Width each staircase claims on the front edge.
    pub fn stair_width(&self) -> f64 {
        self.stair_width
    }

    /// Extra distance added to a gate's width when it must move aside.
    pub fn gate_clearance(&self) -> f64 {
        self.gate_clearance
    }
}

/// Visual styling of the SVG plan view.
///
/// Colors are stored as strings and parsed on access so a bad value is
/// reported where it is used.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    background_color: Option<String>,
    platform_color: String,
    stairs_color: String,
    railing_color: String,
    gate_color: String,
    pixels_per_meter: f64,
    margin_meters: f64,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            background_color: None,
            platform_color: "#ffffcc".to_string(),
            stairs_color: "#8B4513".to_string(),
            railing_color: "#666666".to_string(),
            gate_color: "#ffd700".to_string(),
            pixels_per_meter: 40.0,
            margin_meters: 2.5,
        }
    }
}

impl StyleConfig {
    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_ref()
            .map(|color| Color::new(color))
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }

    pub fn platform_color(&self) -> Result<Color, String> {
        parse_color("platform", &self.platform_color)
    }

    pub fn stairs_color(&self) -> Result<Color, String> {
        parse_color("stairs", &self.stairs_color)
    }

    pub fn railing_color(&self) -> Result<Color, String> {
        parse_color("railing", &self.railing_color)
    }

    pub fn gate_color(&self) -> Result<Color, String> {
        parse_color("gate", &self.gate_color)
    }

    /// Scale of the plan view.
    pub fn pixels_per_meter(&self) -> f64 {
        self.pixels_per_meter
    }

    /// Blank space drawn around the footprint, in meters.
    pub fn margin_meters(&self) -> f64 {
        self.margin_meters
    }
}

fn parse_color(name: &str, value: &str) -> Result<Color, String> {
    Color::new(value).map_err(|err| format!("Invalid {name} color in config: {err}"))
}

/// Behavior of the mock quote service.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct QuoteConfig {
    delay_ms: u64,
    success_rate: f64,
}

impl Default for QuoteConfig {
    fn default() -> Self {
        Self {
            delay_ms: 1500,
            success_rate: 0.9,
        }
    }
}

impl QuoteConfig {
    pub fn new(delay_ms: u64, success_rate: f64) -> Self {
        Self {
            delay_ms,
            success_rate,
        }
    }

    /// Simulated network delay.
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    /// Probability in `[0, 1]` that a submission succeeds.
    pub fn success_rate(&self) -> f64 {
        self.success_rate
    }
}

/// Settings of the configuration store.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    key: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            key: crate::store::DEFAULT_KEY.to_string(),
        }
    }
}

impl StoreConfig {
    /// Key under which the configuration is persisted.
    pub fn key(&self) -> &str {
        &self.key
    }
}
