//! Pricing engine.
//!
//! Maps a [`Configuration`] to a [`PriceBreakdown`] containing every
//! intermediate line item. The calculation is pure: the same configuration and
//! [`PriceList`] always yield the same breakdown.
//!
//! ```text
//! subtotal      = base price + volume × price per m³
//! total         = subtotal × load multiplier + accessories
//! price per m²  = total / floor area
//! ```
//!
//! A zero floor area yields an infinite or NaN price per square meter; callers
//! validate dimensions before pricing.

use log::trace;
use serde::{Deserialize, Serialize};

use mezzanine_core::model::{Accessory, AccessoryKind, Configuration, LoadCapacity};

/// Price multipliers applied to the structural subtotal for each load tier.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoadMultipliers {
    kg250: f64,
    kg350: f64,
    kg500: f64,
}

impl LoadMultipliers {
    /// Returns the multiplier for the given tier.
    pub fn get(&self, capacity: LoadCapacity) -> f64 {
        match capacity {
            LoadCapacity::Kg250 => self.kg250,
            LoadCapacity::Kg350 => self.kg350,
            LoadCapacity::Kg500 => self.kg500,
        }
    }
}

impl Default for LoadMultipliers {
    fn default() -> Self {
        Self {
            kg250: 1.0,
            kg350: 1.2,
            kg500: 1.5,
        }
    }
}

/// A financing term: fixed annual rate over a fixed number of monthly payments.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct LeasingTerm {
    annual_rate_percent: f64,
    months: u32,
}

impl LeasingTerm {
    pub fn new(annual_rate_percent: f64, months: u32) -> Self {
        Self {
            annual_rate_percent,
            months,
        }
    }

    pub fn annual_rate_percent(&self) -> f64 {
        self.annual_rate_percent
    }

    pub fn months(&self) -> u32 {
        self.months
    }

    /// Monthly payment to amortize `principal` over this term.
    pub fn monthly_payment(&self, principal: f64) -> f64 {
        monthly_payment(principal, self.annual_rate_percent, self.months)
    }
}

/// The two leasing offers shown alongside the price.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct LeasingTerms {
    three_year: LeasingTerm,
    five_year: LeasingTerm,
}

impl LeasingTerms {
    pub fn three_year(&self) -> LeasingTerm {
        self.three_year
    }

    pub fn five_year(&self) -> LeasingTerm {
        self.five_year
    }
}

impl Default for LeasingTerms {
    fn default() -> Self {
        Self {
            three_year: LeasingTerm::new(2.9, 36),
            five_year: LeasingTerm::new(3.5, 60),
        }
    }
}

/// All constants of the cost model.
///
/// The [`Default`] price list is the standard one; a different list may be
/// loaded from the `[pricing]` section of the application configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PriceList {
    base_price: f64,
    price_per_cubic_meter: f64,
    load_multipliers: LoadMultipliers,
    stairs_unit_price: f64,
    railing_price_per_meter: f64,
    pallet_gate_unit_price: f64,
    leasing: LeasingTerms,
}

impl Default for PriceList {
    fn default() -> Self {
        Self {
            base_price: 50_000.0,
            price_per_cubic_meter: 2_000.0,
            load_multipliers: LoadMultipliers::default(),
            stairs_unit_price: 15_000.0,
            railing_price_per_meter: 800.0,
            pallet_gate_unit_price: 12_000.0,
            leasing: LeasingTerms::default(),
        }
    }
}

impl PriceList {
    pub fn base_price(&self) -> f64 {
        self.base_price
    }

    pub fn load_multipliers(&self) -> &LoadMultipliers {
        &self.load_multipliers
    }

    pub fn leasing(&self) -> &LeasingTerms {
        &self.leasing
    }

    /// Price of a single accessory entry, quantity included.
    ///
    /// Stair model and gate width do not influence the price.
    pub fn accessory_price(&self, accessory: &Accessory) -> f64 {
        let quantity = f64::from(accessory.quantity());
        match accessory.kind() {
            AccessoryKind::Stairs { .. } => self.stairs_unit_price * quantity,
            AccessoryKind::Railing { length_meters } => {
                self.railing_price_per_meter * length_meters * quantity
            }
            AccessoryKind::PalletGate { .. } => self.pallet_gate_unit_price * quantity,
        }
    }

    /// Compute the full price breakdown for a configuration.
    pub fn compute(&self, config: &Configuration) -> PriceBreakdown {
        let length_m = f64::from(config.length()) / 1000.0;
        let width_m = f64::from(config.width()) / 1000.0;
        let height_m = f64::from(config.height()) / 1000.0;

        let square_meters = length_m * width_m;
        let volume = length_m * width_m * height_m;

        let base_price = self.base_price;
        let dimension_price = volume * self.price_per_cubic_meter;
        let load_multiplier = self.load_multipliers.get(config.load_capacity());

        let accessories_price = config
            .accessories()
            .iter()
            .map(|accessory| self.accessory_price(accessory))
            .sum();

        // The multiplier covers the structure only, never the accessories.
        let subtotal = base_price + dimension_price;
        let total_price = subtotal * load_multiplier + accessories_price;
        let price_per_square_meter = total_price / square_meters;

        let leasing = LeasingPayments {
            three_year_monthly: self.leasing.three_year.monthly_payment(total_price),
            five_year_monthly: self.leasing.five_year.monthly_payment(total_price),
        };

        let breakdown = PriceBreakdown {
            base_price,
            dimension_price,
            load_multiplier,
            accessories_price,
            total_price,
            price_per_square_meter,
            square_meters,
            leasing,
        };
        trace!(breakdown:?; "Computed pricing");

        breakdown
    }
}

/// Monthly leasing payments for the configured terms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LeasingPayments {
    #[serde(rename = "threeYear")]
    three_year_monthly: f64,
    #[serde(rename = "fiveYear")]
    five_year_monthly: f64,
}

impl LeasingPayments {
    pub fn three_year_monthly(&self) -> f64 {
        self.three_year_monthly
    }

    pub fn five_year_monthly(&self) -> f64 {
        self.five_year_monthly
    }
}

/// Every line item of a priced configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    base_price: f64,
    dimension_price: f64,
    load_multiplier: f64,
    accessories_price: f64,
    total_price: f64,
    price_per_square_meter: f64,
    square_meters: f64,
    leasing: LeasingPayments,
}

impl PriceBreakdown {
    pub fn base_price(&self) -> f64 {
        self.base_price
    }

    /// Price of the structure's volume.
    pub fn dimension_price(&self) -> f64 {
        self.dimension_price
    }

    pub fn load_multiplier(&self) -> f64 {
        self.load_multiplier
    }

    pub fn accessories_price(&self) -> f64 {
        self.accessories_price
    }

    pub fn total_price(&self) -> f64 {
        self.total_price
    }

    pub fn price_per_square_meter(&self) -> f64 {
        self.price_per_square_meter
    }

    /// Floor area in square meters.
    pub fn square_meters(&self) -> f64 {
        self.square_meters
    }

    pub fn leasing(&self) -> &LeasingPayments {
        &self.leasing
    }
}

/// Compute the price breakdown with the standard [`PriceList`].
pub fn compute_pricing(config: &Configuration) -> PriceBreakdown {
    PriceList::default().compute(config)
}

/// Standard annuity payment: `P·r·(1+r)^n / ((1+r)^n − 1)` with `r` the monthly rate.
///
/// A zero rate degenerates to `P / n`.
pub fn monthly_payment(principal: f64, annual_rate_percent: f64, months: u32) -> f64 {
    let monthly_rate = annual_rate_percent / 100.0 / 12.0;
    let months_f = f64::from(months);
    if monthly_rate == 0.0 {
        return principal / months_f;
    }

    let growth = (1.0 + monthly_rate).powf(months_f);
    principal * monthly_rate * growth / (growth - 1.0)
}
