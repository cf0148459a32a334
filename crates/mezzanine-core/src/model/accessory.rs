//! Accessory types.
//!
//! - [`Accessory`] - An identified, quantified accessory entry
//! - [`AccessoryKind`] - Variant payload (stairs, railing, pallet gate)
//! - [`AccessoryType`] - Payload-free discriminant used for creation and reporting
//! - [`StairType`], [`PalletGateWidth`] - Enumerated sizing options

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::{error::ModelError, identifier::AccessoryId};

/// Available staircase models.
///
/// The names match the external representation (`"Straight 1m"` etc.).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum StairType {
    #[default]
    #[serde(rename = "Straight 1m")]
    OneMeter,
    #[serde(rename = "Straight 1.5m")]
    OneAndHalfMeters,
    #[serde(rename = "Straight 2m")]
    TwoMeters,
}

impl StairType {
    pub const ALL: [StairType; 3] = [Self::OneMeter, Self::OneAndHalfMeters, Self::TwoMeters];

    /// Horizontal run of the staircase in meters, as named by the model's suffix.
    pub fn run_depth(self) -> f64 {
        match self {
            Self::OneMeter => 1.0,
            Self::OneAndHalfMeters => 1.5,
            Self::TwoMeters => 2.0,
        }
    }
}

impl FromStr for StairType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Straight 1m" => Ok(Self::OneMeter),
            "Straight 1.5m" => Ok(Self::OneAndHalfMeters),
            "Straight 2m" => Ok(Self::TwoMeters),
            _ => Err(ModelError::UnknownStairType(s.to_string())),
        }
    }
}

impl From<StairType> for &'static str {
    fn from(val: StairType) -> Self {
        match val {
            StairType::OneMeter => "Straight 1m",
            StairType::OneAndHalfMeters => "Straight 1.5m",
            StairType::TwoMeters => "Straight 2m",
        }
    }
}

impl Display for StairType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: &'static str = (*self).into();
        write!(f, "{s}")
    }
}

/// Available pallet gate opening widths.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum PalletGateWidth {
    #[default]
    #[serde(rename = "2000mm")]
    Mm2000,
    #[serde(rename = "2500mm")]
    Mm2500,
    #[serde(rename = "3000mm")]
    Mm3000,
}

impl PalletGateWidth {
    pub const ALL: [PalletGateWidth; 3] = [Self::Mm2000, Self::Mm2500, Self::Mm3000];

    /// Opening width in millimeters
    pub fn millimeters(self) -> u32 {
        match self {
            Self::Mm2000 => 2000,
            Self::Mm2500 => 2500,
            Self::Mm3000 => 3000,
        }
    }

    /// Opening width in meters
    pub fn meters(self) -> f64 {
        f64::from(self.millimeters()) / 1000.0
    }
}

impl FromStr for PalletGateWidth {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "2000mm" => Ok(Self::Mm2000),
            "2500mm" => Ok(Self::Mm2500),
            "3000mm" => Ok(Self::Mm3000),
            _ => Err(ModelError::UnknownGateWidth(s.to_string())),
        }
    }
}

impl Display for PalletGateWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}mm", self.millimeters())
    }
}

/// Discriminant of an accessory without its sizing payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessoryType {
    Stairs,
    Railing,
    PalletGate,
}

impl FromStr for AccessoryType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stairs" => Ok(Self::Stairs),
            "railing" => Ok(Self::Railing),
            "pallet_gate" => Ok(Self::PalletGate),
            _ => Err(ModelError::UnknownAccessoryType(s.to_string())),
        }
    }
}

impl From<AccessoryType> for &'static str {
    fn from(val: AccessoryType) -> Self {
        match val {
            AccessoryType::Stairs => "stairs",
            AccessoryType::Railing => "railing",
            AccessoryType::PalletGate => "pallet_gate",
        }
    }
}

impl Display for AccessoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: &'static str = (*self).into();
        write!(f, "{s}")
    }
}

/// Variant-specific payload of an accessory.
///
/// Serialized as an internally tagged object whose `type` field is the
/// [`AccessoryType`] name.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AccessoryKind {
    Stairs {
        #[serde(rename = "stairType")]
        stair_type: StairType,
    },
    Railing {
        #[serde(rename = "lengthMeters")]
        length_meters: f64,
    },
    PalletGate {
        width: PalletGateWidth,
    },
}

impl AccessoryKind {
    /// Railing length used for a freshly added railing, in meters.
    pub const DEFAULT_RAILING_LENGTH: f64 = 5.0;

    /// The payload a newly added accessory of the given type starts with.
    pub fn default_for(accessory_type: AccessoryType) -> Self {
        match accessory_type {
            AccessoryType::Stairs => Self::Stairs {
                stair_type: StairType::default(),
            },
            AccessoryType::Railing => Self::Railing {
                length_meters: Self::DEFAULT_RAILING_LENGTH,
            },
            AccessoryType::PalletGate => Self::PalletGate {
                width: PalletGateWidth::default(),
            },
        }
    }

    pub fn accessory_type(&self) -> AccessoryType {
        match self {
            Self::Stairs { .. } => AccessoryType::Stairs,
            Self::Railing { .. } => AccessoryType::Railing,
            Self::PalletGate { .. } => AccessoryType::PalletGate,
        }
    }

    /// Human-readable sizing detail, e.g. `Straight 1m`, `10m` or `2000mm`.
    pub fn details(&self) -> String {
        match self {
            Self::Stairs { stair_type } => stair_type.to_string(),
            Self::Railing { length_meters } => format!("{length_meters}m"),
            Self::PalletGate { width } => width.to_string(),
        }
    }
}

/// An accessory entry of a configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Accessory {
    id: AccessoryId,
    #[serde(flatten)]
    kind: AccessoryKind,
    quantity: u32,
}

impl Accessory {
    /// Create a new accessory entry.
    pub fn new(id: impl Into<AccessoryId>, kind: AccessoryKind, quantity: u32) -> Self {
        Self {
            id: id.into(),
            kind,
            quantity,
        }
    }

    /// Shorthand for a stairs entry.
    pub fn stairs(id: impl Into<AccessoryId>, stair_type: StairType, quantity: u32) -> Self {
        Self::new(id, AccessoryKind::Stairs { stair_type }, quantity)
    }

    /// Shorthand for a railing entry.
    pub fn railing(id: impl Into<AccessoryId>, length_meters: f64, quantity: u32) -> Self {
        Self::new(id, AccessoryKind::Railing { length_meters }, quantity)
    }

    /// Shorthand for a pallet gate entry.
    pub fn pallet_gate(id: impl Into<AccessoryId>, width: PalletGateWidth, quantity: u32) -> Self {
        Self::new(id, AccessoryKind::PalletGate { width }, quantity)
    }

    pub fn id(&self) -> &AccessoryId {
        &self.id
    }

    pub fn kind(&self) -> &AccessoryKind {
        &self.kind
    }

    /// Mutable access to the sizing payload.
    ///
    /// Callers may change the variant's field but should keep the variant itself.
    pub fn kind_mut(&mut self) -> &mut AccessoryKind {
        &mut self.kind
    }

    pub fn accessory_type(&self) -> AccessoryType {
        self.kind.accessory_type()
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
    }
}
