//! The mezzanine configuration and its load capacity tiers.

use std::fmt::{self, Display};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    error::ModelError,
    identifier::AccessoryId,
    model::accessory::{Accessory, AccessoryKind, AccessoryType},
};

/// Rated floor load of the mezzanine, in kg/m².
///
/// Serialized as the bare number (`250`, `350` or `500`); any other number is
/// rejected when decoding.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum LoadCapacity {
    #[default]
    Kg250,
    Kg350,
    Kg500,
}

impl LoadCapacity {
    pub const ALL: [LoadCapacity; 3] = [Self::Kg250, Self::Kg350, Self::Kg500];

    pub fn kg_per_square_meter(self) -> u32 {
        match self {
            Self::Kg250 => 250,
            Self::Kg350 => 350,
            Self::Kg500 => 500,
        }
    }
}

impl TryFrom<u32> for LoadCapacity {
    type Error = ModelError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            250 => Ok(Self::Kg250),
            350 => Ok(Self::Kg350),
            500 => Ok(Self::Kg500),
            other => Err(ModelError::UnsupportedLoadCapacity(other)),
        }
    }
}

impl From<LoadCapacity> for u32 {
    fn from(capacity: LoadCapacity) -> Self {
        capacity.kg_per_square_meter()
    }
}

impl Display for LoadCapacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kg_per_square_meter())
    }
}

/// A complete mezzanine configuration.
///
/// Dimensions are in millimeters. The accessory list keeps insertion order,
/// which the layout relies on.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    length: u32,
    width: u32,
    height: u32,
    load_capacity: LoadCapacity,
    #[serde(default)]
    accessories: Vec<Accessory>,
}

impl Configuration {
    /// Create a configuration without accessories.
    ///
    /// # Arguments
    ///
    /// * `length` - Length along the front edge, in millimeters
    /// * `width` - Depth from front to back edge, in millimeters
    /// * `height` - Floor height, in millimeters
    /// * `load_capacity` - Rated floor load tier
    pub fn new(length: u32, width: u32, height: u32, load_capacity: LoadCapacity) -> Self {
        Self {
            length,
            width,
            height,
            load_capacity,
            accessories: Vec::new(),
        }
    }

    /// Append an accessory (builder style).
    pub fn with_accessory(mut self, accessory: Accessory) -> Self {
        self.accessories.push(accessory);
        self
    }

    pub fn length(&self) -> u32 {
        self.length
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn load_capacity(&self) -> LoadCapacity {
        self.load_capacity
    }

    /// Borrow the accessories in list order.
    pub fn accessories(&self) -> &[Accessory] {
        &self.accessories
    }

    /// Update all three dimensions, in millimeters.
    pub fn set_dimensions(&mut self, length: u32, width: u32, height: u32) {
        self.length = length;
        self.width = width;
        self.height = height;
    }

    pub fn set_load_capacity(&mut self, load_capacity: LoadCapacity) {
        self.load_capacity = load_capacity;
    }

    /// Find an accessory by id.
    pub fn accessory(&self, id: &str) -> Option<&Accessory> {
        self.accessories.iter().find(|a| a.id() == id)
    }

    /// Add a new accessory of the given type with its default sizing and a
    /// quantity of one. Returns the generated identifier.
    pub fn add_accessory(&mut self, accessory_type: AccessoryType) -> AccessoryId {
        let id = AccessoryId::generate(accessory_type.into(), |candidate| {
            self.accessory(candidate).is_some()
        });
        debug!(id:% = id, accessory_type:%; "Adding accessory");

        self.accessories.push(Accessory::new(
            id.clone(),
            AccessoryKind::default_for(accessory_type),
            1,
        ));
        id
    }

    /// Append an existing accessory entry at the end of the list.
    pub fn push_accessory(&mut self, accessory: Accessory) {
        self.accessories.push(accessory);
    }

    /// Remove the accessory with the given id. Returns false if none matched.
    pub fn remove_accessory(&mut self, id: &str) -> bool {
        let before = self.accessories.len();
        self.accessories.retain(|a| a.id() != id);
        before != self.accessories.len()
    }

    /// Mutate the accessory with the given id in place.
    ///
    /// Returns false if no accessory has that id.
    pub fn update_accessory(&mut self, id: &str, update: impl FnOnce(&mut Accessory)) -> bool {
        match self.accessories.iter_mut().find(|a| a.id() == id) {
            Some(accessory) => {
                update(accessory);
                true
            }
            None => false,
        }
    }
}

impl Default for Configuration {
    /// A 9 m × 3 m × 3 m mezzanine rated 250 kg/m² with one 10 m railing.
    fn default() -> Self {
        Self::new(9000, 3000, 3000, LoadCapacity::Kg250)
            .with_accessory(Accessory::railing("default-railing-1", 10.0, 1))
    }
}
