//! Placement records produced by the layout engine.

use std::fmt::{self, Display};

use serde::Serialize;

use mezzanine_core::{
    geometry::{Point3, Rotation},
    identifier::AccessoryId,
};

/// One of the four edges of the mezzanine footprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Edge {
    /// The `z = -width/2` edge where stairs and gates go
    Front,
    Back,
    Left,
    Right,
}

impl Edge {
    /// Edges railings cycle through, in order. The front edge is left to
    /// stairs and gates.
    pub const RAILING_CYCLE: [Edge; 3] = [Edge::Back, Edge::Left, Edge::Right];
}

impl From<Edge> for &'static str {
    fn from(val: Edge) -> Self {
        match val {
            Edge::Front => "front",
            Edge::Back => "back",
            Edge::Left => "left",
            Edge::Right => "right",
        }
    }
}

impl Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: &'static str = (*self).into();
        write!(f, "{s}")
    }
}

/// Variant-specific size of a placed accessory instance, in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Extent {
    /// A staircase rising from the floor to the deck.
    ///
    /// `run_depth` extends outward from the front edge.
    Stairs { width: f64, run_depth: f64, rise: f64 },
    /// A railing centered on its anchor, running along its rotation.
    Railing { length: f64 },
    /// A gate centered on its anchor along the front edge.
    PalletGate { width: f64 },
}

/// Where and how a single accessory instance is drawn.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    accessory_id: AccessoryId,
    instance: u32,
    edge: Edge,
    position: Point3,
    rotation: Rotation,
    extent: Extent,
}

impl Placement {
    pub fn new(
        accessory_id: AccessoryId,
        instance: u32,
        edge: Edge,
        position: Point3,
        rotation: Rotation,
        extent: Extent,
    ) -> Self {
        Self {
            accessory_id,
            instance,
            edge,
            position,
            rotation,
            extent,
        }
    }

    /// Id of the accessory entry this instance belongs to.
    pub fn accessory_id(&self) -> &AccessoryId {
        &self.accessory_id
    }

    /// Zero-based index of the instance within its accessory entry.
    pub fn instance(&self) -> u32 {
        self.instance
    }

    pub fn edge(&self) -> Edge {
        self.edge
    }

    pub fn position(&self) -> Point3 {
        self.position
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn extent(&self) -> &Extent {
        &self.extent
    }
}
