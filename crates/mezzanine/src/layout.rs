//! Accessory layout engine.
//!
//! Places every accessory instance of a [`Configuration`] around the
//! mezzanine footprint. Placement happens in three passes whose order matters
//! for collision handling:
//!
//! 1. Stairs, evenly spaced along the front edge, each claiming its width.
//! 2. Pallet gates, evenly spaced along the front edge per accessory entry. A
//!    gate whose position falls inside a claimed interval is shifted right once
//!    by its own width plus the clearance; the shifted position is not checked
//!    again.
//! 3. Railings, centered on the back, left and right edges in turn.
//!
//! The engine is a pure function of its input. See [`placement`] for the
//! output records and [`occupancy`] for edge bookkeeping.

pub mod occupancy;
pub mod placement;

pub use occupancy::EdgeOccupancy;
pub use placement::{Edge, Extent, Placement};

use log::{debug, trace};

use mezzanine_core::{
    geometry::{Interval, Point3, Rotation},
    model::{AccessoryKind, Configuration},
};

/// Result of a layout run: the placements and the edge intervals they claim.
#[derive(Debug, Clone, Default)]
pub struct Layout {
    placements: Vec<Placement>,
    occupancy: EdgeOccupancy,
}

impl Layout {
    /// Placements in output order: stairs, then gates, then railings.
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Intervals claimed on the front edge by stairs and gates.
    pub fn occupancy(&self) -> &EdgeOccupancy {
        &self.occupancy
    }

    pub fn into_placements(self) -> Vec<Placement> {
        self.placements
    }
}

/// Footprint dimensions in meters.
#[derive(Debug, Clone, Copy)]
struct Footprint {
    length: f64,
    width: f64,
    height: f64,
}

impl Footprint {
    fn from_config(config: &Configuration) -> Self {
        Self {
            length: f64::from(config.length()) / 1000.0,
            width: f64::from(config.width()) / 1000.0,
            height: f64::from(config.height()) / 1000.0,
        }
    }

    /// x positions of `quantity` instances spread evenly along the length.
    fn spread_along_length(self, quantity: u32) -> impl Iterator<Item = f64> {
        let spacing = self.length / (f64::from(quantity) + 1.0);
        let start = -self.length / 2.0;
        (1..=quantity).map(move |step| start + spacing * f64::from(step))
    }

    /// Anchor point and rotation of a railing centered on `edge`.
    fn railing_anchor(self, edge: Edge) -> (Point3, Rotation) {
        match edge {
            Edge::Back => (
                Point3::new(0.0, self.height, self.width / 2.0),
                Rotation::NONE,
            ),
            Edge::Left => (
                Point3::new(-self.length / 2.0, self.height, 0.0),
                Rotation::QUARTER,
            ),
            Edge::Right => (
                Point3::new(self.length / 2.0, self.height, 0.0),
                Rotation::QUARTER,
            ),
            Edge::Front => (
                Point3::new(0.0, self.height, -self.width / 2.0),
                Rotation::NONE,
            ),
        }
    }
}

/// Layout engine with its tunable spacing options.
///
/// # Examples
///
/// ```
/// use mezzanine::layout::LayoutEngine;
/// use mezzanine::model::{Accessory, Configuration, LoadCapacity, StairType};
///
/// let config = Configuration::new(8000, 3000, 3000, LoadCapacity::Kg250)
///     .with_accessory(Accessory::stairs("s", StairType::OneMeter, 3));
///
/// let layout = LayoutEngine::new().calculate(&config);
/// let xs: Vec<f64> = layout.placements().iter().map(|p| p.position().x()).collect();
/// assert_eq!(xs, vec![-2.0, 0.0, 2.0]);
/// ```
#[derive(Debug, Clone)]
pub struct LayoutEngine {
    stair_width: f64,
    gate_clearance: f64,
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutEngine {
    /// Create an engine with a 1 m stair width and 0.5 m gate clearance.
    pub fn new() -> Self {
        Self {
            stair_width: 1.0,
            gate_clearance: 0.5,
        }
    }

    /// Set the width each staircase claims on the front edge
    pub fn with_stair_width(mut self, width: f64) -> Self {
        self.stair_width = width;
        self
    }

    /// Set the extra distance added to a gate's width when it is shifted
    pub fn with_gate_clearance(mut self, clearance: f64) -> Self {
        self.gate_clearance = clearance;
        self
    }

    /// Lay out all accessory instances of `config`.
    pub fn calculate(&self, config: &Configuration) -> Layout {
        let footprint = Footprint::from_config(config);
        let mut layout = Layout::default();

        self.place_stairs(config, footprint, &mut layout);
        self.place_gates(config, footprint, &mut layout);
        self.place_railings(config, footprint, &mut layout);

        debug!(
            placements_len = layout.placements.len(),
            front_claims = layout.occupancy.intervals(Edge::Front).len();
            "Layout calculated"
        );
        trace!(placements:? = layout.placements; "Placements");

        layout
    }

    fn place_stairs(&self, config: &Configuration, footprint: Footprint, layout: &mut Layout) {
        let front_z = -footprint.width / 2.0;

        for accessory in config.accessories() {
            let AccessoryKind::Stairs { stair_type } = accessory.kind() else {
                continue;
            };

            let extent = Extent::Stairs {
                width: self.stair_width,
                run_depth: stair_type.run_depth(),
                rise: footprint.height,
            };

            for (instance, x) in (0..).zip(footprint.spread_along_length(accessory.quantity())) {
                layout
                    .occupancy
                    .occupy(Edge::Front, Interval::centered(x, self.stair_width));
                layout.placements.push(Placement::new(
                    accessory.id().clone(),
                    instance,
                    Edge::Front,
                    Point3::new(x, 0.0, front_z),
                    Rotation::NONE,
                    extent,
                ));
            }
        }
    }

    fn place_gates(&self, config: &Configuration, footprint: Footprint, layout: &mut Layout) {
        let front_z = -footprint.width / 2.0;

        for accessory in config.accessories() {
            let AccessoryKind::PalletGate { width } = accessory.kind() else {
                continue;
            };
            let gate_width = width.meters();

            for (instance, naive_x) in (0..).zip(footprint.spread_along_length(accessory.quantity()))
            {
                let mut x = naive_x;
                // A single shift; the new position may still overlap.
                if layout.occupancy.is_occupied(Edge::Front, x) {
                    x += gate_width + self.gate_clearance;
                    debug!(
                        accessory_id:% = accessory.id(),
                        instance = instance,
                        naive_x = naive_x,
                        x = x;
                        "Shifted pallet gate away from occupied front edge"
                    );
                }

                layout
                    .occupancy
                    .occupy(Edge::Front, Interval::centered(x, gate_width));
                layout.placements.push(Placement::new(
                    accessory.id().clone(),
                    instance,
                    Edge::Front,
                    Point3::new(x, footprint.height, front_z),
                    Rotation::NONE,
                    Extent::PalletGate { width: gate_width },
                ));
            }
        }
    }

    fn place_railings(&self, config: &Configuration, footprint: Footprint, layout: &mut Layout) {
        let mut railing_index = 0usize;

        for accessory in config.accessories() {
            let AccessoryKind::Railing { length_meters } = accessory.kind() else {
                continue;
            };

            for instance in 0..accessory.quantity() {
                let edge = Edge::RAILING_CYCLE[railing_index % Edge::RAILING_CYCLE.len()];
                railing_index += 1;

                let (position, rotation) = footprint.railing_anchor(edge);
                layout.placements.push(Placement::new(
                    accessory.id().clone(),
                    instance,
                    edge,
                    position,
                    rotation,
                    Extent::Railing {
                        length: *length_meters,
                    },
                ));
            }
        }
    }
}

/// Lay out all accessory instances of `config` with the default engine.
pub fn compute_layout(config: &Configuration) -> Vec<Placement> {
    LayoutEngine::new().calculate(config).into_placements()
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use proptest::prelude::*;

    use mezzanine_core::model::{Accessory, AccessoryType, LoadCapacity, PalletGateWidth, StairType};

    use super::*;

    fn config(length: u32) -> Configuration {
        Configuration::new(length, 3000, 3000, LoadCapacity::Kg250)
    }

    fn placements_of(placements: &[Placement], id: &str) -> Vec<Placement> {
        placements
            .iter()
            .filter(|p| p.accessory_id() == id)
            .cloned()
            .collect()
    }

    #[test]
    fn test_stairs_evenly_spaced_on_front_edge() {
        let config = config(8000).with_accessory(Accessory::stairs("s", StairType::OneMeter, 3));
        let placements = compute_layout(&config);

        let xs: Vec<f64> = placements.iter().map(|p| p.position().x()).collect();
        assert_eq!(xs, vec![-2.0, 0.0, 2.0]);
        for placement in &placements {
            assert_eq!(placement.edge(), Edge::Front);
            assert_approx_eq!(f64, placement.position().z(), -1.5);
            assert_approx_eq!(f64, placement.position().y(), 0.0);
            assert_eq!(placement.rotation(), Rotation::NONE);
        }
        let instances: Vec<u32> = placements.iter().map(Placement::instance).collect();
        assert_eq!(instances, vec![0, 1, 2]);
    }

    #[test]
    fn test_stairs_extent_follows_stair_type() {
        let config = config(8000)
            .with_accessory(Accessory::stairs("a", StairType::OneAndHalfMeters, 1))
            .with_accessory(Accessory::stairs("b", StairType::TwoMeters, 1));
        let placements = compute_layout(&config);

        assert_eq!(
            placements[0].extent(),
            &Extent::Stairs {
                width: 1.0,
                run_depth: 1.5,
                rise: 3.0
            }
        );
        assert_eq!(
            placements[1].extent(),
            &Extent::Stairs {
                width: 1.0,
                run_depth: 2.0,
                rise: 3.0
            }
        );
    }

    #[test]
    fn test_stairs_claim_front_intervals() {
        let config = config(6000).with_accessory(Accessory::stairs("s", StairType::OneMeter, 1));
        let layout = LayoutEngine::new().calculate(&config);

        assert_eq!(
            layout.occupancy().intervals(Edge::Front),
            &[Interval::new(-0.5, 0.5)]
        );
    }

    #[test]
    fn test_gate_shifted_once_when_inside_stairs() {
        // Stairs and gate both land at x = 0 on a 6 m front edge.
        let config = config(6000)
            .with_accessory(Accessory::stairs("s", StairType::OneMeter, 1))
            .with_accessory(Accessory::pallet_gate("g", PalletGateWidth::Mm2000, 1));
        let layout = LayoutEngine::new().calculate(&config);

        let gate = &placements_of(layout.placements(), "g")[0];
        assert_approx_eq!(f64, gate.position().x(), 0.0 + 2.0 + 0.5);
        assert_approx_eq!(f64, gate.position().y(), 3.0);
        assert_approx_eq!(f64, gate.position().z(), -1.5);
        assert_eq!(gate.extent(), &Extent::PalletGate { width: 2.0 });

        assert_eq!(
            layout.occupancy().intervals(Edge::Front)[1],
            Interval::new(1.5, 3.5)
        );
    }

    #[test]
    fn test_gate_keeps_naive_position_when_free() {
        let config = config(9000)
            .with_accessory(Accessory::stairs("s", StairType::OneMeter, 2))
            .with_accessory(Accessory::pallet_gate("g", PalletGateWidth::Mm3000, 1));
        let placements = compute_layout(&config);

        let gate = &placements_of(&placements, "g")[0];
        assert_approx_eq!(f64, gate.position().x(), 0.0);
    }

    #[test]
    fn test_gate_shift_uses_own_width() {
        let config = config(6000)
            .with_accessory(Accessory::stairs("s", StairType::OneMeter, 1))
            .with_accessory(Accessory::pallet_gate("g", PalletGateWidth::Mm2500, 1));
        let placements = compute_layout(&config);

        let gate = &placements_of(&placements, "g")[0];
        assert_approx_eq!(f64, gate.position().x(), 3.0);
    }

    #[test]
    fn test_gate_spacing_is_per_entry() {
        let config = config(8000)
            .with_accessory(Accessory::pallet_gate("a", PalletGateWidth::Mm2000, 1))
            .with_accessory(Accessory::pallet_gate("b", PalletGateWidth::Mm2000, 3));
        let placements = compute_layout(&config);

        // Entry `a` alone: x = 0. Entry `b` spreads over its own quantity and
        // its middle gate collides with `a`.
        let a = placements_of(&placements, "a");
        let b = placements_of(&placements, "b");
        assert_approx_eq!(f64, a[0].position().x(), 0.0);
        assert_approx_eq!(f64, b[0].position().x(), -2.0);
        assert_approx_eq!(f64, b[1].position().x(), 2.5);
        assert_approx_eq!(f64, b[2].position().x(), 2.0);
    }

    #[test]
    fn test_gate_residual_overlap_is_accepted() {
        let config = config(6000)
            .with_accessory(Accessory::stairs("s", StairType::OneMeter, 1))
            .with_accessory(Accessory::pallet_gate("g1", PalletGateWidth::Mm2000, 1))
            .with_accessory(Accessory::pallet_gate("g2", PalletGateWidth::Mm2000, 1));
        let placements = compute_layout(&config);

        let g1 = &placements_of(&placements, "g1")[0];
        let g2 = &placements_of(&placements, "g2")[0];
        assert_approx_eq!(f64, g1.position().x(), 2.5);
        assert_approx_eq!(f64, g2.position().x(), 2.5);
    }

    #[test]
    fn test_gate_on_interval_bound_is_shifted() {
        // Gate 1 claims [-2.4, 0.6]; gate 6 lands exactly on its upper bound.
        let config = config(2400)
            .with_accessory(Accessory::stairs("s", StairType::OneMeter, 1))
            .with_accessory(Accessory::pallet_gate("g", PalletGateWidth::Mm3000, 7));
        let placements = compute_layout(&config);

        let gates = placements_of(&placements, "g");
        assert_approx_eq!(f64, gates[0].position().x(), -0.9, epsilon = 1e-9);
        assert_approx_eq!(f64, gates[5].position().x(), 0.6 + 3.0 + 0.5, epsilon = 1e-9);
        assert_approx_eq!(f64, gates[6].position().x(), 0.9, epsilon = 1e-9);
    }

    #[test]
    fn test_spread_handles_maximum_quantity() {
        let footprint = Footprint::from_config(&config(6000));
        let xs: Vec<f64> = footprint.spread_along_length(u32::MAX).take(2).collect();

        assert_eq!(xs.len(), 2);
        assert!(xs[0] > -3.0);
        assert!(xs[1] > xs[0]);
    }

    #[test]
    fn test_gates_placed_after_stairs_regardless_of_list_order() {
        let config = config(6000)
            .with_accessory(Accessory::pallet_gate("g", PalletGateWidth::Mm2000, 1))
            .with_accessory(Accessory::stairs("s", StairType::OneMeter, 1));
        let placements = compute_layout(&config);

        assert_eq!(placements[0].accessory_id(), "s");
        assert_eq!(placements[1].accessory_id(), "g");
        assert_approx_eq!(f64, placements[1].position().x(), 2.5);
    }

    #[test]
    fn test_railing_edges_cycle_across_entries() {
        let mut config = config(6000);
        for id in ["r0", "r1", "r2", "r3"] {
            config.push_accessory(Accessory::railing(id, 5.0, 1));
        }
        let placements = compute_layout(&config);

        let edges: Vec<Edge> = placements.iter().map(Placement::edge).collect();
        assert_eq!(edges, vec![Edge::Back, Edge::Left, Edge::Right, Edge::Back]);
    }

    #[test]
    fn test_railing_counter_spans_quantities() {
        let config = config(6000)
            .with_accessory(Accessory::railing("a", 5.0, 2))
            .with_accessory(Accessory::railing("b", 3.0, 2));
        let placements = compute_layout(&config);

        let summary: Vec<(&str, u32, Edge)> = placements
            .iter()
            .map(|p| (p.accessory_id().as_str(), p.instance(), p.edge()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("a", 0, Edge::Back),
                ("a", 1, Edge::Left),
                ("b", 0, Edge::Right),
                ("b", 1, Edge::Back),
            ]
        );
    }

    #[test]
    fn test_railing_anchors() {
        let config = config(6000).with_accessory(Accessory::railing("r", 10.0, 3));
        let placements = compute_layout(&config);

        let back = &placements[0];
        assert_eq!(back.position(), Point3::new(0.0, 3.0, 1.5));
        assert_eq!(back.rotation(), Rotation::NONE);
        assert_eq!(back.extent(), &Extent::Railing { length: 10.0 });

        let left = &placements[1];
        assert_eq!(left.position(), Point3::new(-3.0, 3.0, 0.0));
        assert_eq!(left.rotation(), Rotation::QUARTER);

        let right = &placements[2];
        assert_eq!(right.position(), Point3::new(3.0, 3.0, 0.0));
        assert_eq!(right.rotation(), Rotation::QUARTER);
    }

    #[test]
    fn test_railings_stack_on_same_edge() {
        let config = config(6000).with_accessory(Accessory::railing("r", 4.0, 4));
        let placements = compute_layout(&config);
        assert_eq!(placements[0].position(), placements[3].position());
    }

    #[test]
    fn test_zero_quantity_produces_nothing() {
        let config = config(6000)
            .with_accessory(Accessory::stairs("s", StairType::OneMeter, 0))
            .with_accessory(Accessory::railing("r", 4.0, 0))
            .with_accessory(Accessory::pallet_gate("g", PalletGateWidth::Mm2000, 0));
        assert!(compute_layout(&config).is_empty());
    }

    #[test]
    fn test_output_order_stairs_gates_railings() {
        let mut config = config(9000);
        config.add_accessory(AccessoryType::Railing);
        config.add_accessory(AccessoryType::PalletGate);
        config.add_accessory(AccessoryType::Stairs);
        let placements = compute_layout(&config);

        let kinds: Vec<&str> = placements
            .iter()
            .map(|p| match p.extent() {
                Extent::Stairs { .. } => "stairs",
                Extent::PalletGate { .. } => "gate",
                Extent::Railing { .. } => "railing",
            })
            .collect();
        assert_eq!(kinds, vec!["stairs", "gate", "railing"]);
    }

    #[test]
    fn test_custom_engine_options() {
        let config = config(6000)
            .with_accessory(Accessory::stairs("s", StairType::OneMeter, 1))
            .with_accessory(Accessory::pallet_gate("g", PalletGateWidth::Mm2000, 1));
        let layout = LayoutEngine::new()
            .with_stair_width(2.0)
            .with_gate_clearance(1.0)
            .calculate(&config);

        assert_eq!(
            layout.occupancy().intervals(Edge::Front)[0],
            Interval::new(-1.0, 1.0)
        );
        assert_approx_eq!(f64, layout.placements()[1].position().x(), 3.0);
    }

    #[test]
    fn test_layout_is_deterministic() {
        let config = Configuration::default()
            .with_accessory(Accessory::stairs("s", StairType::TwoMeters, 2))
            .with_accessory(Accessory::pallet_gate("g", PalletGateWidth::Mm2500, 2));
        assert_eq!(compute_layout(&config), compute_layout(&config));
    }

    proptest! {
        #[test]
        fn prop_stairs_strictly_increasing_and_even(
            length in 2000u32..20000,
            quantity in 1u32..20,
        ) {
            let config = config(length)
                .with_accessory(Accessory::stairs("s", StairType::OneMeter, quantity));
            let placements = compute_layout(&config);
            prop_assert_eq!(placements.len(), quantity as usize);

            let expected_gap = f64::from(length) / 1000.0 / f64::from(quantity + 1);
            for pair in placements.windows(2) {
                let gap = pair[1].position().x() - pair[0].position().x();
                prop_assert!(gap > 0.0);
                prop_assert!((gap - expected_gap).abs() < 1e-3);
            }
        }

        #[test]
        fn prop_railing_edges_follow_global_index(quantities in prop::collection::vec(0u32..5, 0..6)) {
            let mut config = config(6000);
            for (i, quantity) in quantities.iter().enumerate() {
                config.push_accessory(Accessory::railing(format!("r{i}"), 2.0, *quantity));
            }
            let placements = compute_layout(&config);

            let total: u32 = quantities.iter().sum();
            prop_assert_eq!(placements.len(), total as usize);
            for (index, placement) in placements.iter().enumerate() {
                prop_assert_eq!(placement.edge(), Edge::RAILING_CYCLE[index % 3]);
            }
        }
    }
}
