//! Tracking of occupied stretches along the footprint edges.

use indexmap::IndexMap;

use mezzanine_core::geometry::Interval;

use super::placement::Edge;

/// Intervals already taken on each edge, in the order they were claimed.
#[derive(Debug, Clone, Default)]
pub struct EdgeOccupancy {
    occupied: IndexMap<Edge, Vec<Interval>>,
}

impl EdgeOccupancy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `interval` as taken on `edge`.
    pub fn occupy(&mut self, edge: Edge, interval: Interval) {
        self.occupied.entry(edge).or_default().push(interval);
    }

    /// Returns true if `position` falls inside any interval already taken on
    /// `edge`, bounds included.
    pub fn is_occupied(&self, edge: Edge, position: f64) -> bool {
        self.intervals(edge)
            .iter()
            .any(|interval| interval.contains(position))
    }

    /// Intervals taken on `edge`, in claim order.
    pub fn intervals(&self, edge: Edge) -> &[Interval] {
        self.occupied
            .get(&edge)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_occupancy() {
        let occupancy = EdgeOccupancy::new();
        assert!(occupancy.intervals(Edge::Front).is_empty());
        assert!(!occupancy.is_occupied(Edge::Front, 0.0));
    }

    #[test]
    fn test_occupy_keeps_claim_order_per_edge() {
        let mut occupancy = EdgeOccupancy::new();
        occupancy.occupy(Edge::Front, Interval::new(1.0, 2.0));
        occupancy.occupy(Edge::Back, Interval::new(-1.0, 1.0));
        occupancy.occupy(Edge::Front, Interval::new(-3.0, -2.0));

        assert_eq!(
            occupancy.intervals(Edge::Front),
            &[Interval::new(1.0, 2.0), Interval::new(-3.0, -2.0)]
        );
        assert_eq!(occupancy.intervals(Edge::Back), &[Interval::new(-1.0, 1.0)]);
        assert!(occupancy.intervals(Edge::Left).is_empty());
    }

    #[test]
    fn test_is_occupied_is_per_edge() {
        let mut occupancy = EdgeOccupancy::new();
        occupancy.occupy(Edge::Front, Interval::centered(0.0, 1.0));

        assert!(occupancy.is_occupied(Edge::Front, 0.5));
        assert!(!occupancy.is_occupied(Edge::Back, 0.0));
        assert!(!occupancy.is_occupied(Edge::Front, 0.6));
    }
}
