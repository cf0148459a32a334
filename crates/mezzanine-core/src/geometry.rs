//! Geometric primitives used by the accessory layout.
//!
//! All lengths are in meters. The coordinate frame has its origin at the center
//! of the mezzanine footprint on the floor: `x` runs along the length, `y` is
//! vertical and `z` runs along the width. The front edge lies at `z = -width/2`.

use std::f64::consts::FRAC_PI_2;

use serde::Serialize;

/// A point in 3D space
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Point3 {
    x: f64,
    y: f64,
    z: f64,
}

impl Point3 {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f64 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f64 {
        self.y
    }

    /// Returns the z-coordinate of the point
    pub fn z(self) -> f64 {
        self.z
    }
}

/// Rotation around the vertical axis, in radians.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Rotation(f64);

impl Rotation {
    /// No rotation; the object runs along the x axis.
    pub const NONE: Self = Self(0.0);

    /// A quarter turn; the object runs along the z axis.
    pub const QUARTER: Self = Self(FRAC_PI_2);

    pub fn radians(self) -> f64 {
        self.0
    }
}

/// A closed interval on a single axis.
///
/// Used to track which stretches of an edge are already occupied by an
/// accessory instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Interval {
    start: f64,
    end: f64,
}

impl Interval {
    /// Creates an interval between `start` and `end`
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Creates an interval of `extent` centered on `center`
    pub fn centered(center: f64, extent: f64) -> Self {
        let half = extent / 2.0;
        Self {
            start: center - half,
            end: center + half,
        }
    }

    /// Returns the lower bound of the interval
    pub fn start(self) -> f64 {
        self.start
    }

    /// Returns the upper bound of the interval
    pub fn end(self) -> f64 {
        self.end
    }

    /// Checks whether `value` lies inside the interval, bounds included
    pub fn contains(self, value: f64) -> bool {
        value >= self.start && value <= self.end
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_point_accessors() {
        let point = Point3::new(1.0, 2.0, 3.0);
        assert_eq!(point.x(), 1.0);
        assert_eq!(point.y(), 2.0);
        assert_eq!(point.z(), 3.0);
    }

    #[test]
    fn test_rotation_constants() {
        assert_eq!(Rotation::NONE.radians(), 0.0);
        assert_approx_eq!(f64, Rotation::QUARTER.radians(), FRAC_PI_2);
    }

    #[test]
    fn test_interval_centered() {
        let interval = Interval::centered(2.0, 1.0);
        assert_eq!(interval.start(), 1.5);
        assert_eq!(interval.end(), 2.5);
    }

    #[test]
    fn test_interval_contains_is_inclusive() {
        let interval = Interval::new(-0.5, 0.5);
        assert!(interval.contains(-0.5));
        assert!(interval.contains(0.0));
        assert!(interval.contains(0.5));
        assert!(!interval.contains(0.5001));
        assert!(!interval.contains(-0.75));
    }

    #[test]
    fn test_zero_width_interval() {
        let interval = Interval::centered(3.0, 0.0);
        assert_eq!(interval.start(), interval.end());
        assert!(interval.contains(3.0));
    }
}
