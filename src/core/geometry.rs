//! Distance metric, steering and sampling bounds.

use super::Point;

/// Euclidean distance between two points.
#[inline]
pub fn distance<const D: usize>(a: &Point<D>, b: &Point<D>) -> f64 {
    a.distance(b)
}

/// Move from `from` toward `to` by at most `step_size`.
///
/// Returns `to` unchanged when it is within `step_size`, otherwise the point
/// at exactly `step_size` along the direction to `to`. Coincident inputs
/// return `from` without dividing by the zero length.
///
/// # Example
/// ```
/// use vastu_plan::core::{Point2, steer};
///
/// let from = Point2::new(0.0, 0.0);
/// let p = steer(&from, &Point2::new(10.0, 0.0), 1.0);
/// assert!((p.x() - 1.0).abs() < 1e-12);
///
/// assert_eq!(steer(&from, &from, 1.0), from);
/// ```
pub fn steer<const D: usize>(from: &Point<D>, to: &Point<D>, step_size: f64) -> Point<D> {
    let dist = from.distance(to);
    if dist <= step_size {
        return *to;
    }
    // dist > step_size >= 0 here, so the division is safe
    from.lerp(to, step_size / dist)
}

/// Axis-aligned box in the configuration space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds<const D: usize> {
    /// Minimum corner
    pub min: Point<D>,
    /// Maximum corner
    pub max: Point<D>,
}

impl<const D: usize> Bounds<D> {
    /// Bounding box of two points.
    pub fn from_corners(a: &Point<D>, b: &Point<D>) -> Self {
        let mut min = [0.0; D];
        let mut max = [0.0; D];
        for i in 0..D {
            min[i] = a[i].min(b[i]);
            max[i] = a[i].max(b[i]);
        }
        Self {
            min: Point::from_array(min),
            max: Point::from_array(max),
        }
    }

    /// Grow the box by `margin` on every side of every axis.
    pub fn expanded(&self, margin: f64) -> Self {
        let mut min = self.min.to_array();
        let mut max = self.max.to_array();
        for i in 0..D {
            min[i] -= margin;
            max[i] += margin;
        }
        Self {
            min: Point::from_array(min),
            max: Point::from_array(max),
        }
    }

    /// Extent along one axis
    #[inline]
    pub fn extent(&self, axis: usize) -> f64 {
        self.max[axis] - self.min[axis]
    }

    /// Check whether a point lies inside (inclusive)
    pub fn contains(&self, p: &Point<D>) -> bool {
        (0..D).all(|i| p[i] >= self.min[i] && p[i] <= self.max[i])
    }
}
