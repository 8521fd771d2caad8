//! Collision checking against static obstacles.
//!
//! The planners talk to obstacles only through [`CollisionOracle`]. When no
//! obstacles are configured, [`FreeSpace`] accepts every point and segment.
//!
//! ```rust
//! use vastu_plan::collision::{CollisionOracle, Obstacle, ObstacleField};
//! use vastu_plan::core::Point2;
//!
//! let field = ObstacleField::new(vec![Obstacle::new(Point2::new(5.0, 0.0), 1.0)]);
//! assert!(!field.is_valid(&Point2::new(5.5, 0.0)));
//! assert!(!field.is_valid_segment(&Point2::new(0.0, 0.0), &Point2::new(10.0, 0.0)));
//! assert!(field.is_valid_segment(&Point2::new(0.0, 3.0), &Point2::new(10.0, 3.0)));
//! ```

mod obstacle;

pub use obstacle::{Obstacle, ObstacleField};

use crate::core::Point;

/// Default number of interior samples when checking a segment.
pub const DEFAULT_SEGMENT_SAMPLES: usize = 10;

/// Validity test for configurations and straight-line motions.
pub trait CollisionOracle<const D: usize>: Send + Sync {
    /// Check whether a single configuration is collision-free.
    fn is_valid(&self, p: &Point<D>) -> bool;

    /// Check whether the straight segment from `a` to `b` is collision-free.
    fn is_valid_segment(&self, a: &Point<D>, b: &Point<D>) -> bool;
}

/// Oracle for an empty world: everything is valid.
#[derive(Clone, Copy, Debug, Default)]
pub struct FreeSpace;

impl<const D: usize> CollisionOracle<D> for FreeSpace {
    #[inline]
    fn is_valid(&self, _p: &Point<D>) -> bool {
        true
    }

    #[inline]
    fn is_valid_segment(&self, _a: &Point<D>, _b: &Point<D>) -> bool {
        true
    }
}
