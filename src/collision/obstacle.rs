//! Circular (2D) and spherical (3D) obstacles.

use log::trace;

use super::{CollisionOracle, DEFAULT_SEGMENT_SAMPLES};
use crate::core::Point;

/// An immutable round obstacle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Obstacle<const D: usize> {
    /// Obstacle centre
    pub center: Point<D>,
    /// Obstacle radius
    pub radius: f64,
}

impl<const D: usize> Obstacle<D> {
    /// Create a new obstacle
    pub fn new(center: Point<D>, radius: f64) -> Self {
        Self { center, radius }
    }

    /// True if `p` is within `radius + margin` of the centre (inclusive).
    #[inline]
    pub fn blocks(&self, p: &Point<D>, margin: f64) -> bool {
        let reach = self.radius + margin;
        self.center.distance_squared(p) <= reach * reach
    }
}

/// A set of obstacles checked by sampling.
///
/// Segments are tested at both endpoints plus `segment_samples` evenly spaced
/// interior points. Overlapping obstacles are fine.
#[derive(Clone, Debug)]
pub struct ObstacleField<const D: usize> {
    obstacles: Vec<Obstacle<D>>,
    margin: f64,
    segment_samples: usize,
}

impl<const D: usize> ObstacleField<D> {
    /// Create a field with zero margin and the default sample count
    pub fn new(obstacles: Vec<Obstacle<D>>) -> Self {
        Self {
            obstacles,
            margin: 0.0,
            segment_samples: DEFAULT_SEGMENT_SAMPLES,
        }
    }

    /// Set the clearance added to every obstacle radius
    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    /// Set the number of interior samples per segment
    pub fn with_segment_samples(mut self, samples: usize) -> Self {
        self.segment_samples = samples;
        self
    }

    /// Obstacles in this field
    pub fn obstacles(&self) -> &[Obstacle<D>] {
        &self.obstacles
    }

    /// Clearance margin
    pub fn margin(&self) -> f64 {
        self.margin
    }

    /// Interior samples per segment
    pub fn segment_samples(&self) -> usize {
        self.segment_samples
    }
}

impl<const D: usize> CollisionOracle<D> for ObstacleField<D> {
    fn is_valid(&self, p: &Point<D>) -> bool {
        !self.obstacles.iter().any(|o| o.blocks(p, self.margin))
    }

    fn is_valid_segment(&self, a: &Point<D>, b: &Point<D>) -> bool {
        if !self.is_valid(a) || !self.is_valid(b) {
            return false;
        }

        let divisions = (self.segment_samples + 1) as f64;
        for i in 1..=self.segment_samples {
            let p = a.lerp(b, i as f64 / divisions);
            if !self.is_valid(&p) {
                trace!("[Collision] segment {} -> {} blocked at {}", a, b, p);
                return false;
            }
        }
        true
    }
}
