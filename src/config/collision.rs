//! Collision configuration section.

use serde::{Deserialize, Serialize};

use super::defaults;
use super::error::ConfigError;
use crate::collision::{Obstacle, ObstacleField};
use crate::core::Point;

/// One obstacle as written in a config file
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObstacleSpec {
    /// Centre coordinates (2 or 3 values)
    pub center: Vec<f64>,
    /// Radius
    pub radius: f64,
}

/// Collision checking section
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CollisionSection {
    /// Clearance added to every obstacle radius
    #[serde(default = "defaults::collision_margin")]
    pub margin: f64,

    /// Interior samples per segment check
    #[serde(default = "defaults::segment_samples")]
    pub segment_samples: usize,

    /// Static obstacles
    #[serde(default)]
    pub obstacles: Vec<ObstacleSpec>,
}

impl Default for CollisionSection {
    fn default() -> Self {
        Self {
            margin: defaults::collision_margin(),
            segment_samples: defaults::segment_samples(),
            obstacles: Vec::new(),
        }
    }
}

impl CollisionSection {
    /// True when no obstacles are configured
    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    /// Build an obstacle field for a `D`-dimensional space.
    pub fn to_field<const D: usize>(&self) -> Result<ObstacleField<D>, ConfigError> {
        if !(self.margin >= 0.0) || !self.margin.is_finite() {
            return Err(ConfigError::Negative {
                name: "collision.margin",
                value: self.margin,
            });
        }

        let mut obstacles = Vec::with_capacity(self.obstacles.len());
        for (index, spec) in self.obstacles.iter().enumerate() {
            let center =
                Point::<D>::from_slice(&spec.center).ok_or(ConfigError::ObstacleDimension {
                    index,
                    expected: D,
                    got: spec.center.len(),
                })?;
            if !(spec.radius >= 0.0) || !spec.radius.is_finite() {
                return Err(ConfigError::Negative {
                    name: "obstacle.radius",
                    value: spec.radius,
                });
            }
            obstacles.push(Obstacle::new(center, spec.radius));
        }

        Ok(ObstacleField::new(obstacles)
            .with_margin(self.margin)
            .with_segment_samples(self.segment_samples))
    }
}
