//! Core geometric types for the planners.
//!
//! - [`Point`], [`Point2`], [`Point3`]: configuration space coordinates
//! - [`steer`] and [`distance`]: the metric and bounded motion toward a target
//! - [`Bounds`]: sampling region

mod geometry;
mod point;

pub use geometry::{Bounds, distance, steer};
pub use point::{Point, Point2, Point3};
