//! Test utilities for planner integration tests.

#![allow(dead_code)]

use vastu_plan::collision::{Obstacle, ObstacleField};
use vastu_plan::config::PlannerConfig;
use vastu_plan::core::{Point, Point2};

/// Straight-line benchmark: start (0,0), goal (10,0)
pub fn line_endpoints() -> (Point2, Point2) {
    (Point2::new(0.0, 0.0), Point2::new(10.0, 0.0))
}

/// Default configuration with a given seed and budget
pub fn config(seed: u64, max_iterations: usize) -> PlannerConfig {
    PlannerConfig::default()
        .with_seed(seed)
        .with_max_iterations(max_iterations)
}

/// One disc sitting on the midpoint of the (0,0)-(10,0) line
pub fn midpoint_block(radius: f64, margin: f64) -> ObstacleField<2> {
    ObstacleField::new(vec![Obstacle::new(Point2::new(5.0, 0.0), radius)]).with_margin(margin)
}

/// Exact distance from `p` to the segment `a`-`b`
pub fn segment_distance<const D: usize>(p: &Point<D>, a: &Point<D>, b: &Point<D>) -> f64 {
    let ab = *b - *a;
    let len2 = ab.length() * ab.length();
    if len2 == 0.0 {
        return p.distance(a);
    }
    let ap = *p - *a;
    let dot: f64 = (0..D).map(|i| ap[i] * ab[i]).sum();
    let t = (dot / len2).clamp(0.0, 1.0);
    p.distance(&a.lerp(b, t))
}

/// Smallest clearance between a polyline and a disc centre, minus its radius
pub fn path_clearance<const D: usize>(path: &[Point<D>], center: &Point<D>, radius: f64) -> f64 {
    path.windows(2)
        .map(|w| segment_distance(center, &w[0], &w[1]) - radius)
        .fold(f64::INFINITY, f64::min)
}

/// Sum of segment lengths
pub fn polyline_length<const D: usize>(path: &[Point<D>]) -> f64 {
    path.windows(2).map(|w| w[0].distance(&w[1])).sum()
}
