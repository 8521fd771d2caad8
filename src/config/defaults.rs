//! Default value functions for serde deserialization.

use super::planner::{IndexKind, PlannerVariant};

pub fn max_iterations() -> usize {
    500
}

pub fn step_size() -> f64 {
    1.0
}

pub fn goal_sample_rate() -> f64 {
    0.2
}

pub fn refine_sample_rate() -> f64 {
    0.6
}

pub fn late_goal_phase() -> f64 {
    0.7
}

pub fn sampling_margin() -> f64 {
    50.0
}

pub fn neighbor_k() -> f64 {
    15.0
}

pub fn neighbor_cap_multiplier() -> f64 {
    5.0
}

pub fn stagnation_limit() -> usize {
    500
}

pub fn goal_radius_multiplier() -> f64 {
    2.0
}

pub fn min_separation_ratio() -> f64 {
    0.1
}

pub fn seed() -> u64 {
    42
}

pub fn variant() -> PlannerVariant {
    PlannerVariant::RrtStar
}

pub fn index() -> IndexKind {
    IndexKind::RTree
}

/// Toll (x), distance (y), fuel (z)
pub fn axis_weights() -> Vec<f64> {
    vec![2.0, 1.0, 1.0]
}

pub fn collision_margin() -> f64 {
    0.0
}

pub fn segment_samples() -> usize {
    crate::collision::DEFAULT_SEGMENT_SAMPLES
}
