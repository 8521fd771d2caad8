//! Candidate configuration sampling.
//!
//! Three modes, chosen with one uniform draw per call:
//!
//! | Mode | When |
//! |------|------|
//! | Goal | late phase with a path, or `u < goal_sample_rate` |
//! | Refine | a path exists and `u < goal_sample_rate + refine_sample_rate` |
//! | Uniform | everything else |
//!
//! Refinement perturbs a random waypoint of the current best path with
//! Gaussian noise of standard deviation `step_size / 2`.

mod noise;

pub use noise::NoiseGenerator;

use crate::config::PlannerConfig;
use crate::core::{Bounds, Point};

/// Which mode produced a sample
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SampleMode {
    /// The goal itself
    Goal,
    /// Perturbation around the current best path
    Refine,
    /// Uniform over the sampling bounds
    Uniform,
}

/// Seeded sampler over a bounded region
#[derive(Clone, Debug)]
pub struct Sampler<const D: usize> {
    goal: Point<D>,
    bounds: Bounds<D>,
    goal_rate: f64,
    refine_rate: f64,
    late_phase_start: f64,
    refine_stddev: f64,
    noise: NoiseGenerator,
}

impl<const D: usize> Sampler<D> {
    /// Create a sampler for one start/goal query.
    pub fn new(start: &Point<D>, goal: &Point<D>, config: &PlannerConfig) -> Self {
        let bounds = Bounds::from_corners(start, goal).expanded(config.sampling_margin);
        Self {
            goal: *goal,
            bounds,
            goal_rate: config.goal_sample_rate,
            refine_rate: config.refine_sample_rate,
            late_phase_start: config.late_phase_start(),
            refine_stddev: config.step_size / 2.0,
            noise: NoiseGenerator::new(config.seed),
        }
    }

    /// Region used by uniform sampling
    pub fn bounds(&self) -> &Bounds<D> {
        &self.bounds
    }

    /// Draw a sample.
    ///
    /// `best_path` is the current best start-to-goal path, if any.
    pub fn sample(&mut self, iteration: usize, best_path: Option<&[Point<D>]>) -> Point<D> {
        self.sample_with_mode(iteration, best_path).0
    }

    /// Draw a sample and report which mode produced it.
    pub fn sample_with_mode(
        &mut self,
        iteration: usize,
        best_path: Option<&[Point<D>]>,
    ) -> (Point<D>, SampleMode) {
        let path = best_path.filter(|p| !p.is_empty());

        if path.is_some() && iteration as f64 > self.late_phase_start {
            return (self.goal, SampleMode::Goal);
        }

        let u = self.noise.unit();
        if u < self.goal_rate {
            return (self.goal, SampleMode::Goal);
        }

        if let Some(path) = path {
            if u < self.goal_rate + self.refine_rate {
                return (self.refine_around(path), SampleMode::Refine);
            }
        }

        (self.uniform(), SampleMode::Uniform)
    }

    fn refine_around(&mut self, path: &[Point<D>]) -> Point<D> {
        let anchor = path[self.noise.index(path.len())];
        let mut coords = anchor.to_array();
        for c in coords.iter_mut() {
            *c += self.noise.gaussian(self.refine_stddev);
        }
        Point::from_array(coords)
    }

    fn uniform(&mut self) -> Point<D> {
        let mut coords = [0.0; D];
        for (axis, c) in coords.iter_mut().enumerate() {
            *c = self
                .noise
                .uniform(self.bounds.min[axis], self.bounds.max[axis]);
        }
        Point::from_array(coords)
    }
}
