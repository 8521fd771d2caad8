//! Tree planner configuration.

use serde::{Deserialize, Serialize};

use super::defaults;
use super::error::ConfigError;
use crate::core::Point;

/// Which tree planner to run
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlannerVariant {
    /// Asymptotically optimal: parent choice, rewiring, keeps improving
    RrtStar,
    /// Plain RRT: attach to nearest, stop at the first goal connection
    Rrt,
}

/// Nearest-neighbour structure backing the tree
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexKind {
    /// Linear scan over all nodes
    Linear,
    /// R-tree (rstar)
    #[serde(rename = "rtree")]
    RTree,
}

/// Tree planner configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Iteration budget (>= 1)
    #[serde(default = "defaults::max_iterations")]
    pub max_iterations: usize,

    /// Maximum extension per iteration (> 0)
    #[serde(default = "defaults::step_size")]
    pub step_size: f64,

    /// Probability of sampling the goal exactly
    #[serde(default = "defaults::goal_sample_rate")]
    pub goal_sample_rate: f64,

    /// Probability of sampling around the current best path (once one exists)
    #[serde(default = "defaults::refine_sample_rate")]
    pub refine_sample_rate: f64,

    /// Fraction of the budget after which the goal is always sampled,
    /// provided a path already exists
    #[serde(default = "defaults::late_goal_phase")]
    pub late_goal_phase: f64,

    /// Margin added around the start/goal box for uniform sampling
    #[serde(default = "defaults::sampling_margin")]
    pub sampling_margin: f64,

    /// Rewiring radius constant `k` in `k * sqrt(ln(n+1)/(n+1))`
    #[serde(default = "defaults::neighbor_k")]
    pub neighbor_k: f64,

    /// Rewiring radius cap, as a multiple of `step_size`
    #[serde(default = "defaults::neighbor_cap_multiplier")]
    pub neighbor_cap_multiplier: f64,

    /// Iterations without goal-cost improvement before stopping early
    #[serde(default = "defaults::stagnation_limit")]
    pub stagnation_limit: usize,

    /// A node within this many step sizes of the goal may connect to it
    #[serde(default = "defaults::goal_radius_multiplier")]
    pub goal_radius_multiplier: f64,

    /// New nodes closer than this fraction of `step_size` to the tree are dropped
    #[serde(default = "defaults::min_separation_ratio")]
    pub min_separation_ratio: f64,

    /// Random seed
    #[serde(default = "defaults::seed")]
    pub seed: u64,

    /// Planner variant
    #[serde(default = "defaults::variant")]
    pub variant: PlannerVariant,

    /// Spatial index implementation
    #[serde(default = "defaults::index")]
    pub index: IndexKind,

    /// Accept start == goal (returns a one-point path)
    #[serde(default)]
    pub allow_start_equals_goal: bool,

    /// Per-axis weights for the cost breakdown in the result statistics
    #[serde(default = "defaults::axis_weights")]
    pub axis_weights: Vec<f64>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_iterations: defaults::max_iterations(),
            step_size: defaults::step_size(),
            goal_sample_rate: defaults::goal_sample_rate(),
            refine_sample_rate: defaults::refine_sample_rate(),
            late_goal_phase: defaults::late_goal_phase(),
            sampling_margin: defaults::sampling_margin(),
            neighbor_k: defaults::neighbor_k(),
            neighbor_cap_multiplier: defaults::neighbor_cap_multiplier(),
            stagnation_limit: defaults::stagnation_limit(),
            goal_radius_multiplier: defaults::goal_radius_multiplier(),
            min_separation_ratio: defaults::min_separation_ratio(),
            seed: defaults::seed(),
            variant: defaults::variant(),
            index: defaults::index(),
            allow_start_equals_goal: false,
            axis_weights: defaults::axis_weights(),
        }
    }
}

impl PlannerConfig {
    /// Set the iteration budget
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the step size
    pub fn with_step_size(mut self, step_size: f64) -> Self {
        self.step_size = step_size;
        self
    }

    /// Set the seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the planner variant
    pub fn with_variant(mut self, variant: PlannerVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Set the spatial index
    pub fn with_index(mut self, index: IndexKind) -> Self {
        self.index = index;
        self
    }

    /// Set the stagnation limit
    pub fn with_stagnation_limit(mut self, limit: usize) -> Self {
        self.stagnation_limit = limit;
        self
    }

    /// Radius within which a new node may connect to the goal
    pub fn goal_radius(&self) -> f64 {
        self.step_size * self.goal_radius_multiplier
    }

    /// Distance below which a new node counts as a duplicate
    pub fn min_separation(&self) -> f64 {
        self.step_size * self.min_separation_ratio
    }

    /// Iteration after which the goal is always sampled (once a path exists)
    pub fn late_phase_start(&self) -> f64 {
        self.max_iterations as f64 * self.late_goal_phase
    }

    /// Validate parameter ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_iterations == 0 {
            return Err(ConfigError::ZeroIterations);
        }
        if !(self.step_size > 0.0) || !self.step_size.is_finite() {
            return Err(ConfigError::NonPositiveStepSize(self.step_size));
        }
        if self.stagnation_limit == 0 {
            return Err(ConfigError::ZeroStagnationLimit);
        }

        for (name, value) in [
            ("goal_sample_rate", self.goal_sample_rate),
            ("refine_sample_rate", self.refine_sample_rate),
            ("late_goal_phase", self.late_goal_phase),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidProbability { name, value });
            }
        }
        if self.goal_sample_rate + self.refine_sample_rate > 1.0 {
            return Err(ConfigError::ProbabilitiesExceedOne {
                goal: self.goal_sample_rate,
                refine: self.refine_sample_rate,
            });
        }

        for (name, value) in [
            ("neighbor_k", self.neighbor_k),
            ("neighbor_cap_multiplier", self.neighbor_cap_multiplier),
            ("goal_radius_multiplier", self.goal_radius_multiplier),
        ] {
            if !(value > 0.0) || !value.is_finite() {
                return Err(ConfigError::NonPositive { name, value });
            }
        }

        for (name, value) in [
            ("sampling_margin", self.sampling_margin),
            ("min_separation_ratio", self.min_separation_ratio),
        ] {
            if !(value >= 0.0) || !value.is_finite() {
                return Err(ConfigError::Negative { name, value });
            }
        }
        for &value in &self.axis_weights {
            if !(value >= 0.0) || !value.is_finite() {
                return Err(ConfigError::Negative {
                    name: "axis_weights",
                    value,
                });
            }
        }

        Ok(())
    }

    /// Validate the parameters together with a concrete query.
    pub fn validate_query<const D: usize>(
        &self,
        start: &Point<D>,
        goal: &Point<D>,
    ) -> Result<(), ConfigError> {
        self.validate()?;

        if !start.is_finite() {
            return Err(ConfigError::NonFinitePoint("start"));
        }
        if !goal.is_finite() {
            return Err(ConfigError::NonFinitePoint("goal"));
        }
        if start == goal && !self.allow_start_equals_goal {
            return Err(ConfigError::StartEqualsGoal);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Point2;

    #[test]
    fn test_defaults_are_valid() {
        let config = PlannerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.goal_sample_rate, 0.2);
        assert_eq!(config.refine_sample_rate, 0.6);
        assert_eq!(config.neighbor_k, 15.0);
        assert_eq!(config.neighbor_cap_multiplier, 5.0);
        assert_eq!(config.stagnation_limit, 500);
        assert!((config.goal_radius() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_bad_step_size() {
        for step in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let config = PlannerConfig::default().with_step_size(step);
            assert!(matches!(
                config.validate(),
                Err(ConfigError::NonPositiveStepSize(_))
            ));
        }
    }

    #[test]
    fn test_rejects_zero_budgets() {
        let config = PlannerConfig::default().with_max_iterations(0);
        assert_eq!(config.validate(), Err(ConfigError::ZeroIterations));

        let config = PlannerConfig::default().with_stagnation_limit(0);
        assert_eq!(config.validate(), Err(ConfigError::ZeroStagnationLimit));
    }

    #[test]
    fn test_rejects_bad_probabilities() {
        let config = PlannerConfig {
            goal_sample_rate: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidProbability {
                name: "goal_sample_rate",
                ..
            })
        ));

        let config = PlannerConfig {
            goal_sample_rate: 0.7,
            refine_sample_rate: 0.5,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ProbabilitiesExceedOne { .. })
        ));
    }

    #[test]
    fn test_rejects_non_positive_radius_params() {
        let config = PlannerConfig {
            neighbor_k: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositive {
                name: "neighbor_k",
                ..
            })
        ));
    }

    #[test]
    fn test_query_validation() {
        let config = PlannerConfig::default();
        let a = Point2::new(1.0, 1.0);
        assert_eq!(
            config.validate_query(&a, &a),
            Err(ConfigError::StartEqualsGoal)
        );

        let config = PlannerConfig {
            allow_start_equals_goal: true,
            ..Default::default()
        };
        assert!(config.validate_query(&a, &a).is_ok());

        let bad = Point2::new(f64::NAN, 0.0);
        assert_eq!(
            config.validate_query(&bad, &a),
            Err(ConfigError::NonFinitePoint("start"))
        );

        // Short weight lists only affect the cost breakdown
        let config = PlannerConfig {
            axis_weights: vec![1.0],
            ..Default::default()
        };
        assert!(config.validate_query(&a, &Point2::new(2.0, 2.0)).is_ok());
    }

    #[test]
    fn test_variant_serde_names() {
        let yaml = "variant: rrt\nindex: linear\n";
        let config: PlannerConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.variant, PlannerVariant::Rrt);
        assert_eq!(config.index, IndexKind::Linear);
        assert_eq!(config.max_iterations, 500);
    }
}
