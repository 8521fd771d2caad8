//! Configuration errors.

use thiserror::Error;

/// Invalid planner configuration, detected before any iteration runs
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Step size must be strictly positive
    #[error("step_size must be > 0, got {0}")]
    NonPositiveStepSize(f64),

    /// Iteration budget must be at least one
    #[error("max_iterations must be >= 1")]
    ZeroIterations,

    /// Stagnation window must be at least one
    #[error("stagnation_limit must be >= 1")]
    ZeroStagnationLimit,

    /// A probability outside [0, 1]
    #[error("{name} must be within [0, 1], got {value}")]
    InvalidProbability {
        /// Parameter name
        name: &'static str,
        /// Offending value
        value: f64,
    },

    /// Goal and refinement probabilities leave negative room for uniform sampling
    #[error("goal_sample_rate + refine_sample_rate must be <= 1, got {goal} + {refine}")]
    ProbabilitiesExceedOne {
        /// Goal sampling probability
        goal: f64,
        /// Refinement sampling probability
        refine: f64,
    },

    /// A parameter that must be strictly positive
    #[error("{name} must be > 0, got {value}")]
    NonPositive {
        /// Parameter name
        name: &'static str,
        /// Offending value
        value: f64,
    },

    /// A parameter that must be finite and non-negative
    #[error("{name} must be finite and >= 0, got {value}")]
    Negative {
        /// Parameter name
        name: &'static str,
        /// Offending value
        value: f64,
    },

    /// Start and goal coincide and that was not allowed
    #[error("start and goal are the same point")]
    StartEqualsGoal,

    /// Start or goal has a NaN or infinite coordinate
    #[error("{0} has a non-finite coordinate")]
    NonFinitePoint(&'static str),

    /// Obstacle centre has the wrong number of coordinates
    #[error("obstacle {index} has {got} coordinates, expected {expected}")]
    ObstacleDimension {
        /// Obstacle position in the list
        index: usize,
        /// Planning dimension
        expected: usize,
        /// Number of coordinates supplied
        got: usize,
    },
}

/// Config load error
#[derive(Debug, Clone)]
pub enum ConfigLoadError {
    /// I/O error
    Io(String),
    /// Parse error
    Parse(String),
    /// Loaded values failed validation
    Invalid(ConfigError),
}

impl std::fmt::Display for ConfigLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigLoadError::Io(msg) => write!(f, "IO error: {}", msg),
            ConfigLoadError::Parse(msg) => write!(f, "Parse error: {}", msg),
            ConfigLoadError::Invalid(e) => write!(f, "Invalid config: {}", e),
        }
    }
}

impl std::error::Error for ConfigLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigLoadError::Invalid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for ConfigLoadError {
    fn from(err: ConfigError) -> Self {
        ConfigLoadError::Invalid(err)
    }
}
