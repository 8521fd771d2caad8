//! Error types for vastu-plan

use thiserror::Error;

use crate::config::ConfigError;

/// Errors raised before a planning run starts.
///
/// Not finding a path is not an error: it is reported through
/// [`PlanningResult::failure`](crate::PlanningResult).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlanError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, PlanError>;
