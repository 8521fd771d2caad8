//! File formats read by the command-line driver.
//!
//! Planning scenarios are plain [`PlanConfig`](crate::config::PlanConfig)
//! YAML files. Graphs for A* use [`GraphFile`]:
//!
//! ```yaml
//! weights: [1.0, 1.0, 0.5]   # optional, one per cost criterion
//! nodes:                     # optional positions
//!   A: [0.0, 0.0]
//!   B: [4.0, 3.0]
//! edges:
//!   - { from: A, to: B, costs: [5.0, 2.0, 1.0] }
//! ```

mod graph_file;

pub use graph_file::{EdgeSpec, GraphFile};

use thiserror::Error;

use crate::graph::GraphError;

/// Errors loading a driver input file
#[derive(Error, Debug)]
pub enum ScenarioError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid graph: {0}")]
    Graph(#[from] GraphError),
}
