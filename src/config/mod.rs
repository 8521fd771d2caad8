//! Configuration for the planners.
//!
//! All settings can be loaded from a single YAML file; every field has a
//! default, so partial files are fine.
//!
//! ## Example YAML
//!
//! ```yaml
//! planner:
//!   max_iterations: 2000
//!   step_size: 1.0
//!   goal_sample_rate: 0.2
//!   neighbor_k: 15.0
//!   stagnation_limit: 500
//!   seed: 42
//!   variant: rrt_star      # or rrt
//!   index: rtree           # or linear
//!
//! collision:
//!   margin: 0.5
//!   segment_samples: 10
//!   obstacles:
//!     - center: [5.0, 0.0]
//!       radius: 2.0
//! ```

mod collision;
mod defaults;
mod error;
mod plan;
mod planner;

pub use collision::{CollisionSection, ObstacleSpec};
pub use error::{ConfigError, ConfigLoadError};
pub use plan::{DEFAULT_CONFIG_PATH, PlanConfig};
pub use planner::{IndexKind, PlannerConfig, PlannerVariant};
