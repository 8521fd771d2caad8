//! # Vastu-Plan: Path Planning in Continuous and Graph Spaces
//!
//! Two planners sharing one result shape:
//!
//! - **RRT\***: grows a tree of collision-free configurations from the start
//!   and keeps improving the path to the goal by rewiring
//! - **A\***: exact best-first search over an explicit weighted graph
//!
//! ## Quick Start
//!
//! ```rust
//! use vastu_plan::collision::{Obstacle, ObstacleField};
//! use vastu_plan::config::PlannerConfig;
//! use vastu_plan::core::Point2;
//! use vastu_plan::planner::RrtStarPlanner;
//!
//! let obstacles = ObstacleField::new(vec![Obstacle::new(Point2::new(5.0, 0.0), 1.5)]);
//! let config = PlannerConfig::default().with_max_iterations(2000).with_seed(7);
//! let planner = RrtStarPlanner::new(config, obstacles).unwrap();
//!
//! let result = planner.plan(Point2::new(0.0, 0.0), Point2::new(10.0, 0.0)).unwrap();
//! if result.is_success() {
//!     println!("cost {:.2} through {} waypoints", result.cost, result.path.len());
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`core`]: `Point<D>`, distance, steering, bounds
//! - [`collision`]: validity checks against circular/spherical obstacles
//! - [`sampling`]: seeded goal / refinement / uniform sampler
//! - [`tree`]: node arena, spatial indexes, RRT* rewiring
//! - [`planner`]: the iteration loop, termination policy and path extraction
//! - [`graph`]: weighted graphs, heuristics and A*
//! - [`config`]: YAML configuration
//! - [`io`]: graph files for the command-line driver
//!
//! ## Iteration
//!
//! ```text
//!   Sampler ──▶ nearest ──▶ steer ──▶ duplicate / collision checks
//!                                            │
//!                                            ▼
//!   TerminationPolicy ◀── goal check ◀── choose parent + rewire
//! ```
//!
//! Runs are deterministic for a given seed: the random generator is owned by
//! the run, and every tie (nearest neighbour, parent choice, frontier order)
//! is broken by insertion order.

pub mod collision;
pub mod config;
pub mod core;
pub mod error;
pub mod graph;
pub mod io;
pub mod planner;
pub mod result;
pub mod sampling;
pub mod tree;

pub use collision::{CollisionOracle, FreeSpace, Obstacle, ObstacleField};
pub use config::{PlanConfig, PlannerConfig, PlannerVariant};
pub use crate::core::{Point, Point2, Point3};
pub use error::{PlanError, Result};
pub use graph::{Graph, GraphError, Heuristic};
pub use planner::{RrtStarPlanner, plan};
pub use result::{CostBreakdown, PathFailure, PlanStats, PlanningResult, SearchState, TreeEdge};
