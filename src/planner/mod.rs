//! Sampling-based tree planner (RRT* and plain RRT).
//!
//! Each iteration draws a sample, extends the nearest tree node towards it
//! by at most `step_size`, attaches the new node to the cheapest reachable
//! neighbour and (for RRT*) rewires the neighbourhood through it. Any node
//! that lands within `goal_radius_multiplier * step_size` of the goal and
//! can see it becomes a goal candidate; [`TerminationPolicy`] decides when
//! the best candidate is good enough.
//!
//! # Example
//!
//! ```rust
//! use vastu_plan::config::PlannerConfig;
//! use vastu_plan::core::Point2;
//! use vastu_plan::planner::plan;
//!
//! let config = PlannerConfig::default().with_max_iterations(1000);
//! let result = plan(Point2::new(0.0, 0.0), Point2::new(5.0, 0.0), &config).unwrap();
//! assert!(result.is_success());
//! assert!(result.cost >= 5.0);
//! ```

mod extract;
mod termination;

pub use extract::{ExtractedPath, PathExtractor, record_path_stats};
pub use termination::TerminationPolicy;

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use log::{debug, info, trace};

use crate::collision::{CollisionOracle, FreeSpace};
use crate::config::{PlannerConfig, PlannerVariant};
use crate::core::{Point, steer};
use crate::error::Result;
use crate::result::{PathFailure, PlanStats, PlanningResult, SearchState};
use crate::sampling::Sampler;
use crate::tree::{NodeId, RewireEngine, SpatialIndex, Tree, build_index, neighbor_radius};

/// Tree planner over a `D`-dimensional configuration space
pub struct RrtStarPlanner<const D: usize> {
    config: PlannerConfig,
    oracle: Box<dyn CollisionOracle<D>>,
}

impl<const D: usize> RrtStarPlanner<D> {
    /// Create a planner; fails if `config` is invalid.
    pub fn new(config: PlannerConfig, oracle: impl CollisionOracle<D> + 'static) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            oracle: Box::new(oracle),
        })
    }

    /// Planner for an obstacle-free space
    pub fn free_space(config: PlannerConfig) -> Result<Self> {
        Self::new(config, FreeSpace)
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Plan from `start` to `goal`, running until a terminal state
    pub fn plan(&self, start: Point<D>, goal: Point<D>) -> Result<PlanningResult<Point<D>>> {
        self.plan_with_cancel(start, goal, None)
    }

    /// Like [`plan`](Self::plan), also stopping once `cancel` is raised.
    ///
    /// The flag is polled once per iteration.
    pub fn plan_with_cancel(
        &self,
        start: Point<D>,
        goal: Point<D>,
        cancel: Option<&AtomicBool>,
    ) -> Result<PlanningResult<Point<D>>> {
        let mut run = self.begin(start, goal)?;

        while !run.state().is_terminal() {
            if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                run.cancel();
                break;
            }
            run.step();
        }

        Ok(run.finish())
    }

    /// Start a run that the caller drives with [`PlannerRun::step`]
    pub fn begin(&self, start: Point<D>, goal: Point<D>) -> Result<PlannerRun<'_, D>> {
        self.config.validate_query(&start, &goal)?;
        Ok(PlannerRun::new(self, start, goal))
    }
}

/// Plan in free space with the given configuration
pub fn plan<const D: usize>(
    start: Point<D>,
    goal: Point<D>,
    config: &PlannerConfig,
) -> Result<PlanningResult<Point<D>>> {
    RrtStarPlanner::free_space(config.clone())?.plan(start, goal)
}

/// State of one planning run.
///
/// Owns the tree, the spatial index and the random generator; nothing is
/// shared between runs.
pub struct PlannerRun<'p, const D: usize> {
    planner: &'p RrtStarPlanner<D>,
    goal: Point<D>,
    tree: Tree<D>,
    index: Box<dyn SpatialIndex<D>>,
    sampler: Sampler<D>,
    policy: TerminationPolicy,
    goal_parent: Option<NodeId>,
    best_path: Vec<Point<D>>,
    blocked: Option<PathFailure>,
    cancelled: bool,
    iteration: usize,
    stats: PlanStats,
    started: Instant,
}

impl<'p, const D: usize> PlannerRun<'p, D> {
    fn new(planner: &'p RrtStarPlanner<D>, start: Point<D>, goal: Point<D>) -> Self {
        let config = &planner.config;
        let tree = Tree::new(start);
        let mut index = build_index::<D>(config.index);
        index.insert(tree.root(), start);

        debug!(
            "[RRT*] planning {} -> {} ({:?}, {} iterations, step {:.3})",
            start, goal, config.variant, config.max_iterations, config.step_size
        );

        let blocked = if !planner.oracle.is_valid(&start) {
            debug!("[RRT*] FAILED: start {} is blocked", start);
            Some(PathFailure::StartBlocked)
        } else if !planner.oracle.is_valid(&goal) {
            debug!("[RRT*] FAILED: goal {} is blocked", goal);
            Some(PathFailure::GoalBlocked)
        } else {
            None
        };

        let mut run = Self {
            planner,
            goal,
            tree,
            index,
            sampler: Sampler::new(&start, &goal, config),
            policy: TerminationPolicy::new(config),
            goal_parent: None,
            best_path: Vec::new(),
            blocked,
            cancelled: false,
            iteration: 0,
            stats: PlanStats::default(),
            started: Instant::now(),
        };

        if run.blocked.is_none() {
            let root = run.tree.root();
            run.try_connect_goal(0, root);
        }
        run
    }

    /// Current state
    pub fn state(&self) -> SearchState {
        if self.blocked.is_some() {
            SearchState::Exhausted
        } else {
            self.policy.state()
        }
    }

    /// Completed iterations
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    pub fn tree(&self) -> &Tree<D> {
        &self.tree
    }

    /// Best goal cost so far (`INFINITY` while searching)
    pub fn best_cost(&self) -> f64 {
        self.policy.best_cost()
    }

    /// Best path so far (empty while searching)
    pub fn best_path(&self) -> &[Point<D>] {
        &self.best_path
    }

    /// Stop at the current iteration boundary
    pub fn cancel(&mut self) {
        self.cancelled = true;
        self.policy.cancel();
    }

    /// Run one iteration and return the resulting state
    pub fn step(&mut self) -> SearchState {
        if self.state().is_terminal() {
            return self.state();
        }

        self.iteration += 1;
        let iteration = self.iteration;
        self.stats.iterations = iteration;

        if let Some(new_node) = self.extend(iteration) {
            self.refresh_goal_cost(iteration);
            self.try_connect_goal(iteration, new_node);
        }

        self.policy.end_iteration(iteration)
    }

    /// Grow the tree towards one sample. Returns the inserted node.
    fn extend(&mut self, iteration: usize) -> Option<NodeId> {
        let planner = self.planner;
        let config = &planner.config;

        let best = if self.best_path.is_empty() {
            None
        } else {
            Some(self.best_path.as_slice())
        };
        let sample = self.sampler.sample(iteration, best);

        let (nearest, _) = self.index.nearest(&sample)?;
        let nearest_position = self.tree.position(nearest);
        let candidate = steer(&nearest_position, &sample, config.step_size);

        if let Some((_, clearance)) = self.index.nearest(&candidate) {
            if clearance < config.min_separation() {
                self.stats.rejected_duplicate += 1;
                return None;
            }
        }

        if !planner.oracle.is_valid(&candidate) {
            trace!("[RRT*] sample {} in collision", candidate);
            self.stats.rejected_collision += 1;
            return None;
        }

        self.stats.nodes_expanded += 1;
        let new_node = match config.variant {
            PlannerVariant::Rrt => {
                if !planner.oracle.is_valid_segment(&nearest_position, &candidate) {
                    self.stats.rejected_collision += 1;
                    return None;
                }
                self.tree.insert(candidate, nearest)
            }
            PlannerVariant::RrtStar => {
                let radius = neighbor_radius(
                    self.tree.len(),
                    config.neighbor_k,
                    config.step_size,
                    config.neighbor_cap_multiplier,
                );
                let neighbors: Vec<NodeId> = self
                    .index
                    .within_radius(&candidate, radius)
                    .into_iter()
                    .map(|(id, _)| id)
                    .collect();

                let engine = RewireEngine::new(planner.oracle.as_ref());
                let Some(attachment) =
                    engine.choose_parent(&self.tree, &candidate, nearest, &neighbors)
                else {
                    self.stats.rejected_collision += 1;
                    return None;
                };

                let id = self.tree.insert(candidate, attachment.parent);
                let outcome = engine.rewire(&mut self.tree, id, &neighbors);
                self.stats.rewires += outcome.rewired;
                id
            }
        };

        self.index.insert(new_node, candidate);
        self.stats.nodes_generated += 1;
        Some(new_node)
    }

    /// Re-read the cost of the adopted goal connection after rewiring
    fn refresh_goal_cost(&mut self, iteration: usize) {
        let Some(goal_parent) = self.goal_parent else {
            return;
        };
        let current = PathExtractor::new(&self.tree).goal_cost(goal_parent, &self.goal);
        if self.policy.refresh(iteration, current) {
            self.update_best_path(goal_parent);
        }
    }

    fn try_connect_goal(&mut self, iteration: usize, node: NodeId) {
        let planner = self.planner;
        let position = self.tree.position(node);
        let link = position.distance(&self.goal);
        if link > planner.config.goal_radius() {
            return;
        }
        if !planner.oracle.is_valid_segment(&position, &self.goal) {
            return;
        }

        let cost = self.tree.cost(node) + link;
        if self.policy.offer(iteration, cost) {
            self.goal_parent = Some(node);
            self.update_best_path(node);
        }
    }

    fn update_best_path(&mut self, goal_parent: NodeId) {
        self.best_path = PathExtractor::new(&self.tree)
            .extract(goal_parent, &self.goal)
            .points;
    }

    /// Consume the run and build the result
    pub fn finish(mut self) -> PlanningResult<Point<D>> {
        self.stats.state = self.state();
        self.stats.goal_improvements = self.policy.improvements();
        self.stats.duration = self.started.elapsed();

        debug_assert!(self.tree.validate(1e-9).is_ok());

        if let Some(reason) = self.blocked {
            return PlanningResult::failed(reason, self.stats);
        }

        let extractor = PathExtractor::new(&self.tree);
        let search_tree = extractor.search_tree();

        let Some(goal_parent) = self.goal_parent else {
            let reason = if self.cancelled {
                PathFailure::Cancelled
            } else {
                PathFailure::NoPath
            };
            info!(
                "[RRT*] no path after {} iterations ({} nodes)",
                self.iteration,
                self.tree.len()
            );
            return PlanningResult::failed(reason, self.stats).with_search_tree(search_tree);
        };

        let path = extractor.extract(goal_parent, &self.goal);
        record_path_stats(&mut self.stats, &path.points, &self.planner.config.axis_weights);

        info!(
            "[RRT*] path found: cost {:.3}, {} waypoints, {} iterations, {} nodes, {} rewires ({})",
            path.cost,
            path.points.len(),
            self.iteration,
            self.tree.len(),
            self.stats.rewires,
            self.stats.state
        );

        PlanningResult {
            path: path.points,
            cost: path.cost,
            failure: None,
            search_tree,
            stats: self.stats,
        }
    }
}
