//! Result types shared by the tree planner and graph search.

use std::fmt;
use std::time::Duration;

use crate::core::Point;

/// Phase of a planning run
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SearchState {
    /// No path to the goal yet
    #[default]
    Searching,
    /// A path exists and is still being improved
    GoalFound,
    /// The best path has not improved for the configured number of iterations
    Stable,
    /// Budget consumed or run cancelled
    Exhausted,
}

impl SearchState {
    /// Check if the run has stopped
    pub fn is_terminal(self) -> bool {
        matches!(self, SearchState::Stable | SearchState::Exhausted)
    }
}

impl fmt::Display for SearchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SearchState::Searching => "searching",
            SearchState::GoalFound => "goal found",
            SearchState::Stable => "stable",
            SearchState::Exhausted => "exhausted",
        };
        f.write_str(name)
    }
}

/// Reason a run produced no path
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PathFailure {
    /// Start configuration is in collision
    StartBlocked,
    /// Goal configuration is in collision
    GoalBlocked,
    /// Start node is not part of the graph
    StartUnknown,
    /// Goal node is not part of the graph
    GoalUnknown,
    /// Search finished without reaching the goal
    NoPath,
    /// Graph search hit its expansion cap
    MaxExpansionsExceeded,
    /// Cancellation flag raised before a path was found
    Cancelled,
}

impl fmt::Display for PathFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            PathFailure::StartBlocked => "start is blocked",
            PathFailure::GoalBlocked => "goal is blocked",
            PathFailure::StartUnknown => "start node not in graph",
            PathFailure::GoalUnknown => "goal node not in graph",
            PathFailure::NoPath => "no path found",
            PathFailure::MaxExpansionsExceeded => "expansion limit reached",
            PathFailure::Cancelled => "cancelled",
        };
        f.write_str(msg)
    }
}

/// One parent→child edge of the explored structure
#[derive(Clone, Debug, PartialEq)]
pub struct TreeEdge<T> {
    pub parent: T,
    pub child: T,
}

/// Per-axis decomposition of a path.
///
/// `axis_deltas[i]` is the summed absolute displacement along axis `i`;
/// `weighted_total` is `sum(weights[i] * axis_deltas[i])`.
#[derive(Clone, Debug, PartialEq)]
pub struct CostBreakdown {
    pub axis_deltas: Vec<f64>,
    pub weights: Vec<f64>,
    pub weighted_total: f64,
}

impl CostBreakdown {
    /// Decompose `path` using the first `D` entries of `weights`.
    ///
    /// Missing weights count as 1.
    pub fn from_path<const D: usize>(path: &[Point<D>], weights: &[f64]) -> Self {
        let mut axis_deltas = vec![0.0; D];
        for pair in path.windows(2) {
            for (acc, delta) in axis_deltas.iter_mut().zip(pair[0].abs_delta(&pair[1])) {
                *acc += delta;
            }
        }

        let weights: Vec<f64> = (0..D)
            .map(|axis| weights.get(axis).copied().unwrap_or(1.0))
            .collect();
        let weighted_total = axis_deltas
            .iter()
            .zip(&weights)
            .map(|(d, w)| d * w)
            .sum();

        Self {
            axis_deltas,
            weights,
            weighted_total,
        }
    }
}

/// Run statistics. Purely observational.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlanStats {
    /// Iterations (tree planner) or heap pops (graph search) performed
    pub iterations: usize,
    /// Nodes added to the tree, or pushed onto the A* frontier
    pub nodes_generated: usize,
    /// Nodes whose neighbourhood was evaluated
    pub nodes_expanded: usize,
    /// Successful rewires
    pub rewires: usize,
    /// Times the best goal cost strictly decreased
    pub goal_improvements: usize,
    /// Samples dropped because the new node or its connection collided
    pub rejected_collision: usize,
    /// Samples dropped for being too close to an existing node
    pub rejected_duplicate: usize,
    /// Wall-clock time of the run
    pub duration: Duration,
    /// Number of nodes on the returned path
    pub path_nodes: usize,
    /// Euclidean length of the returned path (when positions are known)
    pub path_length: f64,
    /// Per-axis cost decomposition of the returned path
    pub breakdown: Option<CostBreakdown>,
    /// State the run finished in
    pub state: SearchState,
}

/// Outcome of a planning call
#[derive(Clone, Debug)]
pub struct PlanningResult<T> {
    /// Start-to-goal path; empty when none was found
    pub path: Vec<T>,
    /// Path cost; `f64::INFINITY` when none was found
    pub cost: f64,
    /// Why no path was returned
    pub failure: Option<PathFailure>,
    /// Explored structure, for renderers
    pub search_tree: Vec<TreeEdge<T>>,
    pub stats: PlanStats,
}

impl<T> PlanningResult<T> {
    /// Create a failed result
    pub fn failed(reason: PathFailure, stats: PlanStats) -> Self {
        Self {
            path: Vec::new(),
            cost: f64::INFINITY,
            failure: Some(reason),
            search_tree: Vec::new(),
            stats,
        }
    }

    /// Check if a path was found
    pub fn is_success(&self) -> bool {
        self.failure.is_none() && !self.path.is_empty()
    }

    /// Attach the explored structure
    pub fn with_search_tree(mut self, edges: Vec<TreeEdge<T>>) -> Self {
        self.search_tree = edges;
        self
    }
}

/// Euclidean length of a polyline
pub fn path_length<const D: usize>(path: &[Point<D>]) -> f64 {
    path.windows(2).map(|w| w[0].distance(&w[1])).sum()
}
