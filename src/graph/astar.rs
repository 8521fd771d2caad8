//! A* search over a [`Graph`].
//!
//! Frontier entries are ordered by `f = g + h`, ties by push order. A node
//! may sit in the frontier several times; entries whose `g` is worse than
//! the best known are skipped when popped.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::hash::Hash;
use std::time::Instant;

use log::{debug, trace};

use super::{Graph, Heuristic, euclidean};
use crate::result::{PathFailure, PlanStats, PlanningResult, SearchState, TreeEdge};

/// A* configuration
#[derive(Clone, Debug, Default)]
pub struct AStarConfig {
    /// Give up after this many node expansions (`None` = unlimited)
    pub max_expansions: Option<usize>,
}

impl AStarConfig {
    pub fn with_max_expansions(max_expansions: usize) -> Self {
        Self {
            max_expansions: Some(max_expansions),
        }
    }
}

/// Frontier entry
#[derive(Clone, Copy, Debug)]
struct FrontierEntry {
    slot: usize,
    g_cost: f64,
    f_cost: f64,
    seq: u64,
}

impl Eq for FrontierEntry {}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap behavior
        other
            .f_cost
            .total_cmp(&self.f_cost)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A* search bound to one graph and heuristic
pub struct AStarSearch<'a, N, H: ?Sized> {
    graph: &'a Graph<N>,
    heuristic: &'a H,
    config: AStarConfig,
}

impl<'a, N, H> AStarSearch<'a, N, H>
where
    N: Eq + Hash + Clone,
    H: Heuristic<N> + ?Sized,
{
    pub fn new(graph: &'a Graph<N>, heuristic: &'a H) -> Self {
        Self {
            graph,
            heuristic,
            config: AStarConfig::default(),
        }
    }

    pub fn with_config(mut self, config: AStarConfig) -> Self {
        self.config = config;
        self
    }

    /// Find the cheapest path from `start` to `goal`
    pub fn find_path(&self, start: &N, goal: &N) -> PlanningResult<N> {
        let started = Instant::now();
        let mut stats = PlanStats {
            state: SearchState::Exhausted,
            ..PlanStats::default()
        };

        let Some(start_slot) = self.graph.slot(start) else {
            debug!("[AStar] FAILED: StartUnknown");
            return PlanningResult::failed(PathFailure::StartUnknown, stats);
        };
        let Some(goal_slot) = self.graph.slot(goal) else {
            debug!("[AStar] FAILED: GoalUnknown");
            return PlanningResult::failed(PathFailure::GoalUnknown, stats);
        };

        trace!(
            "[AStar] search over {} nodes / {} edges",
            self.graph.node_count(),
            self.graph.edge_count()
        );

        let n = self.graph.node_count();
        let mut g_scores = vec![f64::INFINITY; n];
        let mut came_from: Vec<Option<usize>> = vec![None; n];
        let mut open_set = BinaryHeap::new();
        let mut seq: u64 = 0;

        g_scores[start_slot] = 0.0;
        open_set.push(FrontierEntry {
            slot: start_slot,
            g_cost: 0.0,
            f_cost: self.heuristic.estimate(self.graph, start, goal),
            seq,
        });
        stats.nodes_generated = 1;

        let mut outcome = None;
        while let Some(current) = open_set.pop() {
            stats.iterations += 1;

            if current.g_cost > g_scores[current.slot] {
                continue;
            }

            if current.slot == goal_slot {
                outcome = Some(current.g_cost);
                break;
            }

            if self
                .config
                .max_expansions
                .is_some_and(|cap| stats.nodes_expanded >= cap)
            {
                debug!(
                    "[AStar] FAILED: MaxExpansionsExceeded ({} nodes)",
                    stats.nodes_expanded
                );
                stats.duration = started.elapsed();
                return PlanningResult::failed(PathFailure::MaxExpansionsExceeded, stats)
                    .with_search_tree(self.search_tree(&came_from));
            }
            stats.nodes_expanded += 1;

            for edge in self.graph.edges_at(current.slot) {
                let tentative_g = current.g_cost + edge.cost;
                if tentative_g >= g_scores[edge.to] {
                    continue;
                }

                g_scores[edge.to] = tentative_g;
                came_from[edge.to] = Some(current.slot);
                let h = self
                    .heuristic
                    .estimate(self.graph, self.graph.node_at(edge.to), goal);
                seq += 1;
                open_set.push(FrontierEntry {
                    slot: edge.to,
                    g_cost: tentative_g,
                    f_cost: tentative_g + h,
                    seq,
                });
                stats.nodes_generated += 1;
            }
        }

        stats.duration = started.elapsed();
        let search_tree = self.search_tree(&came_from);

        let Some(cost) = outcome else {
            debug!(
                "[AStar] FAILED: NoPath ({} nodes expanded)",
                stats.nodes_expanded
            );
            return PlanningResult::failed(PathFailure::NoPath, stats).with_search_tree(search_tree);
        };

        let slots = reconstruct_path(&came_from, goal_slot);
        stats.state = SearchState::Stable;
        stats.path_nodes = slots.len();
        stats.path_length = self.euclidean_length(&slots);

        debug!(
            "[AStar] path found: cost {:.3}, {} nodes, {} expanded",
            cost,
            slots.len(),
            stats.nodes_expanded
        );

        PlanningResult {
            path: slots.iter().map(|&s| self.graph.node_at(s).clone()).collect(),
            cost,
            failure: None,
            search_tree,
            stats,
        }
    }

    fn search_tree(&self, came_from: &[Option<usize>]) -> Vec<TreeEdge<N>> {
        came_from
            .iter()
            .enumerate()
            .filter_map(|(child, parent)| {
                parent.map(|p| TreeEdge {
                    parent: self.graph.node_at(p).clone(),
                    child: self.graph.node_at(child).clone(),
                })
            })
            .collect()
    }

    /// Sum of straight-line segment lengths, 0 if any node lacks a position
    fn euclidean_length(&self, slots: &[usize]) -> f64 {
        let mut total = 0.0;
        for pair in slots.windows(2) {
            match (self.graph.position_at(pair[0]), self.graph.position_at(pair[1])) {
                (Some(a), Some(b)) => total += euclidean(a, b),
                _ => return 0.0,
            }
        }
        total
    }
}

fn reconstruct_path(came_from: &[Option<usize>], goal: usize) -> Vec<usize> {
    let mut path = vec![goal];
    let mut current = goal;
    while let Some(prev) = came_from[current] {
        path.push(prev);
        current = prev;
    }
    path.reverse();
    path
}

/// Run A* with default configuration
pub fn search<N, H>(graph: &Graph<N>, start: &N, goal: &N, heuristic: &H) -> PlanningResult<N>
where
    N: Eq + Hash + Clone,
    H: Heuristic<N> + ?Sized,
{
    AStarSearch::new(graph, heuristic).find_path(start, goal)
}
