//! Turning the tree into a start-to-goal path.

use crate::core::Point;
use crate::result::{CostBreakdown, PlanStats, TreeEdge, path_length};
use crate::tree::{NodeId, Tree};

/// A path and its cost
#[derive(Clone, Debug, PartialEq)]
pub struct ExtractedPath<const D: usize> {
    pub points: Vec<Point<D>>,
    pub cost: f64,
}

/// Walks parent links from the goal connection back to the root
pub struct PathExtractor<'a, const D: usize> {
    tree: &'a Tree<D>,
}

impl<'a, const D: usize> PathExtractor<'a, D> {
    pub fn new(tree: &'a Tree<D>) -> Self {
        Self { tree }
    }

    /// Path through `goal_parent` to `goal`.
    ///
    /// The goal is appended only if it does not coincide with its parent.
    pub fn extract(&self, goal_parent: NodeId, goal: &Point<D>) -> ExtractedPath<D> {
        let mut points: Vec<Point<D>> = self
            .tree
            .path_to_root(goal_parent)
            .into_iter()
            .rev()
            .map(|id| self.tree.position(id))
            .collect();

        let tail = self.tree.position(goal_parent);
        let link = tail.distance(goal);
        if link > 0.0 {
            points.push(*goal);
        }

        ExtractedPath {
            points,
            cost: self.tree.cost(goal_parent) + link,
        }
    }

    /// Cost the goal would have through `goal_parent`
    pub fn goal_cost(&self, goal_parent: NodeId, goal: &Point<D>) -> f64 {
        self.tree.cost(goal_parent) + self.tree.position(goal_parent).distance(goal)
    }

    /// Every tree edge, for renderers
    pub fn search_tree(&self) -> Vec<TreeEdge<Point<D>>> {
        self.tree
            .edges()
            .into_iter()
            .map(|(parent, child)| TreeEdge { parent, child })
            .collect()
    }
}

/// Fill the path-derived fields of `stats`
pub fn record_path_stats<const D: usize>(stats: &mut PlanStats, path: &[Point<D>], axis_weights: &[f64]) {
    stats.path_nodes = path.len();
    stats.path_length = path_length(path);
    stats.breakdown = Some(CostBreakdown::from_path(path, axis_weights));
}
