//! Heuristics for A*.
//!
//! Any admissible heuristic (never above the true remaining cost) keeps the
//! search exact. A constant heuristic shifts every `f` by the same amount,
//! which leaves the expansion order of Dijkstra's algorithm unchanged.

use std::collections::HashMap;
use std::hash::Hash;

use super::{Graph, euclidean};

/// Estimate of the remaining cost from `node` to `goal`
pub trait Heuristic<N> {
    fn estimate(&self, graph: &Graph<N>, node: &N, goal: &N) -> f64;
}

impl<N, F> Heuristic<N> for F
where
    F: Fn(&N, &N) -> f64,
{
    fn estimate(&self, _graph: &Graph<N>, node: &N, goal: &N) -> f64 {
        self(node, goal)
    }
}

/// `h = 0`: plain Dijkstra
#[derive(Clone, Copy, Debug, Default)]
pub struct ZeroHeuristic;

impl<N> Heuristic<N> for ZeroHeuristic {
    fn estimate(&self, _graph: &Graph<N>, _node: &N, _goal: &N) -> f64 {
        0.0
    }
}

/// Same estimate for every node
#[derive(Clone, Copy, Debug)]
pub struct ConstantHeuristic(pub f64);

impl<N> Heuristic<N> for ConstantHeuristic {
    fn estimate(&self, _graph: &Graph<N>, _node: &N, _goal: &N) -> f64 {
        self.0
    }
}

/// Precomputed per-node lower bounds towards one fixed goal.
///
/// Nodes missing from the table get `fallback` (0 by default).
#[derive(Clone, Debug)]
pub struct LowerBoundTable<N: Eq + Hash> {
    bounds: HashMap<N, f64>,
    fallback: f64,
}

impl<N: Eq + Hash> LowerBoundTable<N> {
    pub fn new(bounds: HashMap<N, f64>) -> Self {
        Self {
            bounds,
            fallback: 0.0,
        }
    }

    pub fn with_fallback(mut self, fallback: f64) -> Self {
        self.fallback = fallback;
        self
    }
}

impl<N: Eq + Hash> FromIterator<(N, f64)> for LowerBoundTable<N> {
    fn from_iter<I: IntoIterator<Item = (N, f64)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<N: Eq + Hash> Heuristic<N> for LowerBoundTable<N> {
    fn estimate(&self, _graph: &Graph<N>, node: &N, _goal: &N) -> f64 {
        self.bounds.get(node).copied().unwrap_or(self.fallback)
    }
}

/// Straight-line distance between node positions, times `scale`.
///
/// Admissible when every edge costs at least `scale` times its length.
/// Falls back to 0 for nodes without a position.
#[derive(Clone, Copy, Debug)]
pub struct EuclideanHeuristic {
    pub scale: f64,
}

impl Default for EuclideanHeuristic {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}

impl<N: Eq + Hash + Clone> Heuristic<N> for EuclideanHeuristic {
    fn estimate(&self, graph: &Graph<N>, node: &N, goal: &N) -> f64 {
        match (graph.position(node), graph.position(goal)) {
            (Some(a), Some(b)) => self.scale * euclidean(a, b),
            _ => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph() -> Graph<&'static str> {
        let mut g = Graph::new();
        g.add_node_at("A", &[0.0, 0.0]).unwrap();
        g.add_node_at("B", &[3.0, 4.0]).unwrap();
        g.add_node("C");
        g
    }

    #[test]
    fn test_simple_heuristics() {
        let g = graph();
        assert_eq!(ZeroHeuristic.estimate(&g, &"A", &"B"), 0.0);
        assert_eq!(ConstantHeuristic(1.0).estimate(&g, &"A", &"B"), 1.0);
        let closure = |a: &&str, b: &&str| if a == b { 0.0 } else { 2.0 };
        assert_eq!(closure.estimate(&g, &"A", &"B"), 2.0);
    }

    #[test]
    fn test_lower_bound_table() {
        let g = graph();
        let table: LowerBoundTable<&str> = [("A", 4.0), ("B", 1.0)].into_iter().collect();
        assert_eq!(table.estimate(&g, &"A", &"C"), 4.0);
        assert_eq!(table.estimate(&g, &"C", &"C"), 0.0);
        let table = table.with_fallback(0.5);
        assert_eq!(table.estimate(&g, &"C", &"C"), 0.5);
    }

    #[test]
    fn test_euclidean() {
        let g = graph();
        assert_eq!(EuclideanHeuristic::default().estimate(&g, &"A", &"B"), 5.0);
        assert_eq!(EuclideanHeuristic { scale: 2.0 }.estimate(&g, &"A", &"B"), 10.0);
        assert_eq!(EuclideanHeuristic::default().estimate(&g, &"A", &"C"), 0.0);
    }
}
