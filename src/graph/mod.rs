//! Explicit weighted graphs and exact search over them.
//!
//! Edges may carry several cost criteria (distance, fuel, time, ...). They
//! are reduced to one non-negative scalar when the edge is added, so the
//! search itself never sees individual criteria.
//!
//! ```rust
//! use vastu_plan::graph::{Graph, ZeroHeuristic, astar};
//!
//! let mut graph = Graph::new();
//! graph.add_edge("A", "B", 5.0).unwrap();
//! graph.add_edge("B", "C", 2.0).unwrap();
//! graph.add_edge("A", "C", 9.0).unwrap();
//!
//! let result = astar::search(&graph, &"A", &"C", &ZeroHeuristic);
//! assert_eq!(result.path, vec!["A", "B", "C"]);
//! assert_eq!(result.cost, 7.0);
//! ```

pub mod astar;
mod build;
mod heuristic;

pub use astar::{AStarConfig, AStarSearch};
pub use build::proximity_graph;
pub use heuristic::{ConstantHeuristic, EuclideanHeuristic, Heuristic, LowerBoundTable, ZeroHeuristic};

use std::collections::HashMap;
use std::hash::Hash;

use thiserror::Error;

/// Rejected graph input
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("Edge cost must be finite and non-negative, got {0}")]
    InvalidCost(f64),

    #[error("Criterion weight {index} must be finite and non-negative, got {value}")]
    InvalidWeight { index: usize, value: f64 },

    #[error("Edge has {got} cost criteria, graph weights expect {expected}")]
    CriteriaMismatch { expected: usize, got: usize },

    #[error("Edge has no cost criteria")]
    NoCriteria,

    #[error("Node position must be finite")]
    InvalidPosition,
}

/// Outgoing edge, by internal slot
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Edge {
    pub to: usize,
    pub cost: f64,
}

/// Directed graph with scalar edge costs and optional node positions
#[derive(Clone, Debug)]
pub struct Graph<N> {
    slots: HashMap<N, usize>,
    nodes: Vec<N>,
    positions: Vec<Option<Vec<f64>>>,
    adjacency: Vec<Vec<Edge>>,
    weights: Option<Vec<f64>>,
    edge_count: usize,
}

impl<N> Default for Graph<N> {
    fn default() -> Self {
        Self {
            slots: HashMap::new(),
            nodes: Vec::new(),
            positions: Vec::new(),
            adjacency: Vec::new(),
            weights: None,
            edge_count: 0,
        }
    }
}

impl<N: Eq + Hash + Clone> Graph<N> {
    /// Empty graph; multi-criterion edges are combined by plain summation
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty graph combining multi-criterion edges with `weights`
    pub fn with_weights(weights: Vec<f64>) -> Result<Self, GraphError> {
        for (index, &value) in weights.iter().enumerate() {
            if !value.is_finite() || value < 0.0 {
                return Err(GraphError::InvalidWeight { index, value });
            }
        }
        Ok(Self {
            weights: Some(weights),
            ..Self::default()
        })
    }

    /// Add a node if absent
    pub fn add_node(&mut self, id: N) {
        self.slot_or_insert(id);
    }

    /// Add a node (if absent) and set its position
    pub fn add_node_at(&mut self, id: N, position: &[f64]) -> Result<(), GraphError> {
        if position.iter().any(|c| !c.is_finite()) {
            return Err(GraphError::InvalidPosition);
        }
        let slot = self.slot_or_insert(id);
        self.positions[slot] = Some(position.to_vec());
        Ok(())
    }

    /// Add a directed edge with a scalar cost
    pub fn add_edge(&mut self, from: N, to: N, cost: f64) -> Result<(), GraphError> {
        if !cost.is_finite() || cost < 0.0 {
            return Err(GraphError::InvalidCost(cost));
        }
        let from = self.slot_or_insert(from);
        let to = self.slot_or_insert(to);
        self.adjacency[from].push(Edge { to, cost });
        self.edge_count += 1;
        Ok(())
    }

    /// Add a directed edge whose cost has several criteria
    pub fn add_multi_cost_edge(&mut self, from: N, to: N, criteria: &[f64]) -> Result<(), GraphError> {
        let cost = self.combine(criteria)?;
        self.add_edge(from, to, cost)
    }

    /// Add edges in both directions
    pub fn add_undirected_edge(&mut self, a: N, b: N, cost: f64) -> Result<(), GraphError> {
        self.add_edge(a.clone(), b.clone(), cost)?;
        self.add_edge(b, a, cost)
    }

    /// Reduce per-criterion costs to one scalar
    pub fn combine(&self, criteria: &[f64]) -> Result<f64, GraphError> {
        if criteria.is_empty() {
            return Err(GraphError::NoCriteria);
        }
        if let Some(&bad) = criteria.iter().find(|c| !c.is_finite() || **c < 0.0) {
            return Err(GraphError::InvalidCost(bad));
        }

        match &self.weights {
            None => Ok(criteria.iter().sum()),
            Some(weights) if weights.len() != criteria.len() => Err(GraphError::CriteriaMismatch {
                expected: weights.len(),
                got: criteria.len(),
            }),
            Some(weights) => Ok(criteria.iter().zip(weights).map(|(c, w)| c * w).sum()),
        }
    }

    pub fn contains(&self, id: &N) -> bool {
        self.slots.contains_key(id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &N> {
        self.nodes.iter()
    }

    /// Outgoing edges of `id` as `(neighbour, cost)`
    pub fn neighbors<'a>(&'a self, id: &N) -> impl Iterator<Item = (&'a N, f64)> + 'a {
        let edges: &'a [Edge] = match self.slots.get(id) {
            Some(&slot) => &self.adjacency[slot],
            None => &[],
        };
        edges.iter().map(move |e| (&self.nodes[e.to], e.cost))
    }

    pub fn position(&self, id: &N) -> Option<&[f64]> {
        let slot = *self.slots.get(id)?;
        self.positions[slot].as_deref()
    }

    pub(crate) fn slot(&self, id: &N) -> Option<usize> {
        self.slots.get(id).copied()
    }

    pub(crate) fn node_at(&self, slot: usize) -> &N {
        &self.nodes[slot]
    }

    pub(crate) fn position_at(&self, slot: usize) -> Option<&[f64]> {
        self.positions[slot].as_deref()
    }

    pub(crate) fn edges_at(&self, slot: usize) -> &[Edge] {
        &self.adjacency[slot]
    }

    fn slot_or_insert(&mut self, id: N) -> usize {
        if let Some(&slot) = self.slots.get(&id) {
            return slot;
        }
        let slot = self.nodes.len();
        self.slots.insert(id.clone(), slot);
        self.nodes.push(id);
        self.positions.push(None);
        self.adjacency.push(Vec::new());
        slot
    }
}

/// Euclidean distance between two coordinate slices of equal length
pub(crate) fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_and_query() {
        let mut g = Graph::new();
        g.add_edge("A", "B", 1.0).unwrap();
        g.add_edge("A", "C", 2.0).unwrap();
        g.add_node("D");

        assert_eq!(g.node_count(), 4);
        assert_eq!(g.edge_count(), 2);
        assert!(g.contains(&"D"));
        assert!(!g.contains(&"E"));

        let out: Vec<_> = g.neighbors(&"A").collect();
        assert_eq!(out, vec![(&"B", 1.0), (&"C", 2.0)]);
        assert_eq!(g.neighbors(&"E").count(), 0);
        assert_eq!(g.nodes().copied().collect::<Vec<_>>(), vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn test_rejects_bad_costs() {
        let mut g: Graph<u32> = Graph::new();
        assert_eq!(g.add_edge(1, 2, -1.0), Err(GraphError::InvalidCost(-1.0)));
        assert!(g.add_edge(1, 2, f64::NAN).is_err());
        assert!(g.add_edge(1, 2, f64::INFINITY).is_err());
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn test_multi_cost_sum_and_weights() {
        let mut g = Graph::new();
        g.add_multi_cost_edge('A', 'B', &[10.0, 3.0, 2.0]).unwrap();
        assert_eq!(g.neighbors(&'A').next(), Some((&'B', 15.0)));

        let weighted: Graph<char> = Graph::with_weights(vec![1.0, 0.5, 2.0]).unwrap();
        assert_eq!(weighted.combine(&[10.0, 4.0, 1.0]), Ok(14.0));
        assert_eq!(
            weighted.combine(&[1.0]),
            Err(GraphError::CriteriaMismatch { expected: 3, got: 1 })
        );
        assert_eq!(weighted.combine(&[]), Err(GraphError::NoCriteria));
        assert!(Graph::<char>::with_weights(vec![-1.0]).is_err());
    }

    #[test]
    fn test_positions() {
        let mut g = Graph::new();
        g.add_node_at(1, &[0.0, 0.0]).unwrap();
        g.add_node(2);
        assert_eq!(g.position(&1), Some(&[0.0, 0.0][..]));
        assert_eq!(g.position(&2), None);
        assert_eq!(g.add_node_at(3, &[f64::NAN, 0.0]), Err(GraphError::InvalidPosition));
        assert_eq!(euclidean(&[0.0, 0.0], &[3.0, 4.0]), 5.0);
    }

    #[test]
    fn test_undirected_edge() {
        let mut g = Graph::new();
        g.add_undirected_edge(0, 1, 2.5).unwrap();
        assert_eq!(g.neighbors(&1).next(), Some((&0, 2.5)));
        assert_eq!(g.edge_count(), 2);
    }
}
