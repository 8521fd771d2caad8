//! Graph construction from point sets.

use log::debug;

use super::{Graph, GraphError};
use crate::collision::CollisionOracle;
use crate::core::Point;

/// Connect every pair of points within `radius` whose segment is free.
///
/// Nodes are the indices into `points` and carry the point as position;
/// edges go both ways and cost the Euclidean distance. Points the oracle
/// rejects are added as isolated nodes.
pub fn proximity_graph<const D: usize>(
    points: &[Point<D>],
    radius: f64,
    oracle: &dyn CollisionOracle<D>,
) -> Result<Graph<usize>, GraphError> {
    let mut graph = Graph::new();
    for (i, p) in points.iter().enumerate() {
        graph.add_node_at(i, p.coords())?;
    }

    let valid: Vec<bool> = points.iter().map(|p| oracle.is_valid(p)).collect();
    for i in 0..points.len() {
        if !valid[i] {
            continue;
        }
        for j in (i + 1)..points.len() {
            if !valid[j] {
                continue;
            }
            let d = points[i].distance(&points[j]);
            if d > radius || !oracle.is_valid_segment(&points[i], &points[j]) {
                continue;
            }
            graph.add_undirected_edge(i, j, d)?;
        }
    }

    debug!(
        "[Graph] proximity graph: {} nodes, {} edges (radius {:.3})",
        graph.node_count(),
        graph.edge_count(),
        radius
    );
    Ok(graph)
}
