//! Spatial indexing for nearest-neighbour and radius queries over tree nodes.
//!
//! Two interchangeable implementations:
//! - [`LinearIndex`]: a plain scan, fine for small trees
//! - [`RTreeIndex`]: an R-tree with O(log n) insertion
//!
//! Both return identical answers: nearest-neighbour ties go to the node
//! inserted first, and radius queries come back in insertion order.

use rstar::{AABB, PointDistance, RTree, RTreeObject};

use super::arena::NodeId;
use crate::config::IndexKind;
use crate::core::Point;

/// Nearest-neighbour structure over tree node positions
pub trait SpatialIndex<const D: usize>: Send {
    /// Add a node
    fn insert(&mut self, id: NodeId, position: Point<D>);

    /// Closest node and its distance. Ties go to the lowest insertion index.
    fn nearest(&self, query: &Point<D>) -> Option<(NodeId, f64)>;

    /// All nodes strictly closer than `radius`, in insertion order.
    fn within_radius(&self, query: &Point<D>, radius: f64) -> Vec<(NodeId, f64)>;

    /// Number of indexed nodes
    fn len(&self) -> usize;

    /// Check if the index is empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove every node
    fn clear(&mut self);
}

/// Build the index selected in the configuration
pub fn build_index<const D: usize>(kind: IndexKind) -> Box<dyn SpatialIndex<D>> {
    match kind {
        IndexKind::Linear => Box::new(LinearIndex::new()),
        IndexKind::RTree => Box::new(RTreeIndex::new()),
    }
}

/// Rewiring radius: `min(k * sqrt(ln(n+1)/(n+1)), step_size * cap)`.
///
/// Shrinks as the tree grows, capped so early iterations do not scan a
/// huge neighbourhood.
///
/// # Example
/// ```
/// use vastu_plan::tree::neighbor_radius;
///
/// // Small trees hit the cap
/// assert_eq!(neighbor_radius(1, 15.0, 1.0, 5.0), 5.0);
/// // Large trees use the shrinking schedule
/// assert!(neighbor_radius(10_000, 15.0, 1.0, 5.0) < 1.0);
/// ```
pub fn neighbor_radius(n: usize, k: f64, step_size: f64, cap_multiplier: f64) -> f64 {
    let m = (n + 1) as f64;
    (k * (m.ln() / m).sqrt()).min(step_size * cap_multiplier)
}

fn by_insertion(mut hits: Vec<(NodeId, f64)>) -> Vec<(NodeId, f64)> {
    hits.sort_by_key(|(id, _)| id.index());
    hits
}

// ─────────────────────────────────────────────────────────────────────────────
// Linear scan
// ─────────────────────────────────────────────────────────────────────────────

/// Brute-force index
#[derive(Clone, Debug, Default)]
pub struct LinearIndex<const D: usize> {
    entries: Vec<(NodeId, Point<D>)>,
}

impl<const D: usize> LinearIndex<D> {
    /// Create an empty index
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<const D: usize> SpatialIndex<D> for LinearIndex<D> {
    fn insert(&mut self, id: NodeId, position: Point<D>) {
        self.entries.push((id, position));
    }

    fn nearest(&self, query: &Point<D>) -> Option<(NodeId, f64)> {
        let mut best: Option<(NodeId, f64)> = None;
        for (id, position) in &self.entries {
            let d2 = position.distance_squared(query);
            let better = match best {
                None => true,
                Some((best_id, best_d2)) => {
                    d2 < best_d2 || (d2 == best_d2 && id.index() < best_id.index())
                }
            };
            if better {
                best = Some((*id, d2));
            }
        }
        best.map(|(id, d2)| (id, d2.sqrt()))
    }

    fn within_radius(&self, query: &Point<D>, radius: f64) -> Vec<(NodeId, f64)> {
        let hits = self
            .entries
            .iter()
            .filter_map(|(id, position)| {
                let d = position.distance(query);
                (d < radius).then_some((*id, d))
            })
            .collect();
        by_insertion(hits)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn clear(&mut self) {
        self.entries.clear();
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// R-tree
// ─────────────────────────────────────────────────────────────────────────────

/// A tree node position for R-tree storage.
#[derive(Clone, Debug)]
pub struct IndexedNode<const D: usize> {
    /// Node position
    pub position: [f64; D],
    /// Handle of the node in the tree arena
    pub id: NodeId,
}

impl<const D: usize> RTreeObject for IndexedNode<D> {
    type Envelope = AABB<[f64; D]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.position)
    }
}

impl<const D: usize> PointDistance for IndexedNode<D> {
    fn distance_2(&self, point: &[f64; D]) -> f64 {
        // Same formula as Point::distance_squared so both indexes agree bit for bit
        Point::from_array(self.position).distance_squared(&Point::from_array(*point))
    }
}

/// R-tree backed index
#[derive(Clone)]
pub struct RTreeIndex<const D: usize> {
    tree: RTree<IndexedNode<D>>,
}

impl<const D: usize> RTreeIndex<D> {
    /// Create an empty index
    pub fn new() -> Self {
        Self { tree: RTree::new() }
    }
}

impl<const D: usize> Default for RTreeIndex<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const D: usize> std::fmt::Debug for RTreeIndex<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RTreeIndex")
            .field("size", &self.tree.size())
            .finish()
    }
}

impl<const D: usize> SpatialIndex<D> for RTreeIndex<D> {
    fn insert(&mut self, id: NodeId, position: Point<D>) {
        self.tree.insert(IndexedNode {
            position: position.to_array(),
            id,
        });
    }

    fn nearest(&self, query: &Point<D>) -> Option<(NodeId, f64)> {
        let q = query.to_array();
        let closest = self.tree.nearest_neighbor(&q)?;
        let best_d2 = closest.distance_2(&q);

        // Collect every node at the same distance and keep the oldest
        self.tree
            .locate_within_distance(q, best_d2)
            .map(|node| (node.id, node.distance_2(&q)))
            .filter(|&(_, d2)| d2 == best_d2)
            .min_by_key(|(id, _)| id.index())
            .map(|(id, d2)| (id, d2.sqrt()))
    }

    fn within_radius(&self, query: &Point<D>, radius: f64) -> Vec<(NodeId, f64)> {
        let q = query.to_array();
        // Slightly widened so rounding in r*r never drops a node the scan would keep
        let r2 = radius * radius * (1.0 + 1e-9);

        let hits = self
            .tree
            .locate_within_distance(q, r2)
            .filter_map(|node| {
                let d = node.distance_2(&q).sqrt();
                (d < radius).then_some((node.id, d))
            })
            .collect();
        by_insertion(hits)
    }

    fn len(&self) -> usize {
        self.tree.size()
    }

    fn clear(&mut self) {
        self.tree = RTree::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Point2;
    use crate::tree::Tree;
    use rand::{Rng, SeedableRng, rngs::StdRng};

    /// Insert points through a real tree so the handles are genuine.
    fn populate(points: &[Point2], index: &mut dyn SpatialIndex<2>) -> Vec<NodeId> {
        let mut tree = Tree::new(points[0]);
        index.insert(tree.root(), points[0]);
        let mut ids = vec![tree.root()];
        for p in &points[1..] {
            let id = tree.insert(*p, tree.root());
            index.insert(id, *p);
            ids.push(id);
        }
        ids
    }

    fn random_points(n: usize, seed: u64) -> Vec<Point2> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..n)
            .map(|_| Point2::new(rng.gen_range(-10.0..10.0), rng.gen_range(-10.0..10.0)))
            .collect()
    }

    #[test]
    fn test_empty_index() {
        let index = RTreeIndex::<2>::new();
        assert!(index.is_empty());
        assert!(index.nearest(&Point2::new(0.0, 0.0)).is_none());
        assert!(LinearIndex::<2>::new().nearest(&Point2::new(0.0, 0.0)).is_none());
    }

    #[test]
    fn test_nearest() {
        let points = [
            Point2::new(0.0, 0.0),
            Point2::new(5.0, 0.0),
            Point2::new(5.0, 5.0),
        ];
        for kind in [IndexKind::Linear, IndexKind::RTree] {
            let mut index = build_index::<2>(kind);
            let ids = populate(&points, index.as_mut());
            let (id, d) = index.nearest(&Point2::new(4.0, 1.0)).unwrap();
            assert_eq!(id, ids[1]);
            assert!((d - 2f64.sqrt()).abs() < 1e-12);
        }
    }

    #[test]
    fn test_nearest_tie_goes_to_first_inserted() {
        let points = [
            Point2::new(-1.0, 0.0),
            Point2::new(3.0, 3.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
        ];
        for kind in [IndexKind::Linear, IndexKind::RTree] {
            let mut index = build_index::<2>(kind);
            let ids = populate(&points, index.as_mut());
            let (id, _) = index.nearest(&Point2::new(0.0, 0.0)).unwrap();
            assert_eq!(id, ids[0], "{:?}", kind);
        }
    }

    #[test]
    fn test_within_radius_is_strict_and_ordered() {
        let points = [
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(0.5, 0.0),
            Point2::new(1.0, 0.0),
        ];
        for kind in [IndexKind::Linear, IndexKind::RTree] {
            let mut index = build_index::<2>(kind);
            let ids = populate(&points, index.as_mut());
            let hits = index.within_radius(&Point2::new(0.0, 0.0), 1.0);
            let found: Vec<NodeId> = hits.iter().map(|(id, _)| *id).collect();
            // (1,0) is exactly on the radius and excluded
            assert_eq!(found, vec![ids[0], ids[2]], "{:?}", kind);
        }
    }

    #[test]
    fn test_linear_and_rtree_agree() {
        let points = random_points(400, 5);
        let mut linear = LinearIndex::new();
        let mut rtree = RTreeIndex::new();
        populate(&points, &mut linear);
        populate(&points, &mut rtree);
        assert_eq!(linear.len(), rtree.len());

        for q in random_points(200, 9) {
            assert_eq!(linear.nearest(&q), rtree.nearest(&q));
            for r in [0.1, 1.0, 3.5] {
                assert_eq!(linear.within_radius(&q, r), rtree.within_radius(&q, r));
            }
        }
    }

    #[test]
    fn test_clear() {
        let mut index = RTreeIndex::new();
        populate(&random_points(10, 1), &mut index);
        assert_eq!(index.len(), 10);
        index.clear();
        assert!(index.is_empty());
    }

    #[test]
    fn test_neighbor_radius_schedule() {
        // Capped early
        assert_eq!(neighbor_radius(0, 15.0, 1.0, 5.0), 0.0);
        assert_eq!(neighbor_radius(1, 15.0, 1.0, 5.0), 5.0);
        assert_eq!(neighbor_radius(2, 15.0, 1.0, 5.0), 5.0);
        // Monotonically shrinking once past the cap
        let r1 = neighbor_radius(100, 15.0, 1.0, 5.0);
        let r2 = neighbor_radius(1000, 15.0, 1.0, 5.0);
        assert!(r1 > r2);
        let expected = 15.0 * ((1001f64).ln() / 1001.0).sqrt();
        assert!((r2 - expected).abs() < 1e-12);
    }
}
