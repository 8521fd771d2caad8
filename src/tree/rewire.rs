//! Parent selection and rewiring for RRT*.

use log::trace;

use super::arena::{NodeId, Tree};
use crate::collision::CollisionOracle;
use crate::core::Point;

/// Chosen parent for a new node
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Attachment {
    /// Parent node
    pub parent: NodeId,
    /// Cost the new node will have
    pub cost: f64,
}

/// Outcome of a rewire pass
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RewireOutcome {
    /// Neighbours moved under the new node
    pub rewired: usize,
    /// Descendants whose cost was refreshed as a consequence
    pub propagated: usize,
}

/// Local optimisation step of RRT*.
///
/// Segment validity gates every candidate: a blocked connection removes the
/// candidate instead of penalising it.
pub struct RewireEngine<'a, const D: usize> {
    oracle: &'a dyn CollisionOracle<D>,
}

impl<'a, const D: usize> RewireEngine<'a, D> {
    /// Create an engine that checks connections with `oracle`
    pub fn new(oracle: &'a dyn CollisionOracle<D>) -> Self {
        Self { oracle }
    }

    /// Pick the parent minimising `candidate.cost + distance(candidate, x)`.
    ///
    /// `nearest` is tried first, then `neighbors` in the given order; ties
    /// keep the earlier candidate. Returns `None` when no candidate has a
    /// collision-free connection.
    pub fn choose_parent(
        &self,
        tree: &Tree<D>,
        position: &Point<D>,
        nearest: NodeId,
        neighbors: &[NodeId],
    ) -> Option<Attachment> {
        let mut best: Option<Attachment> = None;

        let candidates = std::iter::once(nearest).chain(neighbors.iter().copied().filter(|&n| n != nearest));
        for candidate in candidates {
            let node = tree.node(candidate);
            let cost = node.cost() + node.position().distance(position);
            if !cost.is_finite() {
                continue;
            }
            if best.is_some_and(|b| cost >= b.cost) {
                continue;
            }
            if !self.oracle.is_valid_segment(node.position(), position) {
                continue;
            }
            best = Some(Attachment {
                parent: candidate,
                cost,
            });
        }

        best
    }

    /// Reparent neighbours through `new_node` where that is strictly cheaper.
    ///
    /// The new node's own parent is skipped, as is any neighbour that is an
    /// ancestor of `new_node`, so the parent graph stays a tree. Cost changes
    /// are pushed down to all descendants of each rewired neighbour.
    pub fn rewire(&self, tree: &mut Tree<D>, new_node: NodeId, neighbors: &[NodeId]) -> RewireOutcome {
        let mut outcome = RewireOutcome::default();
        let new_parent = tree.node(new_node).parent();
        let new_position = tree.position(new_node);
        let new_cost = tree.cost(new_node);

        for &neighbor in neighbors {
            if neighbor == new_node || Some(neighbor) == new_parent {
                continue;
            }

            let neighbor_position = tree.position(neighbor);
            let potential = new_cost + new_position.distance(&neighbor_position);
            if potential >= tree.cost(neighbor) {
                continue;
            }
            if tree.is_ancestor(neighbor, new_node) {
                continue;
            }
            if !self.oracle.is_valid_segment(&new_position, &neighbor_position) {
                continue;
            }

            match tree.reparent(neighbor, new_node) {
                Ok(updated) => {
                    trace!(
                        "[RRT*] rewired node {} via {} (cost {:.3}, {} descendants)",
                        neighbor.index(),
                        new_node.index(),
                        potential,
                        updated
                    );
                    outcome.rewired += 1;
                    outcome.propagated += updated;
                }
                Err(e) => trace!("[RRT*] skipped rewire of {}: {}", neighbor.index(), e),
            }
        }

        outcome
    }
}
