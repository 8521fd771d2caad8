//! The planner's search tree and its supporting structures.
//!
//! - [`Tree`]: generation-tagged arena of [`TreeNode`]s with parent/child links
//! - [`SpatialIndex`]: nearest-neighbour and radius queries
//! - [`RewireEngine`]: RRT* parent choice and rewiring

mod arena;
mod rewire;
mod spatial;

pub use arena::{NodeId, Tree, TreeInvariantError, TreeNode};
pub use rewire::{Attachment, RewireEngine, RewireOutcome};
pub use spatial::{
    IndexedNode, LinearIndex, RTreeIndex, SpatialIndex, build_index, neighbor_radius,
};
