//! Arena-backed search tree.
//!
//! Nodes live in a `Vec` and refer to each other through [`NodeId`]
//! handles. Each handle carries the arena generation it was issued under;
//! [`Tree::reset`] bumps the generation so handles from an earlier run are
//! rejected instead of aliasing new nodes.

use log::trace;
use thiserror::Error;

use crate::core::Point;

/// Handle to a node in a [`Tree`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

impl NodeId {
    /// Insertion order of this node (root is 0)
    #[inline]
    pub fn index(&self) -> usize {
        self.index as usize
    }

    /// Arena generation this handle belongs to
    #[inline]
    pub fn generation(&self) -> u32 {
        self.generation
    }
}

/// A node of the search tree
#[derive(Clone, Debug)]
pub struct TreeNode<const D: usize> {
    position: Point<D>,
    label: Option<String>,
    cost: f64,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl<const D: usize> TreeNode<D> {
    /// Configuration of this node
    #[inline]
    pub fn position(&self) -> &Point<D> {
        &self.position
    }

    /// Optional label
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Cost from the root
    #[inline]
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Parent, `None` only for the root
    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Direct children
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Violations reported by [`Tree::validate`]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TreeInvariantError {
    /// A handle from another generation or out of range
    #[error("stale node handle {0:?}")]
    StaleHandle(NodeId),

    /// A non-root node without a parent, or a root with one
    #[error("node {0} breaks the single-root rule")]
    RootViolation(usize),

    /// Parent walk revisits a node
    #[error("cycle through node {0}")]
    Cycle(usize),

    /// Node cost differs from parent cost plus edge length
    #[error("node {node} cost {actual} != expected {expected}")]
    CostMismatch {
        /// Node index
        node: usize,
        /// parent.cost + edge length
        expected: f64,
        /// Stored cost
        actual: f64,
    },

    /// Parent and child lists disagree
    #[error("child list of node {0} is inconsistent")]
    ChildMismatch(usize),
}

/// Search tree rooted at the start configuration
#[derive(Clone, Debug)]
pub struct Tree<const D: usize> {
    nodes: Vec<TreeNode<D>>,
    generation: u32,
}

impl<const D: usize> Tree<D> {
    /// Create a tree holding only the root
    pub fn new(root: Point<D>) -> Self {
        let mut tree = Self {
            nodes: Vec::new(),
            generation: 0,
        };
        tree.push_root(root);
        tree
    }

    /// Drop every node and start over from a new root.
    ///
    /// Handles issued before the reset become stale.
    pub fn reset(&mut self, root: Point<D>) {
        self.nodes.clear();
        self.generation = self.generation.wrapping_add(1);
        self.push_root(root);
    }

    fn push_root(&mut self, root: Point<D>) {
        self.nodes.push(TreeNode {
            position: root,
            label: Some("start".to_string()),
            cost: 0.0,
            parent: None,
            children: Vec::new(),
        });
    }

    fn id_at(&self, index: usize) -> NodeId {
        NodeId {
            index: index as u32,
            generation: self.generation,
        }
    }

    /// Root handle
    #[inline]
    pub fn root(&self) -> NodeId {
        self.id_at(0)
    }

    /// Current arena generation
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Number of nodes (never zero)
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false, the root is never removed
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Check whether a handle belongs to this tree
    #[inline]
    pub fn contains(&self, id: NodeId) -> bool {
        id.generation == self.generation && id.index() < self.nodes.len()
    }

    /// Look up a node; `None` for stale handles
    pub fn get(&self, id: NodeId) -> Option<&TreeNode<D>> {
        if self.contains(id) {
            self.nodes.get(id.index())
        } else {
            None
        }
    }

    /// Look up a node.
    ///
    /// # Panics
    /// Panics if `id` is out of range. Stale generations trip a debug assertion.
    #[inline]
    pub fn node(&self, id: NodeId) -> &TreeNode<D> {
        debug_assert_eq!(id.generation, self.generation, "stale node handle");
        &self.nodes[id.index()]
    }

    /// Position of a node
    #[inline]
    pub fn position(&self, id: NodeId) -> Point<D> {
        self.node(id).position
    }

    /// Cost of a node
    #[inline]
    pub fn cost(&self, id: NodeId) -> f64 {
        self.node(id).cost
    }

    /// Iterate over all nodes in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &TreeNode<D>)> {
        self.nodes
            .iter()
            .enumerate()
            .map(move |(i, n)| (self.id_at(i), n))
    }

    /// Add a leaf under `parent`. The cost is derived from the parent.
    pub fn insert(&mut self, position: Point<D>, parent: NodeId) -> NodeId {
        let cost = self.cost(parent) + self.position(parent).distance(&position);
        let id = self.id_at(self.nodes.len());
        self.nodes.push(TreeNode {
            position,
            label: None,
            cost,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.index()].children.push(id);
        id
    }

    /// True if `ancestor` lies on the parent chain of `node` (or is `node`).
    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        let mut steps = 0;
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            steps += 1;
            if steps > self.nodes.len() {
                // Only reachable if the tree is already corrupt
                return false;
            }
            current = self.nodes[id.index()].parent;
        }
        false
    }

    /// Move `child` under `new_parent` and refresh costs of its subtree.
    ///
    /// Returns the number of descendants whose cost was updated. Refuses
    /// (returns `Err`) if `new_parent` is inside the subtree of `child`.
    pub fn reparent(&mut self, child: NodeId, new_parent: NodeId) -> Result<usize, TreeInvariantError> {
        if !self.contains(child) {
            return Err(TreeInvariantError::StaleHandle(child));
        }
        if !self.contains(new_parent) {
            return Err(TreeInvariantError::StaleHandle(new_parent));
        }
        if self.is_ancestor(child, new_parent) {
            return Err(TreeInvariantError::Cycle(child.index()));
        }
        let Some(old_parent) = self.nodes[child.index()].parent else {
            return Err(TreeInvariantError::RootViolation(child.index()));
        };

        self.nodes[old_parent.index()].children.retain(|&c| c != child);
        self.nodes[new_parent.index()].children.push(child);

        let cost = self.cost(new_parent) + self.position(new_parent).distance(&self.position(child));
        let node = &mut self.nodes[child.index()];
        node.parent = Some(new_parent);
        node.cost = cost;

        Ok(self.propagate_costs(child))
    }

    /// Recompute costs of every descendant of `from` from their parents.
    ///
    /// Iterative so deep trees cannot overflow the stack. Returns the number
    /// of descendants visited.
    pub fn propagate_costs(&mut self, from: NodeId) -> usize {
        let mut stack: Vec<NodeId> = self.nodes[from.index()].children.clone();
        let mut updated = 0;

        while let Some(id) = stack.pop() {
            let Some(parent) = self.nodes[id.index()].parent else {
                continue;
            };
            let cost = self.nodes[parent.index()].cost
                + self.nodes[parent.index()]
                    .position
                    .distance(&self.nodes[id.index()].position);
            self.nodes[id.index()].cost = cost;
            stack.extend_from_slice(&self.nodes[id.index()].children);
            updated += 1;
        }

        if updated > 0 {
            trace!("[Tree] propagated cost change to {} descendants", updated);
        }
        updated
    }

    /// Handles from `id` up to the root (inclusive)
    pub fn path_to_root(&self, id: NodeId) -> Vec<NodeId> {
        let mut path = Vec::new();
        let mut current = Some(id);
        while let Some(c) = current {
            path.push(c);
            if path.len() > self.nodes.len() {
                break;
            }
            current = self.nodes[c.index()].parent;
        }
        path
    }

    /// Every parent→child edge, as positions
    pub fn edges(&self) -> Vec<(Point<D>, Point<D>)> {
        self.nodes
            .iter()
            .filter_map(|n| n.parent.map(|p| (self.nodes[p.index()].position, n.position)))
            .collect()
    }

    /// Check the structural and cost invariants of the whole tree.
    ///
    /// `tolerance` is relative to the magnitude of the cost.
    pub fn validate(&self, tolerance: f64) -> Result<(), TreeInvariantError> {
        for (i, node) in self.nodes.iter().enumerate() {
            match node.parent {
                None if i == 0 => {
                    if node.cost != 0.0 {
                        return Err(TreeInvariantError::CostMismatch {
                            node: 0,
                            expected: 0.0,
                            actual: node.cost,
                        });
                    }
                }
                None => return Err(TreeInvariantError::RootViolation(i)),
                Some(_) if i == 0 => return Err(TreeInvariantError::RootViolation(0)),
                Some(parent) => {
                    if !self.contains(parent) {
                        return Err(TreeInvariantError::StaleHandle(parent));
                    }
                    let p = &self.nodes[parent.index()];
                    let expected = p.cost + p.position.distance(&node.position);
                    if (expected - node.cost).abs() > tolerance * expected.abs().max(1.0) {
                        return Err(TreeInvariantError::CostMismatch {
                            node: i,
                            expected,
                            actual: node.cost,
                        });
                    }
                    let listed = p.children.iter().filter(|c| c.index() == i).count();
                    if listed != 1 {
                        return Err(TreeInvariantError::ChildMismatch(parent.index()));
                    }
                }
            }

            for child in &node.children {
                if self.nodes.get(child.index()).and_then(|c| c.parent).map(|p| p.index()) != Some(i) {
                    return Err(TreeInvariantError::ChildMismatch(i));
                }
            }
        }
        self.check_acyclic()
    }

    /// Every parent chain must end at the root. Linear in the tree size.
    fn check_acyclic(&self) -> Result<(), TreeInvariantError> {
        const UNSEEN: u8 = 0;
        const ON_PATH: u8 = 1;
        const REACHES_ROOT: u8 = 2;

        let mut state = vec![UNSEEN; self.nodes.len()];
        state[0] = REACHES_ROOT;
        let mut walk = Vec::new();

        for start in 0..self.nodes.len() {
            let mut current = start;
            while state[current] == UNSEEN {
                state[current] = ON_PATH;
                walk.push(current);
                match self.nodes[current].parent {
                    Some(parent) => current = parent.index(),
                    None => return Err(TreeInvariantError::RootViolation(current)),
                }
            }
            if state[current] == ON_PATH {
                return Err(TreeInvariantError::Cycle(current));
            }
            for &visited in &walk {
                state[visited] = REACHES_ROOT;
            }
            walk.clear();
        }
        Ok(())
    }
}
