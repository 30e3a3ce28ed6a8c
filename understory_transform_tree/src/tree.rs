// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: structure, reparenting, propagation.

use alloc::vec::Vec;
use kurbo::Affine;

use crate::types::{TransformId, TreeError};

/// Arena of transformation nodes forming a forest.
///
/// Every node has a local matrix and a cached global matrix
/// (`global = parent.global * local`, or `local` for roots). Unlike a
/// commit-based tree, every mutation propagates eagerly through the affected
/// subtree before returning, so [`TransformTree::global`] is never stale.
pub struct TransformTree {
    nodes: Vec<Option<Node>>, // slots
    generations: Vec<u32>,    // last generation per slot (persists across frees)
    free_list: Vec<usize>,
}

impl core::fmt::Debug for TransformTree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        let free = self.free_list.len();
        f.debug_struct("TransformTree")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &free)
            .finish_non_exhaustive()
    }
}

impl Default for TransformTree {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Debug)]
struct Node {
    generation: u32,
    parent: Option<TransformId>,
    children: Vec<TransformId>,
    local: Affine,
    global: Affine,
}

impl Node {
    fn new(generation: u32, local: Affine) -> Self {
        Self {
            generation,
            parent: None,
            children: Vec::new(),
            local,
            global: local,
        }
    }
}

impl TransformTree {
    /// Create a new empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
        }
    }

    /// Insert a new root node with the given local matrix.
    ///
    /// A root's global matrix equals its local matrix.
    pub fn insert(&mut self, local: Affine) -> TransformId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, local));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "TransformId uses 32-bit indices by design."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node::new(generation, local)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "TransformId uses 32-bit indices by design."
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        TransformId::new(idx, generation)
    }

    /// Insert a new node directly under `parent`.
    ///
    /// `local` is interpreted relative to the parent, as with a
    /// non-world-preserving [`attach_child`](Self::attach_child).
    pub fn insert_under(
        &mut self,
        parent: TransformId,
        local: Affine,
    ) -> Result<TransformId, TreeError> {
        if !self.is_alive(parent) {
            return Err(TreeError::Stale(parent));
        }
        let id = self.insert(local);
        self.link_parent(id, parent);
        let parent_global = self.node(parent).global;
        self.propagate(id, parent_global);
        Ok(id)
    }

    /// Remove a node, detaching it from its parent first.
    ///
    /// Removal never cascades: a node that still has children is rejected with
    /// [`TreeError::HasChildren`]. Returns the node's last local matrix.
    pub fn remove(&mut self, id: TransformId) -> Result<Affine, TreeError> {
        let node = self.try_node(id)?;
        if !node.children.is_empty() {
            return Err(TreeError::HasChildren(id));
        }
        let parent = node.parent;
        if let Some(parent) = parent {
            self.unlink_parent(id, parent);
        }
        let local = self.node(id).local;
        self.nodes[id.idx()] = None;
        self.free_list.push(id.idx());
        Ok(local)
    }

    /// Returns true if `id` refers to a live node.
    ///
    /// A `TransformId` is considered live if its slot exists and its generation matches
    /// the current generation stored in that slot.
    #[must_use]
    pub fn is_alive(&self, id: TransformId) -> bool {
        self.nodes
            .get(id.idx())
            .and_then(|n| n.as_ref())
            .is_some_and(|n| n.generation == id.generation())
    }

    /// Number of live nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len() - self.free_list.len()
    }

    /// Returns `true` if the tree has no live nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Local matrix of a live node, relative to its parent.
    #[must_use]
    pub fn local(&self, id: TransformId) -> Option<Affine> {
        self.get(id).map(|n| n.local)
    }

    /// Global matrix of a live node, mapping its local space into root space.
    #[must_use]
    pub fn global(&self, id: TransformId) -> Option<Affine> {
        self.get(id).map(|n| n.global)
    }

    /// Parent of a live node, or `None` for roots and stale ids.
    ///
    /// The parent link is a structural relation only; it does not keep either node alive.
    #[must_use]
    pub fn parent(&self, id: TransformId) -> Option<TransformId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Children of a node in attachment order, or an empty slice if the node is stale.
    #[must_use]
    pub fn children(&self, id: TransformId) -> &[TransformId] {
        match self.get(id) {
            Some(n) => &n.children,
            None => &[],
        }
    }

    /// Iterate over all live root nodes in slot order.
    pub fn roots(&self) -> impl Iterator<Item = TransformId> + '_ {
        self.nodes.iter().enumerate().filter_map(|(i, n)| match n {
            Some(n) if n.parent.is_none() =>
            {
                #[allow(
                    clippy::cast_possible_truncation,
                    reason = "TransformId uses 32-bit indices by design."
                )]
                Some(TransformId::new(i as u32, n.generation))
            }
            _ => None,
        })
    }

    /// Depth-first pre-order iterator over `id` and all of its descendants.
    ///
    /// Yields nothing for a stale id.
    pub fn subtree(&self, id: TransformId) -> Subtree<'_> {
        let mut stack = Vec::new();
        if self.is_alive(id) {
            stack.push(id);
        }
        Subtree { tree: self, stack }
    }

    /// Depth of a node (roots have depth 1), or 0 if the id is stale.
    #[must_use]
    pub fn depth(&self, mut id: TransformId) -> usize {
        if !self.is_alive(id) {
            return 0;
        }
        let mut d = 0;
        loop {
            d += 1;
            match self.node(id).parent {
                Some(p) => id = p,
                None => break,
            }
        }
        d
    }

    /// Returns `true` if `ancestor` is a strict ancestor of `node`.
    #[must_use]
    pub fn is_ancestor_of(&self, ancestor: TransformId, node: TransformId) -> bool {
        let mut cursor = self.parent(node);
        while let Some(p) = cursor {
            if p == ancestor {
                return true;
            }
            cursor = self.node(p).parent;
        }
        false
    }

    /// Replace the local matrix of a node.
    ///
    /// The node's global matrix is recomputed from its parent's current global,
    /// then every descendant is recomputed depth-first before this returns.
    pub fn set_local(&mut self, id: TransformId, local: Affine) -> Result<(), TreeError> {
        let parent = {
            let node = self.try_node_mut(id)?;
            node.local = local;
            node.parent
        };
        let parent_global = parent.map_or(Affine::IDENTITY, |p| self.node(p).global);
        self.propagate(id, parent_global);
        Ok(())
    }

    /// Attach `child` under `parent`.
    ///
    /// If `child` already has a parent it is detached from it first. Attaching a
    /// node under itself or under one of its own descendants fails with
    /// [`TreeError::WouldCreateCycle`].
    ///
    /// With `keep_world_transform`, the child's local matrix is rewritten to
    /// `inverse(parent.global) * child.global` so its world pose is unchanged;
    /// this fails with [`TreeError::Singular`] if the parent's global matrix
    /// cannot be inverted. Otherwise the local matrix is kept and the world pose
    /// moves with the new parent.
    ///
    /// All checks run before any mutation.
    pub fn attach_child(
        &mut self,
        parent: TransformId,
        child: TransformId,
        keep_world_transform: bool,
    ) -> Result<(), TreeError> {
        let parent_global = self.try_node(parent)?.global;
        let child_global = self.try_node(child)?.global;
        if parent == child || self.is_ancestor_of(child, parent) {
            #[cfg(feature = "tracing")]
            tracing::debug!(?parent, ?child, "rejected attach: would create a cycle");
            return Err(TreeError::WouldCreateCycle { parent, child });
        }
        let new_local = if keep_world_transform {
            if !is_invertible(parent_global) {
                return Err(TreeError::Singular(parent));
            }
            Some(parent_global.inverse() * child_global)
        } else {
            None
        };

        let old_parent = self.node(child).parent;
        if let Some(old_parent) = old_parent {
            self.unlink_parent(child, old_parent);
        }
        self.link_parent(child, parent);
        if let Some(local) = new_local {
            self.node_mut(child).local = local;
        }
        self.propagate(child, parent_global);
        Ok(())
    }

    /// Detach `child` from `parent`, turning it into a root.
    ///
    /// With `keep_world_transform`, the child's local matrix becomes its
    /// pre-detach global matrix so its world pose is unchanged. Otherwise the
    /// local matrix is kept and the global matrix becomes equal to it.
    pub fn detach_child(
        &mut self,
        parent: TransformId,
        child: TransformId,
        keep_world_transform: bool,
    ) -> Result<(), TreeError> {
        self.try_node(parent)?;
        let (current_parent, global) = {
            let node = self.try_node(child)?;
            (node.parent, node.global)
        };
        if current_parent != Some(parent) {
            return Err(TreeError::NotAChild { parent, child });
        }
        self.unlink_parent(child, parent);
        if keep_world_transform {
            self.node_mut(child).local = global;
        }
        self.propagate(child, Affine::IDENTITY);
        Ok(())
    }

    /// Returns `inverse(base.global) * id.global`: the pose of `id` expressed in `base`'s space.
    ///
    /// Works for any two live nodes, in the same tree branch or not. Returns
    /// `None` if either id is stale or `base`'s global matrix is singular.
    #[must_use]
    pub fn calc_relative_from(&self, id: TransformId, base: TransformId) -> Option<Affine> {
        let global = self.global(id)?;
        let base_global = self.global(base)?;
        is_invertible(base_global).then(|| base_global.inverse() * global)
    }
}

/// Iterator returned by [`TransformTree::subtree`].
#[derive(Debug)]
pub struct Subtree<'a> {
    tree: &'a TransformTree,
    stack: Vec<TransformId>,
}

impl Iterator for Subtree<'_> {
    type Item = TransformId;

    fn next(&mut self) -> Option<TransformId> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.tree.children(id).iter().rev().copied());
        Some(id)
    }
}

#[inline]
fn is_invertible(m: Affine) -> bool {
    let det = m.determinant();
    det != 0.0 && det.is_finite()
}

impl TransformTree {
    // --- internals ---

    fn get(&self, id: TransformId) -> Option<&Node> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        (n.generation == id.generation()).then_some(n)
    }

    fn try_node(&self, id: TransformId) -> Result<&Node, TreeError> {
        self.get(id).ok_or(TreeError::Stale(id))
    }

    fn try_node_mut(&mut self, id: TransformId) -> Result<&mut Node, TreeError> {
        let n = self
            .nodes
            .get_mut(id.idx())
            .and_then(|n| n.as_mut())
            .filter(|n| n.generation == id.generation());
        n.ok_or(TreeError::Stale(id))
    }

    /// Access a live node; panics if `id` is stale.
    ///
    /// Only called after liveness was checked, or for ids read from parent/child
    /// links, which the tree keeps live.
    fn node(&self, id: TransformId) -> &Node {
        self.nodes[id.idx()].as_ref().expect("dangling TransformId")
    }

    fn node_mut(&mut self, id: TransformId) -> &mut Node {
        self.nodes[id.idx()].as_mut().expect("dangling TransformId")
    }

    fn link_parent(&mut self, id: TransformId, parent: TransformId) {
        self.node_mut(parent).children.push(id);
        self.node_mut(id).parent = Some(parent);
    }

    fn unlink_parent(&mut self, id: TransformId, parent: TransformId) {
        self.node_mut(parent).children.retain(|c| *c != id);
        self.node_mut(id).parent = None;
    }

    /// Recompute globals for `id` and its subtree, depth-first.
    fn propagate(&mut self, id: TransformId, parent_global: Affine) {
        let (global, child_count) = {
            let node = self.node_mut(id);
            node.global = parent_global * node.local;
            (node.global, node.children.len())
        };
        for k in 0..child_count {
            let child = self.node(id).children[k];
            self.propagate(child, global);
        }
    }
}
