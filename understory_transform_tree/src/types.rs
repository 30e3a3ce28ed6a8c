// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the transform tree: node identifiers and errors.

use core::fmt;

/// Identifier for a transformation node in a [`TransformTree`](crate::TransformTree).
///
/// This is a small, copyable handle that stays stable across updates but becomes
/// invalid when the underlying slot is reused.
/// It consists of a slot index and a generation counter.
///
/// ## Semantics
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On remove, the slot is freed; any existing `TransformId` that pointed to that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `TransformId`.
///
/// Use [`TransformTree::is_alive`](crate::TransformTree::is_alive) to check liveness.
/// Stale ids never alias a different live node because the generation must match.
///
/// Holding a `TransformId` does not keep the node alive; parent links inside the
/// tree are ids too, so the tree never owns nodes through its edges.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct TransformId(pub(crate) u32, pub(crate) u32);

impl TransformId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    pub(crate) const fn generation(self) -> u32 {
        self.1
    }
}

/// Error returned by tree mutations. No mutation happens when one is returned.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TreeError {
    /// The id does not refer to a live node.
    Stale(TransformId),
    /// Attaching `child` under `parent` would make a node its own ancestor.
    WouldCreateCycle {
        /// The requested parent.
        parent: TransformId,
        /// The requested child (equal to, or an ancestor of, `parent`).
        child: TransformId,
    },
    /// `child` is not currently a child of `parent`.
    NotAChild {
        /// The node expected to be the parent.
        parent: TransformId,
        /// The node expected to be its child.
        child: TransformId,
    },
    /// The node still has children; detach them before removing it.
    HasChildren(TransformId),
    /// A world-preserving reparent needed to invert this node's global matrix,
    /// but the matrix is singular.
    Singular(TransformId),
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stale(id) => write!(f, "transform {id:?} is not alive"),
            Self::WouldCreateCycle { parent, child } => write!(
                f,
                "attaching {child:?} under {parent:?} would create a cycle"
            ),
            Self::NotAChild { parent, child } => {
                write!(f, "{child:?} is not a child of {parent:?}")
            }
            Self::HasChildren(id) => write!(f, "transform {id:?} still has children"),
            Self::Singular(id) => {
                write!(f, "global matrix of {id:?} is singular and cannot be inverted")
            }
        }
    }
}

impl core::error::Error for TreeError {}
