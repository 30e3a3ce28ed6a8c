// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_transform_tree --heading-base-level=0

//! Understory Transform Tree: a Kurbo-native scene graph of 2D affine transformations.
//!
//! Each node holds a local [`kurbo::Affine`] and a cached global matrix
//! (`parent.global * local`, or just `local` for roots). The tree keeps that
//! cache exact at all times: every mutation recomputes the affected subtree
//! depth-first before returning, so there is no commit step and no stale read.
//!
//! Nodes live in an arena and are addressed by generational [`TransformId`]s.
//! Parent and child links are ids, never owning references, which makes
//! dangling links impossible to observe: a freed node's id simply stops being
//! [alive](TransformTree::is_alive).
//!
//! ## API overview
//!
//! - [`TransformTree`]: the arena.
//! - [`TransformId`]: generational handle of a node.
//! - [`TreeError`]: why a mutation was rejected. Rejected mutations change nothing.
//!
//! Key operations:
//! - [`TransformTree::insert`] / [`TransformTree::insert_under`] / [`TransformTree::remove`]
//! - [`TransformTree::set_local`], [`TransformTree::local`], [`TransformTree::global`]
//! - [`TransformTree::attach_child`] / [`TransformTree::detach_child`], both with an
//!   optional world-preserving mode.
//! - [`TransformTree::calc_relative_from`]: pose of one node in another node's space.
//!
//! ## Reparenting
//!
//! ```rust
//! use kurbo::Affine;
//! use understory_transform_tree::TransformTree;
//!
//! let mut tree = TransformTree::new();
//! let ship = tree.insert(Affine::translate((100.0, 50.0)));
//! let turret = tree.insert(Affine::translate((110.0, 50.0)));
//!
//! // Keep the turret where it is on screen; its local becomes (10, 0).
//! tree.attach_child(ship, turret, true).unwrap();
//! assert_eq!(tree.local(turret), Some(Affine::translate((10.0, 0.0))));
//!
//! // Moving the ship moves the turret immediately.
//! tree.set_local(ship, Affine::translate((0.0, 0.0))).unwrap();
//! assert_eq!(tree.global(turret), Some(Affine::translate((10.0, 0.0))));
//!
//! // Attaching the ship under its own turret is rejected.
//! assert!(tree.attach_child(turret, ship, false).is_err());
//! ```
//!
//! ## Lifetimes
//!
//! Removing a node never cascades. A node with children cannot be removed until
//! its owner detaches them, mirroring the rule that the parent/child relation is
//! topological, not ownership.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod tree;
mod types;

pub use tree::{Subtree, TransformTree};
pub use types::{TransformId, TreeError};
