// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_broad_phase --heading-base-level=0

//! Understory Broad Phase: AABB pair finding for 2D scenes.
//!
//! This crate answers one question: given some axis-aligned boxes, which of
//! them overlap? It is the cheap candidate-generation pass that sits in front
//! of any precise shape test, and it deliberately knows nothing about what the
//! boxes belong to. Owners, groups, and filtering live a layer above (see
//! `understory_collide`).
//!
//! ## API overview
//!
//! - [`Box2D`]: `[min_x, min_y, max_x, max_y]` in world coordinates.
//! - [`BoxIntersector`]: the pluggable primitive with two queries:
//!   - [`BoxIntersector::all_vs_all`]: every overlapping pair inside one list.
//!   - [`BoxIntersector::alpha_vs_beta`]: every overlapping pair across two lists.
//! - Backends:
//!   - [`BruteForce`]: `O(n^2)` reference. Small and simple; good for tiny sets and tests.
//!   - [`SweepAndPrune`]: sort by `min_x` and sweep an active list. The default choice.
//!   - [`UniformGrid`]: hashes boxes into fixed-size cells (feature `backend_grid`).
//!
//! ## Boundary convention
//!
//! Overlap is **inclusive**: boxes that share an edge or only a corner overlap.
//! Treating contact as overlap avoids pairs flickering in and out while two
//! objects rest against each other.
//!
//! ## Determinism
//!
//! Every backend writes pairs sorted ascending by `(i, j)` and never emits a
//! pair twice. For `all_vs_all`, pairs are canonical (`i < j`). Given the same
//! input, all backends produce the same output.
//!
//! ```rust
//! use understory_broad_phase::{Box2D, BoxIntersector, SweepAndPrune};
//!
//! let boxes = [
//!     Box2D::new(0.0, 0.0, 10.0, 10.0),
//!     Box2D::new(5.0, 5.0, 15.0, 15.0),
//!     Box2D::new(20.0, 20.0, 30.0, 30.0),
//! ];
//! let mut sap = SweepAndPrune::new();
//! let mut pairs = Vec::new();
//! sap.all_vs_all(&boxes, &mut pairs);
//! assert_eq!(pairs, [(0, 1)]);
//! ```
//!
//! Float inputs are assumed to be finite (no NaNs) and boxes well-formed
//! (`min <= max` on both axes).
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod backends;
mod intersector;
mod types;

#[cfg(feature = "backend_grid")]
pub use backends::grid::UniformGrid;
pub use backends::{brute_force::BruteForce, sweep::SweepAndPrune};
pub use intersector::BoxIntersector;
pub use types::Box2D;
