// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_collide --heading-base-level=0

//! Understory Collide: category-filtered broad-phase overlap detection for 2D games.
//!
//! A [`Collision`] is an entity with a transform node in an
//! [`understory_transform_tree::TransformTree`], one or more
//! [`CollisionShape`]s hanging under that node, and a [`CollisionGroup`]
//! saying what it is and what it cares about. Collisions registered in a
//! [`CollisionSet`] are checked once per tick by an [`OverlapChecker`], which
//! returns an [`OverlapResult`]: for every collision, the partners it touched
//! and accepted.
//!
//! ## API overview
//!
//! - Groups: [`CollisionCategory`] bits, [`CollisionGroup`] `(category, mask)`
//!   pairs with built-in presets, and [`GroupTable`] for named groups.
//! - Shapes: [`CollisionShape`], with [`RectCollisionShape`] and
//!   [`CircleCollisionShape`].
//! - Entities: [`Collision`], registered in a [`CollisionSet`] under a
//!   [`CollisionId`].
//! - Checking: [`OverlapChecker`], generic over an
//!   [`understory_broad_phase::BoxIntersector`].
//! - Delivery: [`OverlapResult::notify`] and [`OverlapListener`].
//! - Explainability: [`OverlapTrace`] and [`OverlapRecorder`].
//!
//! ## Filtering
//!
//! Reporting is directional. When boxes of `a` and `b` touch, `b` is added to
//! `a`'s partners if `a`'s mask shares a bit with `b`'s category, and `a` to
//! `b`'s partners if the reverse holds. Either, both, or neither may happen.
//!
//! Disabled collisions are skipped entirely. Collisions flagged
//! [huge-numbered](Collision::set_is_huge_number) (world bounds, level walls)
//! are tested against everything else but never against each other.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::{Affine, Size};
//! use understory_collide::{
//!     CircleCollisionShape, Collision, CollisionGroup, CollisionId, CollisionSet,
//!     OverlapChecker, RectCollisionShape,
//! };
//! use understory_transform_tree::TransformTree;
//!
//! let mut tree = TransformTree::new();
//! let mut set = CollisionSet::new();
//!
//! let mut player = Collision::new(&mut tree);
//! player.set_group(CollisionGroup::PLAYER);
//! let body = RectCollisionShape::new(&mut tree, Size::new(16.0, 16.0));
//! player.add_shape(&mut tree, body).unwrap();
//! let player_tf = player.transform();
//! let player = set.insert(player);
//!
//! let mut bullet = Collision::new(&mut tree);
//! bullet.set_group(CollisionGroup::ENEMY_BULLET);
//! let tip = CircleCollisionShape::new(&mut tree, 2.0);
//! bullet.add_shape(&mut tree, tip).unwrap();
//! tree.set_local(bullet.transform(), Affine::translate((40.0, 0.0))).unwrap();
//! let bullet = set.insert(bullet);
//!
//! let mut checker = OverlapChecker::new();
//! assert!(checker.check(&set, &tree).is_empty());
//!
//! // Walk into the bullet.
//! tree.set_local(player_tf, Affine::translate((32.0, 0.0))).unwrap();
//! let mut hits = Vec::new();
//! let mut on_hit = |id: CollisionId, partners: &[CollisionId]| {
//!     hits.push((id, partners.to_vec()));
//! };
//! checker.check_and_notify(&set, &tree, &mut on_hit);
//! assert_eq!(hits, [(player, vec![bullet]), (bullet, vec![player])]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod checker;
mod collision;
mod group;
mod result;
mod set;
mod shape;
mod trace;

pub use checker::OverlapChecker;
pub use collision::{Collision, CollisionError};
pub use group::{CollisionCategory, CollisionGroup, GroupTable};
pub use result::{OverlapListener, OverlapResult};
pub use set::{CollisionId, CollisionSet};
pub use shape::{CircleCollisionShape, CollisionShape, RectCollisionShape, translation_and_scale};
pub use trace::{OverlapRecorder, OverlapTrace, PairPhase, PairRecord, Partition};

pub use understory_broad_phase::{Box2D, BoxIntersector, BruteForce, SweepAndPrune};
#[cfg(feature = "backend_grid")]
pub use understory_broad_phase::UniformGrid;
