// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Collision shapes: geometry that turns a global transform into world boxes.

use alloc::vec::Vec;
use core::fmt;

use kurbo::{Affine, Size, Vec2};
use understory_broad_phase::Box2D;
use understory_transform_tree::{TransformId, TransformTree};

/// Geometry attached to a [`Collision`](crate::Collision).
///
/// A shape owns one transform node. The owning collision parents that node
/// under its own transform, so the shape follows the collision around the
/// scene while keeping its own local offset.
///
/// A shape's identity is its transform: a collision holds at most one shape
/// per [`TransformId`].
pub trait CollisionShape: fmt::Debug {
    /// The shape's transform node.
    fn transform(&self) -> TransformId;

    /// Appends this shape's world-space boxes for the given global transform.
    ///
    /// Implementations must only append; `out` may already hold boxes from
    /// other shapes.
    fn box2ds(&self, global: Affine, out: &mut Vec<Box2D>);
}

/// Splits an affine into its translation and per-axis scale.
///
/// The scale of each axis is the length of the matching column of the linear
/// part, so rotation and skew only show up as a change in length.
pub fn translation_and_scale(global: Affine) -> (Vec2, Vec2) {
    let [a, b, c, d, e, f] = global.as_coeffs();
    (
        Vec2::new(e, f),
        Vec2::new(Vec2::new(a, b).hypot(), Vec2::new(c, d).hypot()),
    )
}

/// An axis-aligned rectangle centered on its transform's origin.
///
/// The world box is centered at the global translation with extents
/// `size * scale`. Rotation is not applied: a rotated rectangle keeps its
/// unrotated, axis-aligned box.
#[derive(Clone, Debug)]
pub struct RectCollisionShape {
    transform: TransformId,
    size: Size,
}

impl RectCollisionShape {
    /// Creates a rectangle with a fresh identity transform in `tree`.
    pub fn new(tree: &mut TransformTree, size: Size) -> Self {
        Self::with_transform(tree.insert(Affine::IDENTITY), size)
    }

    /// Creates a rectangle bound to an existing transform node.
    pub fn with_transform(transform: TransformId, size: Size) -> Self {
        Self { transform, size }
    }

    /// Unscaled width and height.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Replaces the unscaled width and height.
    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }
}

impl CollisionShape for RectCollisionShape {
    fn transform(&self) -> TransformId {
        self.transform
    }

    fn box2ds(&self, global: Affine, out: &mut Vec<Box2D>) {
        let (center, scale) = translation_and_scale(global);
        out.push(Box2D::from_center_half_extents(
            center.x,
            center.y,
            self.size.width * scale.x * 0.5,
            self.size.height * scale.y * 0.5,
        ));
    }
}

/// A circle centered on its transform's origin, bounded by a square box.
///
/// Non-uniform scale uses the larger axis, so the box always contains the
/// scaled ellipse.
#[derive(Clone, Debug)]
pub struct CircleCollisionShape {
    transform: TransformId,
    radius: f64,
}

impl CircleCollisionShape {
    /// Creates a circle with a fresh identity transform in `tree`.
    pub fn new(tree: &mut TransformTree, radius: f64) -> Self {
        Self::with_transform(tree.insert(Affine::IDENTITY), radius)
    }

    /// Creates a circle bound to an existing transform node.
    pub fn with_transform(transform: TransformId, radius: f64) -> Self {
        Self { transform, radius }
    }

    /// Unscaled radius.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Replaces the unscaled radius.
    pub fn set_radius(&mut self, radius: f64) {
        self.radius = radius;
    }
}

impl CollisionShape for CircleCollisionShape {
    fn transform(&self) -> TransformId {
        self.transform
    }

    fn box2ds(&self, global: Affine, out: &mut Vec<Box2D>) {
        let (center, scale) = translation_and_scale(global);
        let half = self.radius * scale.x.max(scale.y);
        out.push(Box2D::from_center_half_extents(center.x, center.y, half, half));
    }
}
