// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A collidable entity: a transform node, its shapes, and its group.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use kurbo::Affine;
use smallvec::SmallVec;
use understory_broad_phase::Box2D;
use understory_transform_tree::{TransformId, TransformTree, TreeError};

use crate::group::CollisionGroup;
use crate::shape::CollisionShape;

/// Error returned by [`Collision`] shape management. Nothing changes when one
/// is returned.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CollisionError {
    /// A shape with this transform is already part of the collision.
    AlreadyPresent(TransformId),
    /// No shape with this transform is part of the collision.
    NotPresent(TransformId),
    /// The transform tree rejected the change.
    Tree(TreeError),
}

impl fmt::Display for CollisionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyPresent(id) => write!(f, "shape {id:?} is already in this collision"),
            Self::NotPresent(id) => write!(f, "shape {id:?} is not in this collision"),
            Self::Tree(err) => write!(f, "transform tree: {err}"),
        }
    }
}

impl core::error::Error for CollisionError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Tree(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TreeError> for CollisionError {
    fn from(err: TreeError) -> Self {
        Self::Tree(err)
    }
}

/// A collidable entity.
///
/// A collision owns a transform node and a list of shapes whose transforms
/// hang under it. Its world boxes are the union of its shapes' boxes, read
/// from the tree's cached globals.
///
/// Defaults: enabled, not huge-numbered, group [`CollisionGroup::ALL`].
#[derive(Debug)]
pub struct Collision {
    transform: TransformId,
    shapes: SmallVec<[Box<dyn CollisionShape>; 2]>,
    group: CollisionGroup,
    enabled: bool,
    huge_number: bool,
}

impl Collision {
    /// Creates a collision with a fresh identity transform in `tree`.
    pub fn new(tree: &mut TransformTree) -> Self {
        Self::with_transform(tree.insert(Affine::IDENTITY))
    }

    /// Creates a collision bound to an existing transform node.
    pub fn with_transform(transform: TransformId) -> Self {
        Self {
            transform,
            shapes: SmallVec::new(),
            group: CollisionGroup::default(),
            enabled: true,
            huge_number: false,
        }
    }

    /// The collision's own transform node.
    pub fn transform(&self) -> TransformId {
        self.transform
    }

    /// Adds a shape and parents its transform under this collision.
    ///
    /// The shape's local transform is kept, so it becomes an offset from the
    /// collision.
    pub fn add_shape<S: CollisionShape + 'static>(
        &mut self,
        tree: &mut TransformTree,
        shape: S,
    ) -> Result<(), CollisionError> {
        self.add_boxed_shape(tree, Box::new(shape))
    }

    /// Boxed form of [`Collision::add_shape`].
    pub fn add_boxed_shape(
        &mut self,
        tree: &mut TransformTree,
        shape: Box<dyn CollisionShape>,
    ) -> Result<(), CollisionError> {
        let id = shape.transform();
        if self.contains_shape(id) {
            return Err(CollisionError::AlreadyPresent(id));
        }
        tree.attach_child(self.transform, id, false)?;
        self.shapes.push(shape);
        Ok(())
    }

    /// Removes the shape whose transform is `shape` and returns it.
    ///
    /// If the shape's transform is still parented under this collision it is
    /// detached and becomes a root again, keeping its local transform.
    pub fn remove_shape(
        &mut self,
        tree: &mut TransformTree,
        shape: TransformId,
    ) -> Result<Box<dyn CollisionShape>, CollisionError> {
        let pos = self
            .shapes
            .iter()
            .position(|s| s.transform() == shape)
            .ok_or(CollisionError::NotPresent(shape))?;
        if tree.parent(shape) == Some(self.transform) {
            tree.detach_child(self.transform, shape, false)?;
        }
        Ok(self.shapes.remove(pos))
    }

    /// True when a shape with this transform is part of the collision.
    pub fn contains_shape(&self, shape: TransformId) -> bool {
        self.shapes.iter().any(|s| s.transform() == shape)
    }

    /// The collision's shapes, in insertion order.
    pub fn shapes(&self) -> impl Iterator<Item = &dyn CollisionShape> + '_ {
        self.shapes.iter().map(|s| &**s)
    }

    /// Mutable access to the shape with the given transform.
    pub fn shape_mut(&mut self, shape: TransformId) -> Option<&mut (dyn CollisionShape + 'static)> {
        self.shapes
            .iter_mut()
            .find(|s| s.transform() == shape)
            .map(|s| &mut **s)
    }

    /// Number of shapes.
    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    /// Appends the world boxes of every shape to `out`.
    ///
    /// Shapes whose transform is no longer alive contribute nothing.
    pub fn box2ds(&self, tree: &TransformTree, out: &mut Vec<Box2D>) {
        for shape in &self.shapes {
            if let Some(global) = tree.global(shape.transform()) {
                shape.box2ds(global, out);
            }
        }
    }

    /// Marks the collision as a very large object, such as the world bounds
    /// or a level wall.
    ///
    /// Huge-numbered collisions are never tested against each other, only
    /// against everything else.
    pub fn set_is_huge_number(&mut self, huge_number: bool) {
        self.huge_number = huge_number;
    }

    /// See [`Collision::set_is_huge_number`].
    pub fn is_huge_number(&self) -> bool {
        self.huge_number
    }

    /// Replaces the category/mask group.
    pub fn set_group(&mut self, group: CollisionGroup) {
        self.group = group;
    }

    /// The category/mask group.
    pub fn group(&self) -> CollisionGroup {
        self.group
    }

    /// True when this collision's mask accepts `other`'s category.
    ///
    /// Directional, and independent of whether either side is enabled.
    pub fn can_collide_with(&self, other: &Self) -> bool {
        self.group.can_collide_with(&other.group)
    }

    /// Enables or disables overlap reporting. Disabled collisions are skipped
    /// entirely by the checker.
    pub fn set_enable(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// See [`Collision::set_enable`].
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Removes this collision's transform and all of its shape transforms
    /// from `tree`, and drops its shapes.
    ///
    /// Shapes may be nested under each other in any way. Fails without
    /// changing anything if one of those nodes has a child that belongs to
    /// neither this collision nor its shapes; detach that child and call
    /// again. On success [`Collision::transform`] is stale.
    pub fn dispose(&mut self, tree: &mut TransformTree) -> Result<(), CollisionError> {
        let mut nodes: Vec<TransformId> = core::iter::once(self.transform)
            .chain(self.shapes.iter().map(|s| s.transform()))
            .filter(|&id| tree.is_alive(id))
            .collect();
        for &id in &nodes {
            if tree.children(id).iter().any(|c| !nodes.contains(c)) {
                return Err(TreeError::HasChildren(id).into());
            }
        }
        // Children sit one level below their parent, so deepest first empties
        // every node before it is removed.
        nodes.sort_by_key(|&id| core::cmp::Reverse(tree.depth(id)));
        for id in nodes {
            tree.remove(id)?;
        }
        self.shapes.clear();
        Ok(())
    }
}
