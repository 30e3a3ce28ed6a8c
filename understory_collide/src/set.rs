// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Registry of collisions addressed by generational ids.

use alloc::vec::Vec;

use crate::collision::Collision;

/// Identifier for a [`Collision`] in a [`CollisionSet`].
///
/// Slot index plus generation, like a
/// [`TransformId`](understory_transform_tree::TransformId): a removed
/// collision's id goes stale and never aliases a later one. Ids order by slot,
/// then generation, which is the order overlap results use.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct CollisionId(u32, u32);

impl CollisionId {
    const fn idx(self) -> usize {
        self.0 as usize
    }

    const fn generation(self) -> u32 {
        self.1
    }
}

/// The collisions taking part in overlap checks.
///
/// Only collisions registered here are seen by an
/// [`OverlapChecker`](crate::OverlapChecker). The set owns them; their
/// transforms live in the [`TransformTree`](understory_transform_tree::TransformTree).
pub struct CollisionSet {
    slots: Vec<Option<Collision>>,
    generations: Vec<u32>,
    free_list: Vec<usize>,
}

impl core::fmt::Debug for CollisionSet {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CollisionSet")
            .field("slots_total", &self.slots.len())
            .field("alive", &self.len())
            .field("free_list", &self.free_list.len())
            .finish_non_exhaustive()
    }
}

impl Default for CollisionSet {
    fn default() -> Self {
        Self::new()
    }
}

impl CollisionSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
        }
    }

    /// Register a collision.
    pub fn insert(&mut self, collision: Collision) -> CollisionId {
        let idx = if let Some(idx) = self.free_list.pop() {
            self.generations[idx] = self.generations[idx].saturating_add(1);
            self.slots[idx] = Some(collision);
            idx
        } else {
            self.slots.push(Some(collision));
            self.generations.push(1);
            self.slots.len() - 1
        };
        #[allow(
            clippy::cast_possible_truncation,
            reason = "CollisionId uses 32-bit indices by design."
        )]
        CollisionId(idx as u32, self.generations[idx])
    }

    /// Unregister a collision and hand it back.
    ///
    /// Its transforms stay in the tree; call
    /// [`Collision::dispose`] to free them.
    pub fn remove(&mut self, id: CollisionId) -> Option<Collision> {
        if !self.is_alive(id) {
            return None;
        }
        self.free_list.push(id.idx());
        self.slots[id.idx()].take()
    }

    /// Returns true if `id` refers to a registered collision.
    #[must_use]
    pub fn is_alive(&self, id: CollisionId) -> bool {
        self.generations.get(id.idx()) == Some(&id.generation())
            && self.slots[id.idx()].is_some()
    }

    /// Borrow a collision.
    pub fn get(&self, id: CollisionId) -> Option<&Collision> {
        if self.is_alive(id) {
            self.slots[id.idx()].as_ref()
        } else {
            None
        }
    }

    /// Mutably borrow a collision.
    pub fn get_mut(&mut self, id: CollisionId) -> Option<&mut Collision> {
        if self.is_alive(id) {
            self.slots[id.idx()].as_mut()
        } else {
            None
        }
    }

    /// Number of registered collisions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len() - self.free_list.len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate registered collisions in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (CollisionId, &Collision)> + '_ {
        self.slots.iter().enumerate().filter_map(|(idx, slot)| {
            #[allow(
                clippy::cast_possible_truncation,
                reason = "CollisionId uses 32-bit indices by design."
            )]
            let id = CollisionId(idx as u32, self.generations[idx]);
            slot.as_ref().map(|c| (id, c))
        })
    }

    /// Mutably iterate registered collisions in ascending id order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (CollisionId, &mut Collision)> + '_ {
        let generations = &self.generations;
        self.slots.iter_mut().enumerate().filter_map(move |(idx, slot)| {
            #[allow(
                clippy::cast_possible_truncation,
                reason = "CollisionId uses 32-bit indices by design."
            )]
            let id = CollisionId(idx as u32, generations[idx]);
            slot.as_mut().map(|c| (id, c))
        })
    }
}
