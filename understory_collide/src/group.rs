// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Collision categories, category/mask groups, and named group tables.

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

bitflags::bitflags! {
    /// Category bits a collision belongs to, or accepts, in a [`CollisionGroup`].
    ///
    /// The named bits cover the built-in presets. Any other bit of the `u32` is
    /// free for application use via [`CollisionCategory::from_bits_retain`].
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct CollisionCategory: u32 {
        /// The player body.
        const PLAYER        = 1 << 0;
        /// Enemy bodies.
        const ENEMY         = 1 << 1;
        /// Projectiles fired by the player.
        const PLAYER_BULLET = 1 << 2;
        /// Projectiles fired by enemies.
        const ENEMY_BULLET  = 1 << 3;
        /// Pickups.
        const ITEM          = 1 << 4;
        /// Static level geometry.
        const TERRAIN       = 1 << 5;
        /// Pickup radius around the player.
        const PLAYER_SENSOR = 1 << 6;
    }
}

impl Default for CollisionCategory {
    fn default() -> Self {
        Self::empty()
    }
}

/// A `(category, mask)` pair deciding which collisions report each other.
///
/// Filtering is directional: `a` is interested in `b` when `a.mask` shares a
/// bit with `b.category`. It is not symmetric, so an overlapping pair may be
/// reported to only one side.
///
/// ```rust
/// use understory_collide::CollisionGroup;
///
/// assert!(CollisionGroup::PLAYER.can_collide_with(&CollisionGroup::ITEM));
/// assert!(!CollisionGroup::PLAYER_BULLET.can_collide_with(&CollisionGroup::PLAYER));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CollisionGroup {
    /// Bits this collision belongs to.
    pub category: CollisionCategory,
    /// Bits this collision accepts.
    pub mask: CollisionCategory,
}

impl CollisionGroup {
    /// Interested in nothing, and of no interest to anyone.
    pub const NOTHING: Self = Self::from_bits(0, 0);
    /// Every bit set in both fields.
    pub const ALL: Self = Self::from_bits(u32::MAX, u32::MAX);
    /// The player: hit by enemies, enemy bullets, items, and terrain.
    pub const PLAYER: Self = Self::new(
        CollisionCategory::PLAYER,
        CollisionCategory::ENEMY
            .union(CollisionCategory::ENEMY_BULLET)
            .union(CollisionCategory::ITEM)
            .union(CollisionCategory::TERRAIN),
    );
    /// Enemies: hit by the player, player bullets, and terrain.
    pub const ENEMY: Self = Self::new(
        CollisionCategory::ENEMY,
        CollisionCategory::PLAYER
            .union(CollisionCategory::PLAYER_BULLET)
            .union(CollisionCategory::TERRAIN),
    );
    /// Player bullets: hit enemies and terrain.
    pub const PLAYER_BULLET: Self = Self::new(
        CollisionCategory::PLAYER_BULLET,
        CollisionCategory::ENEMY.union(CollisionCategory::TERRAIN),
    );
    /// Enemy bullets: hit the player and terrain.
    pub const ENEMY_BULLET: Self = Self::new(
        CollisionCategory::ENEMY_BULLET,
        CollisionCategory::PLAYER.union(CollisionCategory::TERRAIN),
    );
    /// Items: picked up by the player or the player's sensor.
    pub const ITEM: Self = Self::new(
        CollisionCategory::ITEM,
        CollisionCategory::PLAYER.union(CollisionCategory::PLAYER_SENSOR),
    );
    /// Terrain: blocks every moving body and bullet.
    pub const TERRAIN: Self = Self::new(
        CollisionCategory::TERRAIN,
        CollisionCategory::PLAYER
            .union(CollisionCategory::ENEMY)
            .union(CollisionCategory::PLAYER_BULLET)
            .union(CollisionCategory::ENEMY_BULLET),
    );
    /// The player's pickup sensor: only sees items.
    pub const PLAYER_SENSOR: Self =
        Self::new(CollisionCategory::PLAYER_SENSOR, CollisionCategory::ITEM);

    /// Creates a group from typed bits.
    pub const fn new(category: CollisionCategory, mask: CollisionCategory) -> Self {
        Self { category, mask }
    }

    /// Creates a group from raw bits, keeping bits with no name.
    pub const fn from_bits(category: u32, mask: u32) -> Self {
        Self::new(
            CollisionCategory::from_bits_retain(category),
            CollisionCategory::from_bits_retain(mask),
        )
    }

    /// True when `self` accepts `other`'s category.
    pub const fn can_collide_with(&self, other: &Self) -> bool {
        self.mask.intersects(other.category)
    }
}

impl Default for CollisionGroup {
    fn default() -> Self {
        Self::ALL
    }
}

/// Groups by name, as loaded from configuration.
///
/// Under the `serde` feature this (de)serializes as a plain map from name to
/// `{ "category": ..., "mask": ... }`, with categories written as bitflags text
/// such as `"PLAYER | ITEM"`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct GroupTable {
    groups: BTreeMap<String, CollisionGroup>,
}

impl GroupTable {
    /// Names of the built-in presets, paired with their groups.
    pub const PRESETS: [(&'static str, CollisionGroup); 9] = [
        ("nothing", CollisionGroup::NOTHING),
        ("all", CollisionGroup::ALL),
        ("player", CollisionGroup::PLAYER),
        ("enemy", CollisionGroup::ENEMY),
        ("playerBullet", CollisionGroup::PLAYER_BULLET),
        ("enemyBullet", CollisionGroup::ENEMY_BULLET),
        ("item", CollisionGroup::ITEM),
        ("terrain", CollisionGroup::TERRAIN),
        ("playerSensor", CollisionGroup::PLAYER_SENSOR),
    ];

    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// A table holding every preset under its name.
    pub fn presets() -> Self {
        Self {
            groups: Self::PRESETS
                .iter()
                .map(|&(name, group)| (name.to_string(), group))
                .collect(),
        }
    }

    /// Looks up a group by name.
    pub fn get(&self, name: &str) -> Option<CollisionGroup> {
        self.groups.get(name).copied()
    }

    /// Adds or replaces a group, returning the previous one.
    pub fn insert(&mut self, name: impl Into<String>, group: CollisionGroup) -> Option<CollisionGroup> {
        self.groups.insert(name.into(), group)
    }

    /// Removes a group by name.
    pub fn remove(&mut self, name: &str) -> Option<CollisionGroup> {
        self.groups.remove(name)
    }

    /// Number of named groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// True when the table holds no groups.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Iterates groups in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, CollisionGroup)> + '_ {
        self.groups.iter().map(|(name, &group)| (name.as_str(), group))
    }
}
