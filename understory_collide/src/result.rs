// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overlap results and the listener that consumes them.

use alloc::collections::BTreeMap;

use smallvec::SmallVec;

use crate::set::CollisionId;

/// Receives the overlaps of one collision.
///
/// Closures `FnMut(CollisionId, &[CollisionId])` implement this directly.
pub trait OverlapListener {
    /// `collision` touched every id in `partners` and accepted their category.
    ///
    /// `partners` is non-empty, sorted ascending, and free of duplicates.
    fn on_overlap(&mut self, collision: CollisionId, partners: &[CollisionId]);
}

impl<F> OverlapListener for F
where
    F: FnMut(CollisionId, &[CollisionId]),
{
    fn on_overlap(&mut self, collision: CollisionId, partners: &[CollisionId]) {
        self(collision, partners);
    }
}

/// Outcome of one [`OverlapChecker::check`](crate::OverlapChecker::check).
///
/// Maps each collision that accepted at least one overlapping partner to those
/// partners. Collisions with no accepted partner have no entry. Iteration is
/// in ascending id order, and so is each partner list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OverlapResult {
    entries: BTreeMap<CollisionId, SmallVec<[CollisionId; 4]>>,
}

impl OverlapResult {
    pub(crate) fn from_entries(entries: BTreeMap<CollisionId, SmallVec<[CollisionId; 4]>>) -> Self {
        debug_assert!(entries.values().all(|p| !p.is_empty()));
        Self { entries }
    }

    /// Number of collisions with at least one partner.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing overlapped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Partners accepted by `collision`, or `None` if it has none.
    #[must_use]
    pub fn partners(&self, collision: CollisionId) -> Option<&[CollisionId]> {
        self.entries.get(&collision).map(|p| p.as_slice())
    }

    /// True when `collision` has an entry.
    #[must_use]
    pub fn contains(&self, collision: CollisionId) -> bool {
        self.entries.contains_key(&collision)
    }

    /// True when `a` accepted an overlap with `b`. Directional.
    #[must_use]
    pub fn overlaps(&self, a: CollisionId, b: CollisionId) -> bool {
        self.partners(a).is_some_and(|p| p.binary_search(&b).is_ok())
    }

    /// Iterates `(collision, partners)` in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (CollisionId, &[CollisionId])> + '_ {
        self.entries.iter().map(|(&id, p)| (id, p.as_slice()))
    }

    /// Calls `listener` once per entry, in ascending id order.
    pub fn notify<L: OverlapListener + ?Sized>(&self, listener: &mut L) {
        for (id, partners) in self.iter() {
            listener.on_overlap(id, partners);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Collision, CollisionSet};
    use alloc::vec::Vec;
    use smallvec::smallvec;
    use understory_transform_tree::TransformTree;

    #[derive(Default)]
    struct Counter {
        calls: Vec<(CollisionId, usize)>,
    }

    impl OverlapListener for Counter {
        fn on_overlap(&mut self, collision: CollisionId, partners: &[CollisionId]) {
            self.calls.push((collision, partners.len()));
        }
    }

    #[test]
    fn notify_visits_entries_in_order() {
        let mut tree = TransformTree::new();
        let mut set = CollisionSet::new();
        let [a, b, c] = [(); 3].map(|()| set.insert(Collision::new(&mut tree)));
        let mut entries = BTreeMap::new();
        entries.insert(c, smallvec![a]);
        entries.insert(a, smallvec![b, c]);
        let result = OverlapResult::from_entries(entries);

        let mut counter = Counter::default();
        result.notify(&mut counter);
        assert_eq!(counter.calls, [(a, 2), (c, 1)]);

        assert!(result.overlaps(a, c));
        assert!(!result.overlaps(c, b));
        assert!(!result.contains(b));
        assert_eq!(result.partners(b), None);
    }
}
