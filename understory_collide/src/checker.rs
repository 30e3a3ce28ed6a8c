// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Batched overlap detection over a [`CollisionSet`].

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use hashbrown::HashSet;
use smallvec::SmallVec;
use understory_broad_phase::{Box2D, BoxIntersector, SweepAndPrune};
use understory_transform_tree::TransformTree;

use crate::collision::Collision;
use crate::group::CollisionGroup;
use crate::result::{OverlapListener, OverlapResult};
use crate::set::{CollisionId, CollisionSet};
use crate::trace::{OverlapTrace, PairPhase, Partition};

/// Flat boxes of one partition, each tagged with its participant index.
#[derive(Clone, Debug, Default)]
struct Extraction {
    boxes: Vec<Box2D>,
    owners: Vec<usize>,
}

impl Extraction {
    fn clear(&mut self) {
        self.boxes.clear();
        self.owners.clear();
    }

    fn push(&mut self, collision: &Collision, tree: &TransformTree, owner: usize) {
        collision.box2ds(tree, &mut self.boxes);
        self.owners.resize(self.boxes.len(), owner);
    }

    fn owner(&self, box_index: usize) -> usize {
        match self.owners.get(box_index) {
            Some(&owner) => owner,
            None => unreachable!(
                "intersector returned box index {box_index} but only {} boxes were extracted",
                self.owners.len()
            ),
        }
    }
}

#[derive(Copy, Clone, Debug)]
struct Participant {
    id: CollisionId,
    group: CollisionGroup,
}

/// Finds which collisions overlap, once per tick.
///
/// Each [`check`](Self::check):
/// 1. skips disabled collisions,
/// 2. splits the rest into huge-numbered and regular collisions and flattens
///    their shapes into world boxes,
/// 3. intersects regular boxes against huge-numbered boxes, then regular
///    boxes among themselves (huge-numbered collisions are never tested
///    against each other),
/// 4. for every touching pair of boxes, records `a -> b` if the owner `a`
///    accepts `b`'s category and `b -> a` if `b` accepts `a`'s.
///
/// Two shapes of the same collision touching each other count too: a
/// collision whose mask accepts its own category then lists itself as a
/// partner.
///
/// The box intersection itself is delegated to a [`BoxIntersector`],
/// [`SweepAndPrune`] by default. Scratch buffers are kept between calls.
///
/// ```rust
/// use kurbo::{Affine, Size};
/// use understory_collide::{
///     Collision, CollisionGroup, CollisionSet, OverlapChecker, RectCollisionShape,
/// };
/// use understory_transform_tree::TransformTree;
///
/// let mut tree = TransformTree::new();
/// let mut set = CollisionSet::new();
///
/// let mut spawn = |tree: &mut TransformTree, x: f64, group: CollisionGroup| {
///     let mut col = Collision::new(tree);
///     col.set_group(group);
///     tree.set_local(col.transform(), Affine::translate((x, 0.0))).unwrap();
///     let rect = RectCollisionShape::new(tree, Size::new(10.0, 10.0));
///     col.add_shape(tree, rect).unwrap();
///     set.insert(col)
/// };
/// let player = spawn(&mut tree, 0.0, CollisionGroup::PLAYER);
/// let coin = spawn(&mut tree, 8.0, CollisionGroup::ITEM);
///
/// let result = OverlapChecker::new().check(&set, &tree);
/// assert_eq!(result.partners(player), Some(&[coin][..]));
/// assert_eq!(result.partners(coin), Some(&[player][..]));
/// ```
#[derive(Clone, Debug)]
pub struct OverlapChecker<I = SweepAndPrune> {
    intersector: I,
    participants: Vec<Participant>,
    huge: Extraction,
    regular: Extraction,
    pairs: Vec<(usize, usize)>,
    edges: HashSet<(usize, usize)>,
}

impl OverlapChecker {
    /// Creates a checker backed by [`SweepAndPrune`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_intersector(SweepAndPrune::new())
    }
}

impl Default for OverlapChecker {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: BoxIntersector> OverlapChecker<I> {
    /// Creates a checker backed by the given intersector.
    pub fn with_intersector(intersector: I) -> Self {
        Self {
            intersector,
            participants: Vec::new(),
            huge: Extraction::default(),
            regular: Extraction::default(),
            pairs: Vec::new(),
            edges: HashSet::new(),
        }
    }

    /// The box intersector.
    pub fn intersector(&self) -> &I {
        &self.intersector
    }

    /// Mutable access to the box intersector, e.g. to retune a grid.
    pub fn intersector_mut(&mut self) -> &mut I {
        &mut self.intersector
    }

    /// Runs one overlap check.
    ///
    /// Boxes are read from the tree's cached globals, so the result reflects
    /// every transform change made before the call.
    pub fn check(&mut self, set: &CollisionSet, tree: &TransformTree) -> OverlapResult {
        self.check_with_trace(set, tree, &mut ())
    }

    /// Runs one overlap check, then hands each entry to `listener` exactly
    /// once, in ascending id order.
    pub fn check_and_notify<L: OverlapListener + ?Sized>(
        &mut self,
        set: &CollisionSet,
        tree: &TransformTree,
        listener: &mut L,
    ) -> OverlapResult {
        let result = self.check(set, tree);
        result.notify(listener);
        result
    }

    /// Like [`check`](Self::check), reporting the partition and every box pair
    /// decision to `trace`.
    pub fn check_with_trace<T: OverlapTrace + ?Sized>(
        &mut self,
        set: &CollisionSet,
        tree: &TransformTree,
        trace: &mut T,
    ) -> OverlapResult {
        self.participants.clear();
        self.huge.clear();
        self.regular.clear();
        self.edges.clear();

        let mut partition = Partition::default();
        for (id, collision) in set.iter() {
            if !collision.is_enabled() {
                partition.disabled += 1;
                continue;
            }
            let owner = self.participants.len();
            self.participants.push(Participant {
                id,
                group: collision.group(),
            });
            if collision.is_huge_number() {
                partition.huge += 1;
                self.huge.push(collision, tree, owner);
            } else {
                partition.regular += 1;
                self.regular.push(collision, tree, owner);
            }
        }
        partition.huge_boxes = self.huge.boxes.len();
        partition.regular_boxes = self.regular.boxes.len();
        trace.partitioned(&partition);

        self.intersector
            .alpha_vs_beta(&self.regular.boxes, &self.huge.boxes, &mut self.pairs);
        for &(i, j) in &self.pairs {
            let a = self.regular.owner(i);
            let b = self.huge.owner(j);
            resolve(&self.participants, &mut self.edges, a, b, PairPhase::AgainstHuge, trace);
        }

        self.intersector
            .all_vs_all(&self.regular.boxes, &mut self.pairs);
        for &(i, j) in &self.pairs {
            let a = self.regular.owner(i);
            let b = self.regular.owner(j);
            resolve(&self.participants, &mut self.edges, a, b, PairPhase::AmongRegular, trace);
        }

        let mut entries: BTreeMap<CollisionId, SmallVec<[CollisionId; 4]>> = BTreeMap::new();
        for &(from, to) in &self.edges {
            entries
                .entry(self.participants[from].id)
                .or_default()
                .push(self.participants[to].id);
        }
        for partners in entries.values_mut() {
            partners.sort_unstable();
        }
        let result = OverlapResult::from_entries(entries);
        trace.finished(result.len());

        #[cfg(feature = "tracing")]
        tracing::debug!(
            disabled = partition.disabled,
            huge = partition.huge,
            regular = partition.regular,
            boxes = partition.huge_boxes + partition.regular_boxes,
            edges = self.edges.len(),
            reported = result.len(),
            "overlap check finished"
        );

        result
    }
}

/// Applies both directional filters to one touching box pair.
fn resolve<T: OverlapTrace + ?Sized>(
    participants: &[Participant],
    edges: &mut HashSet<(usize, usize)>,
    a: usize,
    b: usize,
    phase: PairPhase,
    trace: &mut T,
) {
    let (pa, pb) = (participants[a], participants[b]);
    let a_to_b = pa.group.can_collide_with(&pb.group);
    let b_to_a = pb.group.can_collide_with(&pa.group);
    trace.box_pair(pa.id, pb.id, phase, a_to_b, b_to_a);
    #[cfg(feature = "tracing")]
    tracing::trace!(a = ?pa.id, b = ?pb.id, ?phase, a_to_b, b_to_a, "box pair");
    if a_to_b {
        edges.insert((a, b));
    }
    if b_to_a {
        edges.insert((b, a));
    }
}
