// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Explainability hooks for overlap checks.
//!
//! An [`OverlapResult`](crate::OverlapResult) says who overlaps whom, but not
//! why a pair that touched was left out. When that matters (tuning groups,
//! chasing a missing hit) pass an [`OverlapTrace`] to
//! [`OverlapChecker::check_with_trace`](crate::OverlapChecker::check_with_trace).
//! [`OverlapRecorder`] keeps the last check's partition and every box pair's
//! filter decision.

use hashbrown::HashMap;

use crate::set::CollisionId;

/// Which of the two intersection passes produced a box pair.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum PairPhase {
    /// A regular collision against a huge-numbered one.
    AgainstHuge,
    /// Two regular collisions.
    AmongRegular,
}

/// How a check split the registered collisions.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Partition {
    /// Collisions skipped because they were disabled.
    pub disabled: usize,
    /// Enabled huge-numbered collisions.
    pub huge: usize,
    /// Enabled regular collisions.
    pub regular: usize,
    /// World boxes extracted from huge-numbered collisions.
    pub huge_boxes: usize,
    /// World boxes extracted from regular collisions.
    pub regular_boxes: usize,
}

/// A callback sink for overlap checks.
pub trait OverlapTrace {
    /// Called once, after collisions are split and their boxes extracted.
    fn partitioned(&mut self, partition: &Partition);

    /// Called for every overlapping box pair. `a` and `b` are equal when two
    /// shapes of the same collision touch.
    ///
    /// `a_to_b` is true when `a`'s mask accepted `b`, and `b_to_a` the other
    /// way round. A pair with both false was filtered out entirely.
    fn box_pair(
        &mut self,
        a: CollisionId,
        b: CollisionId,
        phase: PairPhase,
        a_to_b: bool,
        b_to_a: bool,
    );

    /// Called once with the number of collisions that have a non-empty result.
    fn finished(&mut self, reported: usize);
}

impl OverlapTrace for () {
    fn partitioned(&mut self, _partition: &Partition) {}

    fn box_pair(&mut self, _: CollisionId, _: CollisionId, _: PairPhase, _: bool, _: bool) {}

    fn finished(&mut self, _reported: usize) {}
}

/// The filter decision recorded for a pair of collisions.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct PairRecord {
    /// Pass that found the pair.
    pub phase: PairPhase,
    /// The first collision accepted the second.
    pub a_to_b: bool,
    /// The second collision accepted the first.
    pub b_to_a: bool,
}

/// Records the partition and per-pair decisions of the last traced check.
///
/// Pairs are keyed per collision pair, so several touching boxes of the same
/// two collisions collapse into one record.
#[derive(Clone, Debug, Default)]
pub struct OverlapRecorder {
    partition: Partition,
    pairs: HashMap<(CollisionId, CollisionId), PairRecord>,
    reported: usize,
}

impl OverlapRecorder {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Forgets everything recorded so far.
    pub fn clear(&mut self) {
        self.partition = Partition::default();
        self.pairs.clear();
        self.reported = 0;
    }

    /// The partition of the last check.
    #[must_use]
    pub fn partition(&self) -> Partition {
        self.partition
    }

    /// Number of collisions the last check reported.
    #[must_use]
    pub fn reported(&self) -> usize {
        self.reported
    }

    /// Number of distinct collision pairs whose boxes touched.
    #[must_use]
    pub fn touching_pairs(&self) -> usize {
        self.pairs.len()
    }

    /// Why `a` and `b` were or were not reported, seen from `a`.
    ///
    /// `None` means no box of `a` touched a box of `b` in an intersection
    /// pass: they were apart, one was disabled, or both were huge-numbered.
    #[must_use]
    pub fn explain(&self, a: CollisionId, b: CollisionId) -> Option<PairRecord> {
        let (key, flipped) = if a <= b { ((a, b), false) } else { ((b, a), true) };
        self.pairs.get(&key).map(|r| {
            if flipped {
                PairRecord {
                    phase: r.phase,
                    a_to_b: r.b_to_a,
                    b_to_a: r.a_to_b,
                }
            } else {
                *r
            }
        })
    }
}

impl OverlapTrace for OverlapRecorder {
    fn partitioned(&mut self, partition: &Partition) {
        self.clear();
        self.partition = *partition;
    }

    fn box_pair(
        &mut self,
        a: CollisionId,
        b: CollisionId,
        phase: PairPhase,
        a_to_b: bool,
        b_to_a: bool,
    ) {
        let record = if a <= b {
            PairRecord { phase, a_to_b, b_to_a }
        } else {
            PairRecord {
                phase,
                a_to_b: b_to_a,
                b_to_a: a_to_b,
            }
        };
        self.pairs.entry((a.min(b), a.max(b))).or_insert(record);
    }

    fn finished(&mut self, reported: usize) {
        self.reported = reported;
    }
}
