// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sweep-and-prune (sort-and-sweep) backend along the x axis.

use alloc::vec::Vec;
use core::cmp::Ordering;

use crate::intersector::BoxIntersector;
use crate::types::Box2D;

/// Sweep-and-prune backend.
///
/// Boxes are sorted by `min_x` and swept left to right while keeping an active
/// list of boxes whose x extent still reaches the sweep line. Only boxes in the
/// active list are tested on y. Near-linear when few boxes share an x range;
/// degrades toward `O(n^2)` when everything overlaps on x.
///
/// The backend keeps its sort order and active lists between calls to avoid
/// reallocating every tick.
#[derive(Clone, Debug, Default)]
pub struct SweepAndPrune {
    order: Vec<Entry>,
    active_a: Vec<usize>,
    active_b: Vec<usize>,
}

#[derive(Clone, Copy, Debug)]
struct Entry {
    min_x: f64,
    side: Side,
    idx: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Side {
    Alpha,
    Beta,
}

impl SweepAndPrune {
    /// Creates the backend with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn sort_order(&mut self) {
        self.order.sort_unstable_by(|a, b| {
            a.min_x
                .total_cmp(&b.min_x)
                .then(a.side.cmp(&b.side))
                .then(a.idx.cmp(&b.idx))
        });
    }
}

#[inline]
fn overlaps_y(a: &Box2D, b: &Box2D) -> bool {
    a.min_y <= b.max_y && b.min_y <= a.max_y
}

#[inline]
fn cmp_pairs(a: &(usize, usize), b: &(usize, usize)) -> Ordering {
    a.0.cmp(&b.0).then(a.1.cmp(&b.1))
}

impl BoxIntersector for SweepAndPrune {
    fn all_vs_all(&mut self, boxes: &[Box2D], out: &mut Vec<(usize, usize)>) {
        out.clear();
        self.order.clear();
        self.order.extend(boxes.iter().enumerate().map(|(idx, b)| Entry {
            min_x: b.min_x,
            side: Side::Alpha,
            idx,
        }));
        self.sort_order();

        self.active_a.clear();
        for entry in &self.order {
            let current = &boxes[entry.idx];
            // Everything swept later starts at or right of `current.min_x`.
            self.active_a.retain(|&j| boxes[j].max_x >= current.min_x);
            for &j in &self.active_a {
                if overlaps_y(current, &boxes[j]) {
                    let pair = if j < entry.idx {
                        (j, entry.idx)
                    } else {
                        (entry.idx, j)
                    };
                    out.push(pair);
                }
            }
            self.active_a.push(entry.idx);
        }
        out.sort_unstable_by(cmp_pairs);
    }

    fn alpha_vs_beta(&mut self, alpha: &[Box2D], beta: &[Box2D], out: &mut Vec<(usize, usize)>) {
        out.clear();
        if alpha.is_empty() || beta.is_empty() {
            return;
        }
        self.order.clear();
        self.order.extend(alpha.iter().enumerate().map(|(idx, b)| Entry {
            min_x: b.min_x,
            side: Side::Alpha,
            idx,
        }));
        self.order.extend(beta.iter().enumerate().map(|(idx, b)| Entry {
            min_x: b.min_x,
            side: Side::Beta,
            idx,
        }));
        self.sort_order();

        self.active_a.clear();
        self.active_b.clear();
        for entry in &self.order {
            match entry.side {
                Side::Alpha => {
                    let current = &alpha[entry.idx];
                    self.active_b.retain(|&j| beta[j].max_x >= current.min_x);
                    for &j in &self.active_b {
                        if overlaps_y(current, &beta[j]) {
                            out.push((entry.idx, j));
                        }
                    }
                    self.active_a.push(entry.idx);
                }
                Side::Beta => {
                    let current = &beta[entry.idx];
                    self.active_a.retain(|&i| alpha[i].max_x >= current.min_x);
                    for &i in &self.active_a {
                        if overlaps_y(current, &alpha[i]) {
                            out.push((i, entry.idx));
                        }
                    }
                    self.active_b.push(entry.idx);
                }
            }
        }
        out.sort_unstable_by(cmp_pairs);
    }
}
