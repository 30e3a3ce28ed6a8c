// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Uniform grid backend: boxes are hashed into fixed-size square cells.

use alloc::vec::Vec;

use hashbrown::{HashMap, HashSet};
use smallvec::SmallVec;

use crate::intersector::BoxIntersector;
use crate::types::Box2D;

type Cell = (i32, i32);

/// Spatial-hash backend over a uniform grid of square cells.
///
/// Works well when boxes have similar sizes close to `cell_size`. A box that
/// would cover more than [`UniformGrid::max_cells_per_box`] cells is kept in a
/// separate oversized list and tested linearly, so one world-sized box does
/// not flood the grid.
///
/// Pairs found in several shared cells are reported once.
#[derive(Clone, Debug)]
pub struct UniformGrid {
    cell_size: f64,
    max_cells_per_box: usize,
    cells: HashMap<Cell, SmallVec<[usize; 8]>>,
    oversized: Vec<usize>,
    seen: HashSet<(usize, usize)>,
}

impl Default for UniformGrid {
    fn default() -> Self {
        Self::new(64.0)
    }
}

impl UniformGrid {
    /// Default limit on how many cells one box may cover before it is treated as oversized.
    pub const DEFAULT_MAX_CELLS_PER_BOX: usize = 64;

    /// Creates a grid with the given cell edge length.
    ///
    /// Non-positive or non-finite sizes fall back to `1.0`.
    #[must_use]
    pub fn new(cell_size: f64) -> Self {
        let cell_size = if cell_size.is_finite() && cell_size > 0.0 {
            cell_size
        } else {
            1.0
        };
        Self {
            cell_size,
            max_cells_per_box: Self::DEFAULT_MAX_CELLS_PER_BOX,
            cells: HashMap::new(),
            oversized: Vec::new(),
            seen: HashSet::new(),
        }
    }

    /// Sets how many cells a single box may cover before it is treated as oversized.
    #[must_use]
    pub fn with_max_cells_per_box(mut self, max: usize) -> Self {
        self.max_cells_per_box = max.max(1);
        self
    }

    /// Returns the cell edge length.
    #[must_use]
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Returns the oversized threshold in cells.
    #[must_use]
    pub fn max_cells_per_box(&self) -> usize {
        self.max_cells_per_box
    }

    fn cell_of(&self, v: f64) -> i32 {
        floor_to_i32(v / self.cell_size)
    }

    /// Inclusive cell range covered by `b`, or `None` if it is oversized.
    fn cell_range(&self, b: &Box2D) -> Option<(Cell, Cell)> {
        let lo = (self.cell_of(b.min_x), self.cell_of(b.min_y));
        let hi = (self.cell_of(b.max_x), self.cell_of(b.max_y));
        let nx = usize::try_from(i64::from(hi.0) - i64::from(lo.0) + 1).unwrap_or(usize::MAX);
        let ny = usize::try_from(i64::from(hi.1) - i64::from(lo.1) + 1).unwrap_or(usize::MAX);
        (nx.saturating_mul(ny) <= self.max_cells_per_box).then_some((lo, hi))
    }

    /// Refills the cell map from `boxes`. Only occupied cells are kept.
    fn rebuild(&mut self, boxes: &[Box2D]) {
        self.cells.clear();
        self.oversized.clear();
        for (idx, b) in boxes.iter().enumerate() {
            match self.cell_range(b) {
                Some((lo, hi)) => {
                    for cx in lo.0..=hi.0 {
                        for cy in lo.1..=hi.1 {
                            self.cells.entry((cx, cy)).or_default().push(idx);
                        }
                    }
                }
                None => self.oversized.push(idx),
            }
        }
    }

    fn finish(&mut self, out: &mut Vec<(usize, usize)>) {
        out.extend(self.seen.drain());
        out.sort_unstable();
    }
}

/// Floor of `v` as a saturating `i32`, without relying on `std` float methods.
fn floor_to_i32(v: f64) -> i32 {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Float to int casts saturate; grid coordinates beyond i32 collapse into edge cells."
    )]
    let t = v as i32;
    if f64::from(t) > v { t.saturating_sub(1) } else { t }
}

impl BoxIntersector for UniformGrid {
    fn all_vs_all(&mut self, boxes: &[Box2D], out: &mut Vec<(usize, usize)>) {
        out.clear();
        self.seen.clear();
        self.rebuild(boxes);

        for bucket in self.cells.values() {
            for (k, &i) in bucket.iter().enumerate() {
                for &j in &bucket[k + 1..] {
                    if boxes[i].overlaps(&boxes[j]) {
                        self.seen.insert(if i < j { (i, j) } else { (j, i) });
                    }
                }
            }
        }
        for &o in &self.oversized {
            for (j, b) in boxes.iter().enumerate() {
                if j != o && boxes[o].overlaps(b) {
                    self.seen.insert(if o < j { (o, j) } else { (j, o) });
                }
            }
        }
        self.finish(out);
    }

    fn alpha_vs_beta(&mut self, alpha: &[Box2D], beta: &[Box2D], out: &mut Vec<(usize, usize)>) {
        out.clear();
        self.seen.clear();
        if alpha.is_empty() || beta.is_empty() {
            return;
        }
        self.rebuild(beta);

        for (i, a) in alpha.iter().enumerate() {
            match self.cell_range(a) {
                Some((lo, hi)) => {
                    for cx in lo.0..=hi.0 {
                        for cy in lo.1..=hi.1 {
                            let Some(bucket) = self.cells.get(&(cx, cy)) else {
                                continue;
                            };
                            for &j in bucket {
                                if a.overlaps(&beta[j]) {
                                    self.seen.insert((i, j));
                                }
                            }
                        }
                    }
                }
                None => {
                    for (j, b) in beta.iter().enumerate() {
                        if a.overlaps(b) {
                            self.seen.insert((i, j));
                        }
                    }
                }
            }
            for &j in &self.oversized {
                if a.overlaps(&beta[j]) {
                    self.seen.insert((i, j));
                }
            }
        }
        self.finish(out);
    }
}
