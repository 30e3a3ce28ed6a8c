// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The box intersection primitive implemented by every backend.

use alloc::vec::Vec;

use crate::types::Box2D;

/// Pair-finding strategy over flat lists of boxes.
///
/// Indices in the output refer to positions in the input slices. Implementations
/// take `&mut self` so they can keep scratch buffers across calls; they hold no
/// state that affects results, so calling twice with the same input yields the
/// same output.
///
/// Contract shared by all methods:
/// - `out` is cleared first, then filled.
/// - Overlap is inclusive on edges and corners (see [`Box2D::overlaps`]).
/// - No pair is written twice.
/// - Pairs are sorted ascending by `(i, j)`.
pub trait BoxIntersector {
    /// Writes every pair `(i, j)` with `i < j` such that `boxes[i]` overlaps `boxes[j]`.
    fn all_vs_all(&mut self, boxes: &[Box2D], out: &mut Vec<(usize, usize)>);

    /// Writes every pair `(i, j)` such that `alpha[i]` overlaps `beta[j]`.
    ///
    /// Pairs within `alpha` or within `beta` are never reported.
    fn alpha_vs_beta(&mut self, alpha: &[Box2D], beta: &[Box2D], out: &mut Vec<(usize, usize)>);

    /// Collects [`BoxIntersector::all_vs_all`] into a fresh vector.
    fn collect_all_vs_all(&mut self, boxes: &[Box2D]) -> Vec<(usize, usize)> {
        let mut out = Vec::new();
        self.all_vs_all(boxes, &mut out);
        out
    }

    /// Collects [`BoxIntersector::alpha_vs_beta`] into a fresh vector.
    fn collect_alpha_vs_beta(&mut self, alpha: &[Box2D], beta: &[Box2D]) -> Vec<(usize, usize)> {
        let mut out = Vec::new();
        self.alpha_vs_beta(alpha, beta, &mut out);
        out
    }
}

impl<I: BoxIntersector + ?Sized> BoxIntersector for &mut I {
    fn all_vs_all(&mut self, boxes: &[Box2D], out: &mut Vec<(usize, usize)>) {
        (**self).all_vs_all(boxes, out);
    }

    fn alpha_vs_beta(&mut self, alpha: &[Box2D], beta: &[Box2D], out: &mut Vec<(usize, usize)>) {
        (**self).alpha_vs_beta(alpha, beta, out);
    }
}
