// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Brute-force backend with nested linear scans. Small and simple; good for tiny sets.

use alloc::vec::Vec;

use crate::intersector::BoxIntersector;
use crate::types::Box2D;

/// Brute-force backend testing every candidate pair.
///
/// Nested loops visit pairs in ascending `(i, j)` order, so no sort is needed.
#[derive(Clone, Copy, Debug, Default)]
pub struct BruteForce;

impl BruteForce {
    /// Creates the backend.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl BoxIntersector for BruteForce {
    fn all_vs_all(&mut self, boxes: &[Box2D], out: &mut Vec<(usize, usize)>) {
        out.clear();
        for (i, a) in boxes.iter().enumerate() {
            for (j, b) in boxes.iter().enumerate().skip(i + 1) {
                if a.overlaps(b) {
                    out.push((i, j));
                }
            }
        }
    }

    fn alpha_vs_beta(&mut self, alpha: &[Box2D], beta: &[Box2D], out: &mut Vec<(usize, usize)>) {
        out.clear();
        for (i, a) in alpha.iter().enumerate() {
            for (j, b) in beta.iter().enumerate() {
                if a.overlaps(b) {
                    out.push((i, j));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn finds_overlaps_in_canonical_order() {
        let boxes = [
            Box2D::new(0.0, 0.0, 2.0, 2.0),
            Box2D::new(100.0, 0.0, 101.0, 1.0),
            Box2D::new(1.0, 0.0, 3.0, 2.0),
            Box2D::new(0.5, 0.5, 1.5, 1.5),
        ];
        let pairs = BruteForce.collect_all_vs_all(&boxes);
        assert_eq!(pairs, vec![(0, 2), (0, 3), (2, 3)]);
    }

    #[test]
    fn alpha_vs_beta_ignores_same_side_pairs() {
        let alpha = [Box2D::new(0.0, 0.0, 1.0, 1.0), Box2D::new(0.0, 0.0, 1.0, 1.0)];
        let beta = [Box2D::new(5.0, 5.0, 6.0, 6.0), Box2D::new(0.5, 0.5, 0.6, 0.6)];
        let pairs = BruteForce.collect_alpha_vs_beta(&alpha, &beta);
        assert_eq!(pairs, vec![(0, 1), (1, 1)]);
    }

    #[test]
    fn out_is_cleared_between_calls() {
        let boxes = [Box2D::new(0.0, 0.0, 1.0, 1.0), Box2D::new(0.0, 0.0, 1.0, 1.0)];
        let mut out = vec![(7, 7)];
        BruteForce.all_vs_all(&boxes, &mut out);
        assert_eq!(out, vec![(0, 1)]);
        BruteForce.all_vs_all(&[], &mut out);
        assert!(out.is_empty());
    }
}
