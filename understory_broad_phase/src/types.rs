// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The axis-aligned box type shared by every backend.

/// Axis-aligned bounding box in world coordinates, `[min_x, min_y, max_x, max_y]`.
///
/// Boxes are expected to be well-formed: `min_x <= max_x` and `min_y <= max_y`.
/// A zero-area box (a point or a segment) is valid and still overlaps anything
/// it touches.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Box2D {
    /// Minimum x (left edge).
    pub min_x: f64,
    /// Minimum y (top edge in y-down spaces).
    pub min_y: f64,
    /// Maximum x (right edge).
    pub max_x: f64,
    /// Maximum y.
    pub max_y: f64,
}

impl Box2D {
    /// Creates a box from its corner coordinates.
    #[must_use]
    pub const fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Creates a box centered at `(cx, cy)` with half extents `(hx, hy)`.
    ///
    /// Negative half extents are treated as their absolute value, so a mirrored
    /// transform still yields a well-formed box.
    #[must_use]
    pub fn from_center_half_extents(cx: f64, cy: f64, hx: f64, hy: f64) -> Self {
        let hx = hx.abs();
        let hy = hy.abs();
        Self::new(cx - hx, cy - hy, cx + hx, cy + hy)
    }

    /// Creates a box from `[min_x, min_y, max_x, max_y]`.
    #[must_use]
    pub const fn from_array(a: [f64; 4]) -> Self {
        Self::new(a[0], a[1], a[2], a[3])
    }

    /// Returns `[min_x, min_y, max_x, max_y]`.
    #[must_use]
    pub const fn to_array(self) -> [f64; 4] {
        [self.min_x, self.min_y, self.max_x, self.max_y]
    }

    /// Width of the box.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Height of the box.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Returns `true` if the box is inverted on either axis.
    ///
    /// Zero-area boxes are not empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.max_x < self.min_x || self.max_y < self.min_y
    }

    /// Returns `true` if the two boxes overlap, including edge and corner contact.
    #[inline]
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.min_x <= other.max_x
            && other.min_x <= self.max_x
            && self.min_y <= other.max_y
            && other.min_y <= self.max_y
    }

    /// Returns `true` if the point lies inside or on the boundary of the box.
    #[must_use]
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }

    /// Smallest box containing both boxes.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self::new(
            self.min_x.min(other.min_x),
            self.min_y.min(other.min_y),
            self.max_x.max(other.max_x),
            self.max_y.max(other.max_y),
        )
    }
}
