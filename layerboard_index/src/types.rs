// Copyright 2025 the Layerboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primitive geometry types and helpers.

/// Axis-aligned bounding box in 2D with closed edges.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Aabb2D<T> {
    /// Minimum x (left)
    pub min_x: T,
    /// Minimum y (bottom)
    pub min_y: T,
    /// Maximum x (right)
    pub max_x: T,
    /// Maximum y (top)
    pub max_y: T,
}

impl<T> Aabb2D<T> {
    /// Create a new AABB from min/max corners.
    pub const fn new(min_x: T, min_y: T, max_x: T, max_y: T) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }
}

impl<T: Copy + Ord> Aabb2D<T> {
    /// Whether this AABB contains the point. Edges are inclusive.
    pub fn contains_point(&self, x: T, y: T) -> bool {
        self.min_x <= x && x <= self.max_x && self.min_y <= y && y <= self.max_y
    }

    /// Whether `other` lies entirely inside this AABB. Edges are inclusive.
    ///
    /// This is the relation answered by
    /// [`CartesianIndex::filter`](crate::CartesianIndex::filter).
    pub fn contains_aabb(&self, other: &Self) -> bool {
        self.contains_point(other.min_x, other.min_y) && self.contains_point(other.max_x, other.max_y)
    }

    /// Return true if the AABB is inverted on either axis.
    ///
    /// A degenerate box (zero width or height) is not empty: closed edges still cover a line.
    pub fn is_empty(&self) -> bool {
        self.max_x < self.min_x || self.max_y < self.min_y
    }
}

impl Aabb2D<i64> {
    /// Create an AABB from origin and size in i64.
    ///
    /// # Panics
    ///
    /// `x + w` and `y + h` use plain addition: with overflow checks on (debug builds) an
    /// overflowing sum panics, otherwise it wraps. Use [`from_xywh_i32`](Self::from_xywh_i32)
    /// for bounds that are exact for every input.
    pub const fn from_xywh(x: i64, y: i64, w: i64, h: i64) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x + w,
            max_y: y + h,
        }
    }

    /// Create an i64 AABB from 32-bit origin and size.
    ///
    /// Widening first keeps `x + w` exact for every pair of `i32` inputs.
    pub const fn from_xywh_i32(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self::from_xywh(x as i64, y as i64, w as i64, h as i64)
    }
}
