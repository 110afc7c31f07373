// Copyright 2025 the Layerboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ordered edge index: four sorted maps from an edge coordinate to the payloads on that edge.

use alloc::collections::{BTreeMap, BTreeSet};
use core::fmt::Debug;

use crate::types::Aabb2D;

type EdgeMap<T, P> = BTreeMap<T, BTreeSet<P>>;

/// Spatial index over the four edges of each AABB.
///
/// Every payload is filed once under each of its box's edges (`max_x`, `max_y`, `min_x`,
/// `min_y`). A query is answered with four closed range scans whose results are intersected,
/// so the cost is `O(log n + k)` per edge plus `O(k)` for the intersection.
///
/// The index does not remember which box a payload was added with; callers pass the same
/// box back to [`remove`](Self::remove).
pub struct CartesianIndex<T: Copy + Ord + Debug, P: Copy + Ord + Debug> {
    max_x: EdgeMap<T, P>,
    max_y: EdgeMap<T, P>,
    min_x: EdgeMap<T, P>,
    min_y: EdgeMap<T, P>,
}

impl<T: Copy + Ord + Debug, P: Copy + Ord + Debug> Default for CartesianIndex<T, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy + Ord + Debug, P: Copy + Ord + Debug> Debug for CartesianIndex<T, P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CartesianIndex")
            .field("payloads", &self.len())
            .field("distinct_min_x", &self.min_x.len())
            .field("distinct_min_y", &self.min_y.len())
            .finish_non_exhaustive()
    }
}

impl<T: Copy + Ord + Debug, P: Copy + Ord + Debug> CartesianIndex<T, P> {
    /// Create an empty index.
    pub const fn new() -> Self {
        Self {
            max_x: BTreeMap::new(),
            max_y: BTreeMap::new(),
            min_x: BTreeMap::new(),
            min_y: BTreeMap::new(),
        }
    }

    /// File `payload` under each edge of `aabb`.
    pub fn add(&mut self, aabb: &Aabb2D<T>, payload: P) {
        add_value(&mut self.max_x, aabb.max_x, payload);
        add_value(&mut self.max_y, aabb.max_y, payload);
        add_value(&mut self.min_x, aabb.min_x, payload);
        add_value(&mut self.min_y, aabb.min_y, payload);
    }

    /// Remove `payload` from each edge of `aabb`.
    ///
    /// Entries that are not present are ignored.
    pub fn remove(&mut self, aabb: &Aabb2D<T>, payload: P) {
        remove_value(&mut self.max_x, aabb.max_x, payload);
        remove_value(&mut self.max_y, aabb.max_y, payload);
        remove_value(&mut self.min_x, aabb.min_x, payload);
        remove_value(&mut self.min_y, aabb.min_y, payload);
    }

    /// Payloads whose box lies inside `query` (closed on every edge).
    ///
    /// This is the intersection of four membership tests: `max_x` and `min_x` in
    /// `[query.min_x, query.max_x]`, and `max_y` and `min_y` in `[query.min_y, query.max_y]`.
    /// A box that only straddles the query boundary is not reported.
    /// An inverted query matches nothing.
    pub fn filter(&self, query: &Aabb2D<T>) -> BTreeSet<P> {
        if query.is_empty() {
            return BTreeSet::new();
        }
        let mut hits = collect_range(&self.max_x, query.min_x, query.max_x);
        for (edges, lo, hi) in [
            (&self.min_x, query.min_x, query.max_x),
            (&self.max_y, query.min_y, query.max_y),
            (&self.min_y, query.min_y, query.max_y),
        ] {
            if hits.is_empty() {
                break;
            }
            let in_range = collect_range(edges, lo, hi);
            hits.retain(|p| in_range.contains(p));
        }
        hits
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.max_x.clear();
        self.max_y.clear();
        self.min_x.clear();
        self.min_y.clear();
    }

    /// Number of payloads currently filed.
    ///
    /// Counted on the `min_x` edge; each payload appears there exactly once while present.
    pub fn len(&self) -> usize {
        self.min_x.values().map(BTreeSet::len).sum()
    }

    /// True if nothing is filed.
    pub fn is_empty(&self) -> bool {
        self.min_x.is_empty()
    }

    /// Whether `payload` is filed under every edge of `aabb`.
    pub fn contains(&self, aabb: &Aabb2D<T>, payload: P) -> bool {
        [
            (&self.max_x, aabb.max_x),
            (&self.max_y, aabb.max_y),
            (&self.min_x, aabb.min_x),
            (&self.min_y, aabb.min_y),
        ]
        .into_iter()
        .all(|(edges, coord)| edges.get(&coord).is_some_and(|set| set.contains(&payload)))
    }
}

fn add_value<T: Ord, P: Ord>(edges: &mut EdgeMap<T, P>, coord: T, payload: P) {
    edges.entry(coord).or_default().insert(payload);
}

fn remove_value<T: Ord, P: Ord>(edges: &mut EdgeMap<T, P>, coord: T, payload: P) {
    if let Some(set) = edges.get_mut(&coord) {
        set.remove(&payload);
        if set.is_empty() {
            edges.remove(&coord);
        }
    }
}

fn collect_range<T: Copy + Ord, P: Copy + Ord>(edges: &EdgeMap<T, P>, lo: T, hi: T) -> BTreeSet<P> {
    edges
        .range(lo..=hi)
        .flat_map(|(_, set)| set.iter().copied())
        .collect()
}
