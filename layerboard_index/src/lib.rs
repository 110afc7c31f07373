// Copyright 2025 the Layerboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layerboard Index: an ordered edge index for 2D AABBs.
//!
//! Layerboard Index answers "which boxes lie inside this rectangle?" for integer boxes.
//!
//! - Add and remove axis-aligned bounding boxes (AABBs) with small ordered payloads (ids).
//! - Filter by a query rectangle with closed edges.
//! - Results come back as a sorted set, so callers get a deterministic order for free.
//!
//! The index keeps four ordered maps, one per box edge. A query is four range scans
//! intersected together, which means a box matches only when all four of its edges fall
//! inside the query range on their axis. Boxes that merely straddle the query boundary are
//! not reported.
//!
//! It is generic over the scalar type `T` and the payload `P` and does not depend on any
//! geometry crate. Higher layers (like the widget store) compute AABBs and feed them here.
//!
//! # Example
//!
//! ```rust
//! use layerboard_index::{Aabb2D, CartesianIndex};
//!
//! let mut idx: CartesianIndex<i64, u32> = CartesianIndex::new();
//! idx.add(&Aabb2D::from_xywh(0, 0, 10, 10), 1);
//! idx.add(&Aabb2D::from_xywh(5, 5, 10, 10), 2);
//!
//! // Only the first box lies entirely inside the query.
//! let hits: Vec<_> = idx.filter(&Aabb2D::new(0, 0, 12, 12)).into_iter().collect();
//! assert_eq!(hits, [1]);
//!
//! idx.remove(&Aabb2D::from_xywh(0, 0, 10, 10), 1);
//! assert!(idx.filter(&Aabb2D::new(0, 0, 12, 12)).is_empty());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod cartesian;
pub mod types;

pub use cartesian::CartesianIndex;
pub use types::Aabb2D;
