// Copyright 2025 the Layerboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layerboard Store: an in-memory widget store with a strict z-order and spatial search.
//!
//! Layerboard Store is the model behind a whiteboard-like canvas: rectangles ("widgets") that
//! stack on top of each other and can be found by area.
//!
//! - Every widget holds a unique z position; saving onto a taken z shifts the run above it.
//! - Widgets without a z go to the foreground.
//! - Range search returns the widgets that lie inside a rectangle, bottom first.
//! - Updates keep the widget's id and refresh `updated_at` only when geometry changes.
//!   Widgets moved by a shift count as changed and are restamped.
//!
//! ## Layering
//!
//! Z positions are `i32` and, by default, span the whole range. Two structures keep the
//! order: widgets by z, and z by id. A collision on an explicit z moves the occupant (and
//! every widget directly above it, up to the first gap) up by one. Before every insert the
//! store also checks the top of the range: if that slot is occupied, the run ending there
//! moves down by one so the next foreground slot always exists. When neither shift can find
//! a gap the save fails with [`StoreError::Exhausted`] and the store is left unchanged.
//!
//! ## Spatial search
//!
//! Widget bounds are filed in a [`layerboard_index::CartesianIndex`]. A search reports a
//! widget only if all four of its edges fall inside the query (edges inclusive); a widget
//! that pokes out of the query on any side is not reported.
//!
//! ## Sharing
//!
//! [`WidgetStore`] mutates through `&mut self` and does no locking of its own.
//! [`SharedWidgetStore`] wraps it in a single lock held for the whole of each call.
//!
//! ## API overview
//!
//! - [`WidgetStore`]: the store. [`WidgetStore::save`], [`WidgetStore::find_by_id`],
//!   [`WidgetStore::find_all`], [`WidgetStore::search`], [`WidgetStore::delete_by_id`],
//!   [`WidgetStore::delete_all`], [`WidgetStore::count`].
//! - [`WidgetDraft`]: input to `save`. [`Widget`]: a stored value.
//! - [`SearchBounds`]: query rectangle.
//! - [`IdGenerator`]: id sequence, shared through an `Arc` and injected into stores.
//! - [`StoreConfig`]: layer range. [`Clock`]: time source for `updated_at`.
//!
//! # Example
//!
//! ```rust
//! use layerboard_store::{SearchBounds, WidgetDraft, WidgetStore};
//!
//! let mut store = WidgetStore::new();
//!
//! // Foreground saves stack up from 0.
//! let a = store.save(WidgetDraft::new(0, 0, 10, 10)).unwrap();
//! let b = store.save(WidgetDraft::new(5, 5, 10, 10)).unwrap();
//! assert_eq!((a.z, b.z), (0, 1));
//!
//! // Saving onto z = 0 pushes `a` and `b` up.
//! let c = store.save(WidgetDraft::new(50, 50, 2, 2).with_z(0)).unwrap();
//! let order: Vec<_> = store.find_all().map(|w| w.id).collect();
//! assert_eq!(order, [c.id, a.id, b.id]);
//!
//! // Only `a` lies entirely inside this rectangle.
//! let hits: Vec<_> = store.search(SearchBounds::new(0, 0, 12, 12)).map(|w| w.id).collect();
//! assert_eq!(hits, [a.id]);
//! ```
//!
//! ## Features
//!
//! - `serde`: `Serialize`/`Deserialize` for [`Widget`], [`WidgetDraft`], [`SearchBounds`],
//!   [`WidgetId`], and [`StoreConfig`], using camelCase field names (`updatedAt`, `lowerX`).

mod clock;
mod config;
mod error;
mod ids;
mod shared;
mod store;
mod types;

pub use clock::{Clock, SystemClock};
pub use config::{LayerRange, StoreConfig};
pub use error::{ShiftDirection, StoreError};
pub use ids::IdGenerator;
pub use shared::SharedWidgetStore;
pub use store::WidgetStore;
pub use types::{SearchBounds, Widget, WidgetChanges, WidgetDraft, WidgetId};

#[cfg(all(test, feature = "serde"))]
mod wire_tests {
    use super::*;

    #[test]
    fn widget_serializes_camel_case() {
        let mut store = WidgetStore::new();
        let w = store.save(WidgetDraft::new(1, 2, 3, 4)).unwrap();
        let json = serde_json::to_value(&w).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["z"], 0);
        assert_eq!(json["width"], 3);
        assert!(json.get("updatedAt").is_some(), "timestamp uses camelCase");
        let back: Widget = serde_json::from_value(json).unwrap();
        assert_eq!(back, w);
    }

    #[test]
    fn draft_fields_are_optional_where_allowed() {
        let d: WidgetDraft =
            serde_json::from_str(r#"{ "x": -1, "y": 2, "width": 3, "height": 4 }"#).unwrap();
        assert_eq!(d, WidgetDraft::new(-1, 2, 3, 4));

        // `updatedAt` is server-owned and ignored on input.
        let d: WidgetDraft = serde_json::from_str(
            r#"{ "id": 9, "x": 0, "y": 0, "z": 5, "width": 1, "height": 1, "updatedAt": "x" }"#,
        )
        .unwrap();
        assert_eq!(d, WidgetDraft::new(0, 0, 1, 1).with_id(9).with_z(5));

        let missing = serde_json::from_str::<WidgetDraft>(r#"{ "x": 0, "y": 0, "width": 1 }"#);
        assert!(missing.is_err(), "height is required");
    }

    #[test]
    fn search_bounds_require_all_edges() {
        let b: SearchBounds = serde_json::from_str(
            r#"{ "lowerX": 0, "lowerY": 1, "upperX": 2, "upperY": 3 }"#,
        )
        .unwrap();
        assert_eq!(b, SearchBounds::new(0, 1, 2, 3));
        assert!(serde_json::from_str::<SearchBounds>(r#"{ "lowerX": 0 }"#).is_err());
    }

    #[test]
    fn zero_id_is_rejected_on_the_wire() {
        assert!(serde_json::from_str::<WidgetId>("0").is_err());
        assert!(serde_json::from_str::<WidgetId>("-3").is_err());
        assert_eq!(serde_json::to_string(&WidgetId::MAX).unwrap(), i64::MAX.to_string());
        assert_eq!(serde_json::from_str::<WidgetId>("12").unwrap().get(), 12);
    }
}
