// Copyright 2025 the Layerboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the store: widget identifiers, stored widgets, drafts, and query bounds.

use core::fmt;
use core::num::NonZeroI64;

use chrono::{DateTime, Utc};
use layerboard_index::Aabb2D;

use crate::error::StoreError;

/// Identifier of a stored widget.
///
/// Always positive, so every id round-trips through the raw `i64` form a
/// [`WidgetDraft`] carries. Ids are handed out by [`IdGenerator`](crate::IdGenerator) or
/// supplied by the caller on first save, and never change afterwards.
///
/// Raw ids from outside (path segments, payloads) go through [`WidgetId::try_from`], which
/// rejects zero and negative values with [`StoreError::InvalidArgument`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "i64", into = "i64"))]
pub struct WidgetId(NonZeroI64);

impl WidgetId {
    /// Largest representable id.
    pub const MAX: Self = Self(NonZeroI64::MAX);

    /// Wrap a raw value; `None` unless it is at least 1.
    pub const fn new(raw: i64) -> Option<Self> {
        if raw < 1 {
            return None;
        }
        match NonZeroI64::new(raw) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// The raw id value.
    pub const fn get(self) -> i64 {
        self.0.get()
    }
}

impl TryFrom<i64> for WidgetId {
    type Error = StoreError;

    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        Self::new(raw).ok_or_else(|| StoreError::InvalidArgument(format!("invalid widget id {raw}")))
    }
}

impl From<WidgetId> for i64 {
    fn from(id: WidgetId) -> Self {
        id.get()
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// A stored widget: an axis-aligned rectangle with a unique z position.
///
/// Widgets are values. The store never mutates one in place; a z shift or an update builds
/// a new value with the same id.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Widget {
    /// Stable identifier.
    pub id: WidgetId,
    /// Lower-left x. May be negative.
    pub x: i32,
    /// Lower-left y. May be negative.
    pub y: i32,
    /// Layering position. Higher is drawn on top; unique within a store.
    pub z: i32,
    /// Width, at least 1.
    pub width: i32,
    /// Height, at least 1.
    pub height: i32,
    /// Last time a geometric property (`x`, `y`, `width`, `height`, `z`) changed through a save.
    pub updated_at: DateTime<Utc>,
}

impl Widget {
    /// Bounds as keyed by the spatial index: `(x, y)` to `(x + width, y + height)`, widened to `i64`.
    pub const fn bounds(&self) -> Aabb2D<i64> {
        Aabb2D::from_xywh_i32(self.x, self.y, self.width, self.height)
    }

    /// Same widget at another layer, stamped `at`.
    ///
    /// Identity and geometry are kept. A z change is a change, so the stamp moves even when
    /// the shift was caused by someone else's save.
    pub(crate) fn with_z(&self, z: i32, at: DateTime<Utc>) -> Self {
        Self {
            z,
            updated_at: at,
            ..self.clone()
        }
    }
}

/// Input to [`WidgetStore::save`](crate::WidgetStore::save).
///
/// `id` is raw because it comes from outside the store; `None` asks for a new widget.
/// `z: None` places the widget in the foreground.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct WidgetDraft {
    /// Existing or caller-chosen id.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub id: Option<i64>,
    /// Lower-left x.
    pub x: i32,
    /// Lower-left y.
    pub y: i32,
    /// Requested layer.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub z: Option<i32>,
    /// Width; must be at least 1.
    pub width: i32,
    /// Height; must be at least 1.
    pub height: i32,
}

impl WidgetDraft {
    /// A new widget draft without id or z.
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            id: None,
            x,
            y,
            z: None,
            width,
            height,
        }
    }

    /// Request an explicit layer.
    #[must_use]
    pub const fn with_z(mut self, z: i32) -> Self {
        self.z = Some(z);
        self
    }

    /// Target an existing (or caller-chosen) id.
    #[must_use]
    pub const fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    /// Reject drafts whose size is below 1 on either axis.
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.width < 1 {
            return Err(StoreError::InvalidArgument(format!(
                "width must be at least 1, got {}",
                self.width
            )));
        }
        if self.height < 1 {
            return Err(StoreError::InvalidArgument(format!(
                "height must be at least 1, got {}",
                self.height
            )));
        }
        Ok(())
    }
}

impl From<&Widget> for WidgetDraft {
    fn from(w: &Widget) -> Self {
        Self {
            id: Some(w.id.get()),
            x: w.x,
            y: w.y,
            z: Some(w.z),
            width: w.width,
            height: w.height,
        }
    }
}

/// Query rectangle for [`WidgetStore::search`](crate::WidgetStore::search).
///
/// A widget matches when its whole rectangle lies within these bounds (edges inclusive).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct SearchBounds {
    /// Left edge.
    pub lower_x: i32,
    /// Bottom edge.
    pub lower_y: i32,
    /// Right edge.
    pub upper_x: i32,
    /// Top edge.
    pub upper_y: i32,
}

impl SearchBounds {
    /// Create bounds from lower and upper corners.
    pub const fn new(lower_x: i32, lower_y: i32, upper_x: i32, upper_y: i32) -> Self {
        Self {
            lower_x,
            lower_y,
            upper_x,
            upper_y,
        }
    }

    /// Bounds in the index's scalar.
    pub fn to_aabb(self) -> Aabb2D<i64> {
        Aabb2D::new(
            i64::from(self.lower_x),
            i64::from(self.lower_y),
            i64::from(self.upper_x),
            i64::from(self.upper_y),
        )
    }
}

bitflags::bitflags! {
    /// Properties that differ between a stored widget and a draft saved over it.
    ///
    /// A non-empty set refreshes `updated_at`.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct WidgetChanges: u8 {
        /// Lower-left x moved.
        const X      = 0b0000_0001;
        /// Lower-left y moved.
        const Y      = 0b0000_0010;
        /// Width changed.
        const WIDTH  = 0b0000_0100;
        /// Height changed.
        const HEIGHT = 0b0000_1000;
        /// Layer changed, or the draft asked for the foreground.
        const Z      = 0b0001_0000;
    }
}

impl WidgetChanges {
    /// Compare a stored widget with the draft about to replace it.
    pub fn between(stored: &Widget, draft: &WidgetDraft) -> Self {
        let mut changes = Self::empty();
        changes.set(Self::X, stored.x != draft.x);
        changes.set(Self::Y, stored.y != draft.y);
        changes.set(Self::WIDTH, stored.width != draft.width);
        changes.set(Self::HEIGHT, stored.height != draft.height);
        changes.set(Self::Z, draft.z != Some(stored.z));
        changes
    }
}
