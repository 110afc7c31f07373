// Copyright 2025 the Layerboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core store implementation: z-order placement, cascading shifts, and index synchronization.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use layerboard_index::CartesianIndex;

use crate::clock::{Clock, SystemClock};
use crate::config::StoreConfig;
use crate::error::{ShiftDirection, StoreError};
use crate::ids::IdGenerator;
use crate::types::{SearchBounds, Widget, WidgetChanges, WidgetDraft, WidgetId};

impl Default for WidgetStore<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

/// In-memory widget store ordered by z.
///
/// The store owns three structures and keeps them in step on every mutation:
/// widgets by z, z by id, and a [`CartesianIndex`] over widget bounds.
/// Mutations take `&mut self`; wrap the store in a
/// [`SharedWidgetStore`](crate::SharedWidgetStore) to share it between threads.
pub struct WidgetStore<C: Clock = SystemClock> {
    config: StoreConfig,
    ids: Arc<IdGenerator>,
    clock: C,
    by_z: BTreeMap<i32, Widget>,
    z_by_id: BTreeMap<WidgetId, i32>,
    index: CartesianIndex<i64, WidgetId>,
}

impl<C: Clock> core::fmt::Debug for WidgetStore<C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("WidgetStore")
            .field("config", &self.config)
            .field("widgets", &self.by_z.len())
            .field("bottom_z", &self.by_z.first_key_value().map(|(z, _)| *z))
            .field("top_z", &self.by_z.last_key_value().map(|(z, _)| *z))
            .field("index", &self.index)
            .finish_non_exhaustive()
    }
}

impl WidgetStore<SystemClock> {
    /// Create an empty store over the full `i32` layer range with its own id generator.
    pub fn new() -> Self {
        Self::from_parts(StoreConfig::default(), Arc::new(IdGenerator::new()), SystemClock)
    }

    /// Create an empty store with the given configuration.
    pub fn with_config(config: StoreConfig) -> Result<Self, StoreError> {
        Self::with_parts(config, Arc::new(IdGenerator::new()), SystemClock)
    }
}

impl<C: Clock> WidgetStore<C> {
    /// Create an empty store from explicit parts.
    ///
    /// `ids` may be shared with other stores; ids are never reused across them.
    pub fn with_parts(
        config: StoreConfig,
        ids: Arc<IdGenerator>,
        clock: C,
    ) -> Result<Self, StoreError> {
        config.validate()?;
        Ok(Self::from_parts(config, ids, clock))
    }

    fn from_parts(config: StoreConfig, ids: Arc<IdGenerator>, clock: C) -> Self {
        Self {
            config,
            ids,
            clock,
            by_z: BTreeMap::new(),
            z_by_id: BTreeMap::new(),
            index: CartesianIndex::new(),
        }
    }

    /// The store's configuration.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// The id generator this store draws from.
    pub fn id_generator(&self) -> &Arc<IdGenerator> {
        &self.ids
    }

    /// Create or replace a widget.
    ///
    /// - No id: a fresh id is assigned and the widget is inserted.
    /// - An unknown, well-formed id: the widget is inserted under that id.
    /// - A stored id: the old widget is replaced. `updated_at` is refreshed only if
    ///   position, size, or z differ (see [`WidgetChanges`]).
    ///
    /// Without a `z` the widget goes to the foreground (one above the current top, or 0 in
    /// an empty store). With a `z` that is taken, the occupant and the run of widgets directly
    /// above it move up by one to make room.
    ///
    /// Every insert first checks the top of the layer range: if it is occupied, the run of
    /// widgets ending there moves down by one. This happens even when the requested `z` is
    /// far away from the top.
    ///
    /// Widgets moved by a cascade keep their id and bounds and get a fresh `updated_at`.
    ///
    /// On error nothing changes. [`StoreError::Exhausted`] means no shift could make room.
    /// [`StoreError::IdsExhausted`] means a new widget could not get an id.
    pub fn save(&mut self, draft: WidgetDraft) -> Result<Widget, StoreError> {
        draft.validate()?;
        if let Some(z) = draft.z
            && !self.config.layers.contains(z)
        {
            return Err(StoreError::InvalidArgument(format!(
                "z {z} is outside the layer range [{}, {}]",
                self.config.layers.min, self.config.layers.max
            )));
        }

        let Some(raw) = draft.id else {
            let id = self.ids.next()?;
            let pending = self.pending(id, &draft);
            return self.insert(pending, draft.z);
        };
        let id = WidgetId::try_from(raw)?;
        match self.find_by_id(id).cloned() {
            Some(existing) => self.update(existing, &draft),
            None => {
                self.ids.observe(id);
                let pending = self.pending(id, &draft);
                self.insert(pending, draft.z)
            }
        }
    }

    /// Look up a widget by id.
    pub fn find_by_id(&self, id: WidgetId) -> Option<&Widget> {
        let z = self.z_by_id.get(&id)?;
        self.by_z.get(z)
    }

    /// All widgets, bottom (lowest z) first.
    pub fn find_all(&self) -> impl Iterator<Item = &Widget> + '_ {
        self.by_z.values()
    }

    /// Widgets lying entirely inside `bounds` (edges inclusive), bottom first.
    pub fn search(&self, bounds: SearchBounds) -> impl Iterator<Item = &Widget> + '_ {
        let candidates = self.index.filter(&bounds.to_aabb());
        let mut zs: Vec<i32> = candidates
            .iter()
            .filter_map(|id| self.z_by_id.get(id).copied())
            .collect();
        zs.sort_unstable();
        tracing::trace!(candidates = candidates.len(), hits = zs.len(), "search");
        zs.into_iter().filter_map(move |z| self.by_z.get(&z))
    }

    /// Number of stored widgets.
    pub fn count(&self) -> usize {
        self.by_z.len()
    }

    /// Remove a widget. Unknown ids are ignored.
    pub fn delete_by_id(&mut self, id: WidgetId) {
        if let Some(z) = self.z_by_id.remove(&id)
            && let Some(w) = self.by_z.remove(&z)
        {
            self.index.remove(&w.bounds(), w.id);
            tracing::debug!(id = %w.id, z, "removed widget");
        }
        self.debug_check();
    }

    /// Remove every widget. Ids already handed out stay used.
    pub fn delete_all(&mut self) {
        let n = self.by_z.len();
        self.by_z.clear();
        self.z_by_id.clear();
        self.index.clear();
        tracing::debug!(removed = n, "cleared store");
    }

    /// Verify that the z map, the id map, and the spatial index describe the same widgets.
    pub fn check_consistency(&self) -> Result<(), StoreError> {
        let n = self.by_z.len();
        if self.z_by_id.len() != n || self.index.len() != n {
            return Err(StoreError::Inconsistent(format!(
                "{n} widgets by z, {} by id, {} indexed",
                self.z_by_id.len(),
                self.index.len()
            )));
        }
        for (&id, &z) in &self.z_by_id {
            let Some(w) = self.by_z.get(&z) else {
                return Err(StoreError::Inconsistent(format!(
                    "widget {id} maps to empty z {z}"
                )));
            };
            if w.id != id || w.z != z {
                return Err(StoreError::Inconsistent(format!(
                    "widget {id} maps to z {z}, which holds widget {} at z {}",
                    w.id, w.z
                )));
            }
            if !self.config.layers.contains(z) || w.width < 1 || w.height < 1 {
                return Err(StoreError::Inconsistent(format!("widget {id} is malformed: {w:?}")));
            }
            if !self.index.contains(&w.bounds(), id) {
                return Err(StoreError::Inconsistent(format!(
                    "widget {id} is missing from the spatial index"
                )));
            }
        }
        Ok(())
    }

    // --- internals ---

    fn pending(&self, id: WidgetId, draft: &WidgetDraft) -> Widget {
        Widget {
            id,
            x: draft.x,
            y: draft.y,
            // Assigned on placement.
            z: 0,
            width: draft.width,
            height: draft.height,
            updated_at: self.clock.now(),
        }
    }

    fn update(&mut self, existing: Widget, draft: &WidgetDraft) -> Result<Widget, StoreError> {
        let changes = WidgetChanges::between(&existing, draft);
        let updated_at = if changes.is_empty() {
            existing.updated_at
        } else {
            self.clock.now()
        };
        let pending = Widget {
            id: existing.id,
            x: draft.x,
            y: draft.y,
            z: existing.z,
            width: draft.width,
            height: draft.height,
            updated_at,
        };
        self.delete_by_id(existing.id);
        match self.insert(pending, draft.z) {
            Ok(w) => {
                tracing::debug!(id = %w.id, ?changes, "updated widget");
                Ok(w)
            }
            Err(e) => {
                // Inserts fail before they move anything, so the old slot is still free.
                debug_assert!(!self.by_z.contains_key(&existing.z), "old slot was taken");
                self.place(existing);
                Err(e)
            }
        }
    }

    /// Place `pending` at `requested` (or the foreground), shifting others as needed.
    fn insert(&mut self, pending: Widget, requested: Option<i32>) -> Result<Widget, StoreError> {
        let top = self.config.layers.max;
        if self.by_z.contains_key(&top) {
            tracing::warn!(z = top, "top layer occupied; shifting the top run down");
            self.shift_down_from(top)?;
        }
        let z = match requested {
            None => match self.by_z.last_key_value() {
                None => 0,
                Some((&last, _)) => last
                    .checked_add(1)
                    .filter(|z| *z <= top)
                    .ok_or(StoreError::Exhausted {
                        direction: ShiftDirection::Up,
                        z: last,
                    })?,
            },
            Some(z) => {
                if self.by_z.contains_key(&z) {
                    self.shift_up_from(z)?;
                }
                z
            }
        };
        let placed = self.place(Widget { z, ..pending });
        self.debug_check();
        Ok(placed)
    }

    fn place(&mut self, widget: Widget) -> Widget {
        self.index.add(&widget.bounds(), widget.id);
        self.z_by_id.insert(widget.id, widget.z);
        self.by_z.insert(widget.z, widget.clone());
        tracing::debug!(id = %widget.id, z = widget.z, "placed widget");
        widget
    }

    /// Move the occupant of `from` and the contiguous run above it up by one.
    fn shift_up_from(&mut self, from: i32) -> Result<(), StoreError> {
        let gap = self.free_slot(from, ShiftDirection::Up)?;
        let now = self.clock.now();
        // Fill the gap from the top of the run downward so no slot is ever doubly occupied.
        let mut dst = gap;
        while dst != from {
            let src = dst - 1;
            self.relocate(src, dst, now);
            dst = src;
        }
        tracing::trace!(
            from,
            to = gap,
            direction = %ShiftDirection::Up,
            moved = gap.abs_diff(from),
            "shifted run"
        );
        Ok(())
    }

    /// Move the occupant of `from` and the contiguous run below it down by one.
    fn shift_down_from(&mut self, from: i32) -> Result<(), StoreError> {
        let gap = self.free_slot(from, ShiftDirection::Down)?;
        let now = self.clock.now();
        let mut dst = gap;
        while dst != from {
            let src = dst + 1;
            self.relocate(src, dst, now);
            dst = src;
        }
        tracing::trace!(
            from,
            to = gap,
            direction = %ShiftDirection::Down,
            moved = gap.abs_diff(from),
            "shifted run"
        );
        Ok(())
    }

    /// First free slot at or beyond `from` in `direction`, without leaving the layer range.
    fn free_slot(&self, from: i32, direction: ShiftDirection) -> Result<i32, StoreError> {
        let layers = self.config.layers;
        let mut slot = from;
        while self.by_z.contains_key(&slot) {
            let next = match direction {
                ShiftDirection::Up => slot.checked_add(1).filter(|s| *s <= layers.max),
                ShiftDirection::Down => slot.checked_sub(1).filter(|s| *s >= layers.min),
            };
            slot = next.ok_or_else(|| {
                tracing::warn!(from, %direction, "layer range exhausted");
                StoreError::Exhausted { direction, z: from }
            })?;
        }
        Ok(slot)
    }

    /// Move the widget at `src` into the empty slot `dst`, stamping it `at`.
    ///
    /// Bounds do not change, so the spatial index is left alone.
    fn relocate(&mut self, src: i32, dst: i32, at: DateTime<Utc>) {
        if let Some(w) = self.by_z.remove(&src) {
            let moved = w.with_z(dst, at);
            self.z_by_id.insert(moved.id, dst);
            self.by_z.insert(dst, moved);
        }
    }

    fn debug_check(&self) {
        debug_assert_eq!(self.check_consistency(), Ok(()), "store invariants broken");
    }
}
