// Copyright 2025 the Layerboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Widget id allocation.

use core::sync::atomic::{AtomicU64, Ordering};

use crate::error::StoreError;
use crate::types::WidgetId;

/// Issues unique, strictly increasing widget ids.
///
/// A fresh generator starts at 1 and ends at [`WidgetId::MAX`]. There is no reset: clearing
/// a store does not make old ids available again. The generator is shared through an `Arc` so several stores (or a store
/// and its owner) can draw from the same sequence.
#[derive(Debug)]
pub struct IdGenerator {
    next: AtomicU64,
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator {
    /// Create a generator whose first id is 1.
    pub const fn new() -> Self {
        Self {
            next: AtomicU64::new(1),
        }
    }

    /// Hand out the next id.
    ///
    /// Fails with [`StoreError::IdsExhausted`] once [`WidgetId::MAX`] has been handed out or
    /// observed; the counter then stays put.
    pub fn next(&self) -> Result<WidgetId, StoreError> {
        let max = WidgetId::MAX.get().unsigned_abs();
        self.next
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| {
                (n <= max).then_some(n + 1)
            })
            .ok()
            .and_then(|raw| i64::try_from(raw).ok())
            .and_then(WidgetId::new)
            .ok_or(StoreError::IdsExhausted)
    }

    /// Make sure `id` is never handed out later.
    ///
    /// Called when a caller supplies its own id on first save.
    pub fn observe(&self, id: WidgetId) {
        // Positive, so `+ 1` stays within `u64`.
        self.next.fetch_max(id.get().unsigned_abs() + 1, Ordering::Relaxed);
    }

    /// Whether a raw id would be a valid widget id: present and at least 1.
    pub fn is_valid(raw: Option<i64>) -> bool {
        raw.and_then(WidgetId::new).is_some()
    }
}
