// Copyright 2025 the Layerboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A lock-guarded handle for sharing one store between threads.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::clock::{Clock, SystemClock};
use crate::error::StoreError;
use crate::store::WidgetStore;
use crate::types::{SearchBounds, Widget, WidgetDraft, WidgetId};

/// Cloneable, thread-safe handle to a [`WidgetStore`].
///
/// Every call holds one lock for its whole duration, cascading shifts included, so no caller
/// can see two widgets on the same z or an id pointing at the wrong slot. Results are owned
/// copies taken under the lock.
pub struct SharedWidgetStore<C: Clock = SystemClock> {
    inner: Arc<Mutex<WidgetStore<C>>>,
}

impl<C: Clock> Clone for SharedWidgetStore<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C: Clock> core::fmt::Debug for SharedWidgetStore<C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SharedWidgetStore")
            .field("handles", &Arc::strong_count(&self.inner))
            .finish_non_exhaustive()
    }
}

impl Default for SharedWidgetStore<SystemClock> {
    fn default() -> Self {
        Self::new(WidgetStore::new())
    }
}

impl<C: Clock> SharedWidgetStore<C> {
    /// Wrap a store.
    pub fn new(store: WidgetStore<C>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// See [`WidgetStore::save`].
    pub fn save(&self, draft: WidgetDraft) -> Result<Widget, StoreError> {
        self.inner.lock().save(draft)
    }

    /// See [`WidgetStore::find_by_id`].
    pub fn find_by_id(&self, id: WidgetId) -> Option<Widget> {
        self.inner.lock().find_by_id(id).cloned()
    }

    /// See [`WidgetStore::find_all`].
    pub fn find_all(&self) -> Vec<Widget> {
        self.inner.lock().find_all().cloned().collect()
    }

    /// See [`WidgetStore::search`].
    pub fn search(&self, bounds: SearchBounds) -> Vec<Widget> {
        self.inner.lock().search(bounds).cloned().collect()
    }

    /// See [`WidgetStore::delete_by_id`].
    pub fn delete_by_id(&self, id: WidgetId) {
        self.inner.lock().delete_by_id(id);
    }

    /// See [`WidgetStore::delete_all`].
    pub fn delete_all(&self) {
        self.inner.lock().delete_all();
    }

    /// See [`WidgetStore::count`].
    pub fn count(&self) -> usize {
        self.inner.lock().count()
    }

    /// Run `f` with exclusive access to the store.
    ///
    /// Use this when several operations must observe one consistent state.
    pub fn with_store<R>(&self, f: impl FnOnce(&mut WidgetStore<C>) -> R) -> R {
        f(&mut self.inner.lock())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn handles_share_one_store() {
        let a = SharedWidgetStore::default();
        let b = a.clone();
        let w = a.save(WidgetDraft::new(0, 0, 4, 4)).unwrap();
        assert_eq!(b.find_by_id(w.id), Some(w.clone()));
        b.delete_by_id(w.id);
        assert_eq!(a.count(), 0);
    }

    #[test]
    fn concurrent_saves_keep_invariants() {
        let shared = SharedWidgetStore::default();
        let workers: Vec<_> = (0..4)
            .map(|t| {
                let store = shared.clone();
                thread::spawn(move || {
                    for i in 0..50 {
                        // Half the saves collide on a handful of z values.
                        let draft = WidgetDraft::new(t * 100 + i, i, 3, 3);
                        let draft = if i % 2 == 0 { draft.with_z(i % 5) } else { draft };
                        store.save(draft).unwrap();
                    }
                })
            })
            .collect();
        for w in workers {
            w.join().unwrap();
        }

        assert_eq!(shared.count(), 200);
        shared.with_store(|s| s.check_consistency()).unwrap();
        let zs: Vec<i32> = shared.find_all().iter().map(|w| w.z).collect();
        assert!(zs.windows(2).all(|p| p[0] < p[1]), "z values are unique and ordered");
        assert_eq!(
            shared.search(SearchBounds::new(0, 0, 600, 600)).len(),
            200,
            "every widget is searchable"
        );
    }
}
