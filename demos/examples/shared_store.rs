// Copyright 2025 the Layerboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared store.
//!
//! Several threads save into one store through `SharedWidgetStore`. The layer range is
//! narrow, so the store fills up: the top-of-range shift kicks in first, then saves start
//! failing with an exhausted error. The demo ends by checking the store's invariants.
//!
//! Run:
//! - `RUST_LOG=layerboard_store=debug cargo run -p layerboard_demos --example shared_store`

use std::sync::Arc;
use std::thread;

use layerboard_store::{
    IdGenerator, LayerRange, SharedWidgetStore, StoreConfig, StoreError, SystemClock,
    WidgetDraft, WidgetStore,
};
use tracing_subscriber::EnvFilter;

const THREADS: i32 = 4;
const SAVES_PER_THREAD: i32 = 40;

fn main() -> Result<(), StoreError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = StoreConfig {
        layers: LayerRange { min: -64, max: 64 },
    };
    let store = WidgetStore::with_parts(config, Arc::new(IdGenerator::new()), SystemClock)?;
    let shared = SharedWidgetStore::new(store);

    let workers: Vec<_> = (0..THREADS)
        .map(|t| {
            let shared = shared.clone();
            thread::spawn(move || {
                let mut rejected = 0_usize;
                for i in 0..SAVES_PER_THREAD {
                    let mut draft = WidgetDraft::new(t * 50 + i, i, 4, 4);
                    if i % 3 == 0 {
                        draft = draft.with_z(i % 7);
                    }
                    if let Err(e) = shared.save(draft) {
                        tracing::info!(thread = t, error = %e, "save rejected");
                        rejected += 1;
                    }
                }
                rejected
            })
        })
        .collect();

    let mut rejected = 0;
    for w in workers {
        match w.join() {
            Ok(n) => rejected += n,
            Err(_) => tracing::error!("worker panicked"),
        }
    }

    // 160 attempts into 129 slots.
    println!(
        "stored {} widgets, {} saves rejected",
        shared.count(),
        rejected
    );
    shared.with_store(|s| s.check_consistency())?;

    for w in shared.find_all().iter().rev().take(3) {
        println!("top: id={} z={}", w.id, w.z);
    }
    Ok(())
}
