// Copyright 2025 the Layerboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Store basics.
//!
//! Stack a few widgets, collide on a z, search an area, and print the hits as JSON.
//!
//! Run:
//! - `RUST_LOG=layerboard_store=trace cargo run -p layerboard_demos --example store_basics`

use layerboard_store::{SearchBounds, StoreError, WidgetDraft, WidgetStore};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), StoreError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut store = WidgetStore::new();

    // Foreground saves get z = 0, 1, 2.
    let background = store.save(WidgetDraft::new(0, 0, 200, 200))?;
    let card = store.save(WidgetDraft::new(10, 10, 50, 50))?;
    let note = store.save(WidgetDraft::new(40, 40, 80, 80))?;
    println!(
        "z: background={} card={} note={}",
        background.z, card.z, note.z
    );

    // Saving onto z = 1 pushes `card` and `note` up by one.
    let sticker = store.save(WidgetDraft::new(20, 20, 5, 5).with_z(1))?;
    for w in store.find_all() {
        println!("id={} z={} at ({}, {})", w.id, w.z, w.x, w.y);
    }

    // Only widgets entirely inside the window are reported, bottom first.
    let window = SearchBounds::new(0, 0, 100, 100);
    let hits: Vec<_> = store.search(window).cloned().collect();
    let hit_ids: Vec<_> = hits.iter().map(|w| w.id).collect();
    assert_eq!(hit_ids, [sticker.id, card.id]);
    match serde_json::to_string_pretty(&hits) {
        Ok(json) => println!("{json}"),
        Err(e) => tracing::warn!(error = %e, "could not serialize hits"),
    }

    // Move the card sideways at its current z; the id stays and `updated_at` refreshes.
    if let Some(current) = store.find_by_id(card.id).cloned() {
        let mut draft = WidgetDraft::from(&current);
        draft.x = 150;
        let moved = store.save(draft)?;
        println!(
            "card moved to x={} z={} (updated {} -> {})",
            moved.x, moved.z, current.updated_at, moved.updated_at
        );
    }

    store.delete_by_id(background.id);
    println!("{} widgets left", store.count());
    Ok(())
}
