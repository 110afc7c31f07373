// Copyright 2025 the Layerboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use layerboard_index::{Aabb2D, CartesianIndex};
use layerboard_store::{SearchBounds, WidgetDraft, WidgetStore};

fn gen_grid_drafts(n: i32, cell: i32) -> Vec<WidgetDraft> {
    let mut out = Vec::with_capacity((n * n) as usize);
    for y in 0..n {
        for x in 0..n {
            out.push(WidgetDraft::new(x * cell, y * cell, cell, cell));
        }
    }
    out
}

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_below(&mut self, m: u32) -> i32 {
        (self.next_u64() % u64::from(m)) as i32
    }
}

fn gen_random_drafts(count: usize, extent: u32, max_size: u32) -> Vec<WidgetDraft> {
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    (0..count)
        .map(|_| {
            WidgetDraft::new(
                rng.next_below(extent),
                rng.next_below(extent),
                rng.next_below(max_size) + 1,
                rng.next_below(max_size) + 1,
            )
        })
        .collect()
}

fn filled_store(drafts: &[WidgetDraft]) -> WidgetStore {
    let mut store = WidgetStore::new();
    for d in drafts {
        store.save(d.clone()).unwrap();
    }
    store
}

fn bench_save(c: &mut Criterion) {
    let mut group = c.benchmark_group("save");
    for &n in &[32, 64] {
        let drafts = gen_grid_drafts(n, 10);
        group.throughput(Throughput::Elements((n * n) as u64));
        group.bench_function(format!("foreground_n{n}"), |b| {
            b.iter_batched(
                || drafts.clone(),
                |drafts| black_box(filled_store(&drafts).count()),
                BatchSize::SmallInput,
            );
        });
    }
    // Every save lands on z = 0 and pushes the whole stack up by one.
    let drafts: Vec<_> = gen_grid_drafts(32, 10)
        .into_iter()
        .map(|d| d.with_z(0))
        .collect();
    group.throughput(Throughput::Elements(drafts.len() as u64));
    group.bench_function("bottom_collision_cascade", |b| {
        b.iter_batched(
            || drafts.clone(),
            |drafts| black_box(filled_store(&drafts).count()),
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");
    let store = filled_store(&gen_random_drafts(10_000, 2_000, 40));
    for &side in &[100, 400, 2_000] {
        let q = SearchBounds::new(500, 500, 500 + side, 500 + side);
        group.bench_function(format!("window_{side}"), |b| {
            b.iter(|| black_box(store.search(q).count()));
        });
    }
    group.finish();
}

fn bench_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("update");
    let base = filled_store(&gen_random_drafts(4_096, 2_000, 40));
    let targets: Vec<_> = base.find_all().map(WidgetDraft::from).collect();
    group.throughput(Throughput::Elements(targets.len() as u64));
    group.bench_function("move_each_once", |b| {
        b.iter_batched(
            || (filled_store(&gen_random_drafts(4_096, 2_000, 40)), targets.clone()),
            |(mut store, targets)| {
                for t in targets {
                    let moved = WidgetDraft { x: t.x + 7, ..t };
                    black_box(store.save(moved).unwrap());
                }
            },
            BatchSize::LargeInput,
        );
    });
    group.finish();
}

fn bench_index_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("cartesian_index");
    let mut idx: CartesianIndex<i64, u32> = CartesianIndex::new();
    for (i, d) in gen_random_drafts(10_000, 2_000, 40).iter().enumerate() {
        idx.add(
            &Aabb2D::from_xywh_i32(d.x, d.y, d.width, d.height),
            i as u32,
        );
    }
    group.bench_function("filter_400", |b| {
        b.iter(|| black_box(idx.filter(&Aabb2D::new(500, 500, 900, 900)).len()));
    });
    group.finish();
}

criterion_group!(benches, bench_save, bench_search, bench_update, bench_index_filter);
criterion_main!(benches);
