// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use kurbo::{Point, Rect};
use understory_reorder::{
    Direction, Engine, Item, ItemConfig, KeyInput, Orientation, SurfaceConfig, resolve_drop_index,
};

const ROW: f64 = 20.0;

fn rows(len: u32) -> Vec<Item<u32>> {
    (0..len)
        .map(|i| {
            let y = f64::from(i) * ROW;
            Item::from(ItemConfig::new(i).with_bounds(Rect::new(0.0, y, 100.0, y + ROW)))
        })
        .collect()
}

fn board(len: u32) -> Engine<u32, u8> {
    let mut engine = Engine::new();
    for (id, x) in [(0_u8, 0.0), (1, 120.0)] {
        engine
            .register_surface(
                id,
                SurfaceConfig::new()
                    .with_group("board")
                    .with_bounds(Rect::new(x, 0.0, x + 100.0, f64::from(len) * ROW)),
            )
            .unwrap();
    }
    for item in rows(len) {
        let config = ItemConfig::new(*item.id()).with_bounds(item.bounds());
        engine.push_item(0, config).unwrap();
    }
    engine
}

fn bench_resolve_drop_index(c: &mut Criterion) {
    let mut group = c.benchmark_group("reorder/resolve_drop_index");

    for len in [16_u32, 256, 4_096] {
        let items = rows(len);
        let tail = Point::new(10.0, f64::from(len) * ROW);
        group.throughput(Throughput::Elements(u64::from(len)));

        group.bench_with_input(BenchmarkId::new("tail", len), &items, |b, items| {
            b.iter(|| {
                black_box(resolve_drop_index(
                    black_box(tail),
                    Orientation::Vertical,
                    items,
                    Some(&0),
                ))
            });
        });
    }

    group.finish();
}

fn bench_pointer_drag(c: &mut Criterion) {
    let mut group = c.benchmark_group("reorder/pointer_drag");

    for len in [16_u32, 256, 4_096] {
        let tail = Point::new(10.0, f64::from(len) * ROW);
        group.bench_function(BenchmarkId::new("head_to_tail", len), |b| {
            b.iter_batched(
                || board(len),
                |mut engine| {
                    engine.pointer_begin(0, &0, Point::new(5.0, 5.0)).unwrap();
                    engine.pointer_over(0, tail).unwrap();
                    black_box(engine.pointer_drop(0, tail).unwrap());
                    black_box(engine.pointer_end());
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

fn bench_keyboard_walk(c: &mut Criterion) {
    let mut group = c.benchmark_group("reorder/keyboard_walk");

    for len in [16_u32, 256] {
        group.throughput(Throughput::Elements(u64::from(len)));
        group.bench_function(BenchmarkId::new("walk_and_transfer", len), |b| {
            b.iter_batched(
                || board(len),
                |mut engine| {
                    engine.focus(0, &0).unwrap();
                    engine.key(KeyInput::Confirm).unwrap();
                    for _ in 1..len {
                        engine.key(KeyInput::Arrow(Direction::Down)).unwrap();
                    }
                    engine.key(KeyInput::Arrow(Direction::Right)).unwrap();
                    black_box(engine.key(KeyInput::Confirm).unwrap());
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_resolve_drop_index,
    bench_pointer_drag,
    bench_keyboard_walk
);
criterion_main!(benches);
