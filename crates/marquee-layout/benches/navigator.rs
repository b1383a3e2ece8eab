//! Benchmarks for focus navigation and track resolution.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use marquee_core::Size;
use marquee_layout::{navigate, CellMap, GridArea, GridCoord, GridLayout, TrackSize, Wrap};

fn uniform(cols: i32, rows: i32) -> CellMap {
    let mut map = CellMap::new(GridCoord::new(cols, rows));
    for y in 0..rows {
        for x in 0..cols {
            map.place(GridArea::cell(x, y), true);
        }
    }
    map
}

/// Focusable cells only in the far corner, forcing a full fan-out.
fn sparse(cols: i32, rows: i32) -> CellMap {
    let mut map = CellMap::new(GridCoord::new(cols, rows));
    map.place(GridArea::cell(0, 0), true);
    map.place(GridArea::cell(cols - 1, rows - 1), true);
    map
}

fn bench_navigate_uniform(c: &mut Criterion) {
    let map = uniform(8, 8);

    c.bench_function("navigate_uniform_8x8_wrap", |b| {
        b.iter(|| {
            navigate(
                black_box(&map),
                black_box(GridCoord::new(7, 3)),
                GridCoord::new(1, 0),
                Wrap::Yes,
            )
        })
    });
}

fn bench_navigate_fan_out(c: &mut Criterion) {
    let map = sparse(16, 16);

    c.bench_function("navigate_sparse_16x16_fan_out", |b| {
        b.iter(|| {
            navigate(
                black_box(&map),
                black_box(GridCoord::new(0, 0)),
                GridCoord::new(0, 1),
                Wrap::No,
            )
        })
    });
}

fn bench_grid_layout(c: &mut Criterion) {
    let columns = [TrackSize::Percent(0.3), TrackSize::Auto, TrackSize::Auto];
    let rows = [TrackSize::Percent(0.1), TrackSize::Auto, TrackSize::Percent(0.1)];

    c.bench_function("grid_layout_3x3", |b| {
        b.iter(|| GridLayout::compute(black_box(&columns), black_box(&rows), Size::new(1280.0, 720.0)))
    });
}

criterion_group!(
    benches,
    bench_navigate_uniform,
    bench_navigate_fan_out,
    bench_grid_layout
);
criterion_main!(benches);
