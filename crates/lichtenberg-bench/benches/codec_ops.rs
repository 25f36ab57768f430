//! Criterion micro-benchmarks for the grid archive and tree projection.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use lichtenberg_archive::{decode_grid, encode_grid, grid_hash};
use lichtenberg_core::Point;
use lichtenberg_test_utils::grown_grid;
use lichtenberg_tree::GrowthTree;

/// Benchmark: encode a 256x256 grid with 20K broken cells.
fn bench_encode_256(c: &mut Criterion) {
    let grid = grown_grid(256, 256, 42, 20_000);
    c.bench_function("codec_encode_256", |b| {
        b.iter(|| {
            let mut buf = Vec::with_capacity(1 << 20);
            encode_grid(&mut buf, &grid).unwrap();
            black_box(&buf);
        });
    });
}

/// Benchmark: decode the same grid, forest validation included.
fn bench_decode_256(c: &mut Criterion) {
    let grid = grown_grid(256, 256, 42, 20_000);
    let mut encoded = Vec::new();
    encode_grid(&mut encoded, &grid).unwrap();

    c.bench_function("codec_decode_256", |b| {
        b.iter(|| {
            let mut cursor = encoded.as_slice();
            black_box(decode_grid(&mut cursor).unwrap());
        });
    });
}

/// Benchmark: fingerprint a 256x256 grid.
fn bench_grid_hash_256(c: &mut Criterion) {
    let grid = grown_grid(256, 256, 42, 20_000);
    c.bench_function("grid_hash_256", |b| {
        b.iter(|| black_box(grid_hash(&grid)));
    });
}

/// Benchmark: build a tree and walk every leaf back to the seed.
fn bench_tree_leaf_paths_256(c: &mut Criterion) {
    let grid = grown_grid(256, 256, 42, 20_000);
    let root = Point::new(128, 0);
    c.bench_function("tree_leaf_paths_256", |b| {
        b.iter(|| {
            let tree = GrowthTree::build(&grid);
            let mut total = 0usize;
            for leaf in tree.get_leaves() {
                let (x, y, _) = leaf.node().point();
                total += tree.get_path(root.x, root.y, x, y).unwrap().len();
            }
            black_box(total)
        });
    });
}

criterion_group!(
    benches,
    bench_encode_256,
    bench_decode_256,
    bench_grid_hash_256,
    bench_tree_leaf_paths_256
);
criterion_main!(benches);
