// Copyright 2025 the Pincher Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::Point;
use pincher_gesture::TransformSolver;
use pincher_gesture::solver::system_matrix;
use pincher_matrix::DenseMatrix;

/// Live samples of a slow two-finger twist.
fn samples(len: usize) -> Vec<(Point, Point)> {
    (0..len)
        .map(|i| {
            let t = i as f64 / len as f64;
            let (s, c) = (t * 1.5).sin_cos();
            (
                Point::new(-20.0 * t, 5.0 * t),
                Point::new(100.0 * c * (1.0 + t), 100.0 * s * (1.0 + t)),
            )
        })
        .collect()
}

fn bench_cached_vs_rebuilt(c: &mut Criterion) {
    let mut group = c.benchmark_group("solver/motion");
    let first = Point::new(0.0, 0.0);
    let second = Point::new(100.0, 0.0);

    // Hypothesis: reusing the cached inverse is several times cheaper than
    // inverting the anchor system on every sample.
    for len in [64usize, 1_024] {
        let samples = samples(len);
        group.throughput(Throughput::Elements(len as u64));

        group.bench_with_input(BenchmarkId::new("cached", len), &samples, |b, samples| {
            let solver = TransformSolver::new(first, second).unwrap();
            b.iter(|| {
                for &(l1, l2) in samples {
                    black_box(solver.solve(l1, l2).unwrap());
                }
            });
        });

        group.bench_with_input(BenchmarkId::new("rebuilt", len), &samples, |b, samples| {
            b.iter(|| {
                for &(l1, l2) in samples {
                    let solver = TransformSolver::new(first, second).unwrap();
                    black_box(solver.solve(l1, l2).unwrap());
                }
            });
        });
    }

    group.finish();
}

fn bench_inverse(c: &mut Criterion) {
    let mut group = c.benchmark_group("matrix/inverse");

    let system = system_matrix(Point::new(-40.0, 10.0), Point::new(25.0, 60.0)).unwrap();
    group.bench_function("anchor_system_4x4", |b| {
        b.iter(|| black_box(black_box(&system).inverse().unwrap()));
    });

    // Diagonally dominant, so always invertible.
    let n = 8;
    let values: Vec<f64> = (0..n * n)
        .map(|i| {
            if i / n == i % n {
                n as f64 * 2.0
            } else {
                ((i * 7) % 5) as f64 - 2.0
            }
        })
        .collect();
    let dense = DenseMatrix::from_row_slice(n, n, &values).unwrap();
    group.bench_function("dense_8x8", |b| {
        b.iter(|| black_box(black_box(&dense).inverse().unwrap()));
    });

    group.finish();
}

criterion_group!(benches, bench_cached_vs_rebuilt, bench_inverse);
criterion_main!(benches);
