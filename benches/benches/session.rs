// Copyright 2025 the Pincher Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use kurbo::{Point, Rect, Size};
use pincher_gesture::{ContactEvent, GestureSession, Similarity};
use pincher_view::PinchViewport;

fn pinching_session() -> GestureSession<u32> {
    let mut session = GestureSession::new(Similarity::IDENTITY);
    session.add_contact(1, Point::new(-50.0, 0.0));
    session.add_contact(2, Point::new(50.0, 0.0));
    session
}

fn bench_session_moves(c: &mut Criterion) {
    let mut group = c.benchmark_group("session/moves");

    for len in [256usize, 4_096] {
        group.throughput(Throughput::Elements(len as u64));

        group.bench_function(BenchmarkId::new("one_contact", len), |b| {
            b.iter_batched(
                || {
                    let mut session = GestureSession::new(Similarity::IDENTITY);
                    session.add_contact(1_u32, Point::ZERO);
                    session
                },
                |mut session| {
                    for i in 0..len {
                        let x = i as f64 * 0.25;
                        session.update_contact(1, Point::new(x, -x));
                    }
                    black_box(session.transform());
                },
                BatchSize::SmallInput,
            );
        });

        group.bench_function(BenchmarkId::new("two_contacts", len), |b| {
            b.iter_batched(
                pinching_session,
                |mut session| {
                    for i in 0..len {
                        let d = 50.0 + i as f64 * 0.1;
                        session.apply_batch([
                            ContactEvent::Move(1, Point::new(-d, 0.0)),
                            ContactEvent::Move(2, Point::new(d, 0.0)),
                        ]);
                    }
                    black_box(session.transform());
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_viewport_frames(c: &mut Criterion) {
    let mut group = c.benchmark_group("viewport/frames");
    let len = 1_024usize;
    group.throughput(Throughput::Elements(len as u64));

    group.bench_function("pinch_and_map", |b| {
        b.iter_batched(
            || {
                let mut viewport = PinchViewport::new(Rect::new(0.0, 0.0, 1920.0, 1080.0));
                viewport.set_content(Some(Size::new(4000.0, 3000.0)));
                viewport.pointer_down(1_u32, Point::new(900.0, 540.0));
                viewport.pointer_down(2, Point::new(1020.0, 540.0));
                viewport
            },
            |mut viewport| {
                for i in 0..len {
                    let d = i as f64 * 0.2;
                    viewport.apply_frame([
                        ContactEvent::Move(1, Point::new(900.0 - d, 540.0 + d)),
                        ContactEvent::Move(2, Point::new(1020.0 + d, 540.0 - d)),
                    ]);
                    black_box(viewport.content_to_view());
                }
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(benches, bench_session_moves, bench_viewport_frames);
criterion_main!(benches);
