//! Basic benchmarks for the `paged_vec` crate.
#![allow(
    missing_docs,
    reason = "No need for API documentation in benchmark code"
)]

use std::hint::black_box;
use std::iter;
use std::time::Instant;

use alloc_tracker::Allocator;
use criterion::{Criterion, criterion_group, criterion_main};
use paged_vec::PagedVec;

criterion_group!(benches, entrypoint);
criterion_main!(benches);

#[global_allocator]
static ALLOCATOR: Allocator<std::alloc::System> = Allocator::system();

type TestItem = usize;
const FILL: TestItem = usize::MAX;
const TEST_VALUE: TestItem = 1024;
const BUCKET_SIZE: usize = 128;

fn entrypoint(c: &mut Criterion) {
    let allocs = alloc_tracker::Session::new();

    let mut group = c.benchmark_group("paged_basic");

    let allocs_op = allocs.operation("build_empty");
    group.bench_function("build_empty", |b| {
        b.iter_custom(|iters| {
            let _span = allocs_op.measure_thread().iterations(iters);

            let start = Instant::now();

            for _ in 0..iters {
                drop(black_box(PagedVec::new(BUCKET_SIZE, FILL)));
            }

            start.elapsed()
        });
    });

    let allocs_op = allocs.operation("set_first");
    group.bench_function("set_first", |b| {
        b.iter_custom(|iters| {
            let mut containers = iter::repeat_with(|| PagedVec::new(BUCKET_SIZE, FILL))
                .take(usize::try_from(iters).unwrap())
                .collect::<Vec<_>>();

            let _span = allocs_op.measure_thread().iterations(iters);

            let start = Instant::now();

            // The first write allocates the first bucket.
            for container in &mut containers {
                container.set(black_box(0), black_box(TEST_VALUE));
            }

            start.elapsed()
        });
    });

    let allocs_op = allocs.operation("set_in_capacity");
    group.bench_function("set_in_capacity", |b| {
        b.iter_custom(|iters| {
            let mut container = PagedVec::new(BUCKET_SIZE, FILL);
            container.ensure_capacity(BUCKET_SIZE - 1);

            let _span = allocs_op.measure_thread().iterations(iters);

            let start = Instant::now();

            for _ in 0..iters {
                container.set(black_box(7), black_box(TEST_VALUE));
            }

            start.elapsed()
        });
    });

    let allocs_op = allocs.operation("read_one");
    group.bench_function("read_one", |b| {
        b.iter_custom(|iters| {
            let mut container = PagedVec::new(BUCKET_SIZE, FILL);
            container.set(7, TEST_VALUE);

            let _span = allocs_op.measure_thread().iterations(iters);

            let start = Instant::now();

            for _ in 0..iters {
                _ = black_box(container[black_box(7)]);
            }

            start.elapsed()
        });
    });

    let allocs_op = allocs.operation("get_checked");
    group.bench_function("get_checked", |b| {
        b.iter_custom(|iters| {
            let mut container = PagedVec::new(BUCKET_SIZE, FILL);
            container.set(7, TEST_VALUE);

            let _span = allocs_op.measure_thread().iterations(iters);

            let start = Instant::now();

            for _ in 0..iters {
                _ = black_box(container.get(black_box(7)));
            }

            start.elapsed()
        });
    });

    let allocs_op = allocs.operation("remove_one");
    group.bench_function("remove_one", |b| {
        b.iter_custom(|iters| {
            let mut container = PagedVec::new(BUCKET_SIZE, FILL);

            // Removal is a slot overwrite, so repeated removal of the same
            // slot is representative after the first iteration.
            container.set(7, TEST_VALUE);

            let _span = allocs_op.measure_thread().iterations(iters);

            let start = Instant::now();

            for _ in 0..iters {
                container.remove(black_box(7));
            }

            start.elapsed()
        });
    });

    let allocs_op = allocs.operation("len_10k_slots");
    group.bench_function("len_10k_slots", |b| {
        b.iter_custom(|iters| {
            let mut container = PagedVec::new(BUCKET_SIZE, FILL);

            for index in 0..10_000 {
                container.set(index, TEST_VALUE);
            }

            let _span = allocs_op.measure_thread().iterations(iters);

            let start = Instant::now();

            for _ in 0..iters {
                _ = black_box(container.len());
            }

            start.elapsed()
        });
    });

    let allocs_op = allocs.operation("trim_nothing_to_release");
    group.bench_function("trim_nothing_to_release", |b| {
        b.iter_custom(|iters| {
            let mut container = PagedVec::new(BUCKET_SIZE, FILL);

            for index in 0..10_000 {
                container.set(index, TEST_VALUE);
            }

            let _span = allocs_op.measure_thread().iterations(iters);

            let start = Instant::now();

            for _ in 0..iters {
                container.trim_excess();
            }

            start.elapsed()
        });
    });

    group.finish();

    let mut group = c.benchmark_group("paged_slow");

    let allocs_op = allocs.operation("grow_remove_trim_cycle");
    group.bench_function("grow_remove_trim_cycle", |b| {
        b.iter_custom(|iters| {
            let _span = allocs_op.measure_thread().iterations(iters);

            let start = Instant::now();

            for _ in 0..iters {
                let mut container = PagedVec::new(BUCKET_SIZE, FILL);

                for index in 0..10_000 {
                    container.set(index, black_box(TEST_VALUE));
                }

                for index in 5_000..10_000 {
                    container.remove(index);
                }

                container.trim_excess();

                drop(black_box(container));
            }

            start.elapsed()
        });
    });

    group.finish();

    allocs.print_to_stdout();
}
