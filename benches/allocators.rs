//! Hot-path benchmarks for the allocator engines.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use ember_memory::{
    Allocator, BlockAllocator, BuddyAllocator, FrameAllocator, LinearAllocator, Resettable,
    SmallObjectAllocator,
};
use std::alloc::Layout;

/// Buddy split/coalesce round trips at a mid-tree level.
fn bench_buddy_round_trip(c: &mut Criterion) {
    let mut group = c.benchmark_group("buddy");
    group.throughput(Throughput::Elements(1));

    group.bench_function("alloc_free_64", |b| {
        let allocator = BuddyAllocator::with_min_block_size(64 * 1024, 16).unwrap();
        let layout = Layout::from_size_align(64, 8).unwrap();

        b.iter(|| unsafe {
            let ptr = allocator.allocate(layout).unwrap();
            black_box(ptr);
            allocator.deallocate(ptr.cast(), layout);
        });
    });

    group.bench_function("alloc_free_mixed", |b| {
        let allocator = BuddyAllocator::with_min_block_size(64 * 1024, 16).unwrap();
        let small = Layout::from_size_align(24, 8).unwrap();
        let large = Layout::from_size_align(512, 8).unwrap();

        b.iter(|| unsafe {
            let a = allocator.allocate(small).unwrap();
            let b2 = allocator.allocate(large).unwrap();
            let c2 = allocator.allocate(small).unwrap();
            black_box((a, b2, c2));
            allocator.deallocate(c2.cast(), small);
            allocator.deallocate(b2.cast(), large);
            allocator.deallocate(a.cast(), small);
        });
    });

    group.finish();
}

/// Per-frame scratch: bump a few buffers, reset, repeat.
fn bench_frame_scratch(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame_scratch");
    group.throughput(Throughput::Elements(3));

    group.bench_function("linear_with_reset", |b| {
        let allocator = LinearAllocator::new(64 * 1024).unwrap();
        let layout = Layout::from_size_align(256, 8).unwrap();

        b.iter(|| unsafe {
            let a = allocator.allocate(layout).unwrap();
            let b2 = allocator.allocate(layout).unwrap();
            let c2 = allocator.allocate(layout).unwrap();
            black_box((a, b2, c2));
            allocator.reset();
        });
    });

    group.bench_function("paged_frame_with_reset", |b| {
        let allocator = FrameAllocator::new(64 * 1024).unwrap();
        let layout = Layout::from_size_align(256, 8).unwrap();

        b.iter(|| unsafe {
            let a = allocator.allocate(layout).unwrap();
            let b2 = allocator.allocate(layout).unwrap();
            let c2 = allocator.allocate(layout).unwrap();
            black_box((a, b2, c2));
            allocator.reset();
        });
    });

    group.finish();
}

/// Pool churn: allocate and free fixed blocks in a tight loop.
fn bench_block_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("block_churn");
    group.throughput(Throughput::Elements(2));

    group.bench_function("block_pair", |b| {
        let allocator = BlockAllocator::new(64, 128).unwrap();
        let layout = Layout::from_size_align(64, 8).unwrap();

        b.iter(|| unsafe {
            let a = allocator.allocate(layout).unwrap();
            let b2 = allocator.allocate(layout).unwrap();
            black_box((a, b2));
            allocator.deallocate(a.cast(), layout);
            allocator.deallocate(b2.cast(), layout);
        });
    });

    group.bench_function("small_object_mixed_classes", |b| {
        let allocator = SmallObjectAllocator::new(4096).unwrap();
        let tiny = Layout::from_size_align(8, 8).unwrap();
        let big = Layout::from_size_align(64, 8).unwrap();

        b.iter(|| unsafe {
            let a = allocator.allocate(tiny).unwrap();
            let b2 = allocator.allocate(big).unwrap();
            black_box((a, b2));
            allocator.deallocate(a.cast(), tiny);
            allocator.deallocate(b2.cast(), big);
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_buddy_round_trip,
    bench_frame_scratch,
    bench_block_churn
);
criterion_main!(benches);
