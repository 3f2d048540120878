//! Criterion benchmarks for the ring-buffered multi-threaded compression engine.
//!
//! Run with:
//!   cargo bench --bench pipeline

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use zxc::compress_parallel;

const BLOCK_SIZE: usize = 256 * 1024;
const INPUT_SIZE: usize = 8 * 1024 * 1024;

fn bench_compress_parallel(c: &mut Criterion) {
    let mut group = c.benchmark_group("compress_parallel");
    let input = zxc::lorem::gen_buffer(INPUT_SIZE, 0xC0FFEE);

    for &workers in &[1usize, 2, 4, 8] {
        group.throughput(Throughput::Bytes(INPUT_SIZE as u64));
        group.bench_with_input(BenchmarkId::new("workers", workers), &workers, |b, &workers| {
            b.iter(|| compress_parallel(&input, 3, BLOCK_SIZE, true, workers))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_compress_parallel);
criterion_main!(benches);
