//! Criterion benchmarks for the resampling engine.
//!
//! Compares the convolution filters against each other and against the fast
//! paths on a thumbnail-sized reduction, the browser's most common workload.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use lumen_scale::{PixelBuffer, ScaleFilter, scale, scale_bilinear, scale_fast, scale_nearest};

fn photo(width: u32, height: u32) -> PixelBuffer {
    PixelBuffer::from_fn(width, height, |x, y| {
        0xFF00_0000 | ((x * 255 / width) << 16) | ((y * 255 / height) << 8) | ((x ^ y) & 0xFF)
    })
    .unwrap()
}

fn bench_filters(c: &mut Criterion) {
    let image = photo(1024, 768);
    let mut group = c.benchmark_group("downscale_1024x768_to_256x192");
    group.throughput(Throughput::Elements(256 * 192));
    for filter in [
        ScaleFilter::Box,
        ScaleFilter::Triangle,
        ScaleFilter::Cubic,
        ScaleFilter::Mitchell,
        ScaleFilter::Lanczos2,
        ScaleFilter::Lanczos3,
    ] {
        group.bench_function(BenchmarkId::from_parameter(format!("{filter:?}")), |b| {
            b.iter(|| scale(black_box(&image), 256, 192, filter, None).unwrap());
        });
    }
    group.finish();
}

fn bench_fast_paths(c: &mut Criterion) {
    let image = photo(1024, 768);
    let mut group = c.benchmark_group("fast_paths_1024x768_to_256x192");
    group.throughput(Throughput::Elements(256 * 192));
    group.bench_function("nearest", |b| {
        b.iter(|| scale_nearest(black_box(&image), 256, 192).unwrap());
    });
    group.bench_function("bilinear_halving", |b| {
        b.iter(|| scale_bilinear(black_box(&image), 256, 192).unwrap());
    });
    group.bench_function("box_fast", |b| {
        b.iter(|| scale_fast(black_box(&image), 256, 192).unwrap());
    });
    group.finish();
}

fn bench_upscale(c: &mut Criterion) {
    let image = photo(256, 192);
    let mut group = c.benchmark_group("upscale_256x192_to_1024x768");
    group.throughput(Throughput::Elements(1024 * 768));
    for filter in [ScaleFilter::Triangle, ScaleFilter::Lanczos3] {
        group.bench_function(BenchmarkId::from_parameter(format!("{filter:?}")), |b| {
            b.iter(|| scale(black_box(&image), 1024, 768, filter, None).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_filters, bench_fast_paths, bench_upscale);
criterion_main!(benches);
