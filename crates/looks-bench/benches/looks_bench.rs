//! Benchmarks for looks-rs operations.
//!
//! Run with: `cargo bench`

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

use looks_core::{Image, PixelLayout};
use looks_gallery::{Gallery, PreviewCache};
use looks_ops::{ColorControls, ColorMatrix, Filter, PhotoEffect, TemperatureAndTint};
use looks_tools::{ColourCorrection, Parameter, Parameterized, Tool};

fn photo(size: u32) -> Image {
    let d = (size - 1).max(1) as f32;
    Image::from_fn(size, size, PixelLayout::Rgba, |x, y| {
        vec![x as f32 / d, y as f32 / d, 0.5, 1.0]
    })
    .unwrap()
}

/// Benchmark single filter stages.
fn bench_filters(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter");

    let controls = ColorControls {
        brightness: 0.1,
        contrast: 1.2,
        saturation: 0.8,
    };
    let sepia = ColorMatrix::sepia();
    let warm = TemperatureAndTint::new(4500.0, 6500.0);

    for size in [64u32, 256, 1024] {
        let img = photo(size);
        group.throughput(Throughput::Elements(u64::from(size) * u64::from(size)));

        group.bench_with_input(BenchmarkId::new("color_controls", size), &img, |b, img| {
            b.iter(|| controls.apply(black_box(img)).unwrap())
        });

        group.bench_with_input(BenchmarkId::new("sepia", size), &img, |b, img| {
            b.iter(|| sepia.apply(black_box(img)).unwrap())
        });

        group.bench_with_input(BenchmarkId::new("temperature", size), &img, |b, img| {
            b.iter(|| warm.apply(black_box(img)).unwrap())
        });
    }

    group.finish();
}

/// Benchmark full look plus tool pipelines.
fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    let img = photo(512);
    group.throughput(Throughput::Elements(512 * 512));

    let mut tool = ColourCorrection::new();
    tool.set_value(20.0, Parameter::Brightness).unwrap();
    tool.set_value(60.0, Parameter::Warmth).unwrap();

    for effect in [PhotoEffect::Mono, PhotoEffect::Chrome, PhotoEffect::Instant] {
        let pipeline = effect.filter().extend(&tool.filter());
        group.bench_function(effect.name(), |b| b.iter(|| pipeline.apply(black_box(&img)).unwrap()));
    }

    group.finish();
}

/// Benchmark the preview cache: cold renders against warm hits.
fn bench_preview_cache(c: &mut Criterion) {
    let mut group = c.benchmark_group("preview_cache");
    let img = photo(1024);
    let gallery = Gallery::builtin();

    group.bench_function("render_all_cold", |b| {
        let cache = PreviewCache::with_thumbnail(128);
        cache.set_base_image(&img);
        b.iter(|| {
            cache.invalidate_all();
            for look in gallery.iter() {
                black_box(cache.get_or_render(look.as_ref()).unwrap());
            }
        })
    });

    group.bench_function("hit", |b| {
        let cache = PreviewCache::with_thumbnail(128);
        cache.set_base_image(&img);
        let sepia = PhotoEffect::Sepia.filter();
        cache.get_or_render(&sepia).unwrap();
        b.iter(|| cache.get(black_box("Sepia")).unwrap())
    });

    group.finish();
}

/// Benchmark thumbnail downsampling.
fn bench_downsample(c: &mut Criterion) {
    let mut group = c.benchmark_group("downsample");

    for size in [512u32, 2048] {
        let img = photo(size);
        group.throughput(Throughput::Elements(u64::from(size) * u64::from(size)));
        group.bench_with_input(BenchmarkId::new("to_256", size), &img, |b, img| {
            b.iter(|| black_box(img).downsample(256))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_filters,
    bench_pipeline,
    bench_preview_cache,
    bench_downsample,
);

criterion_main!(benches);
