use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use image::{Rgba, RgbaImage};
use tilescale::{split_axis, Compositor, Patch, PatchGrid, PatchStore};

fn gradient(width: u32, height: u32) -> RgbaImage {
    let mut image = RgbaImage::new(width, height);
    for (x, y, pixel) in image.enumerate_pixels_mut() {
        *pixel = Rgba([(x % 256) as u8, (y % 256) as u8, 31, 255]);
    }
    image
}

/// Benchmark: axis partition arithmetic across awkward lengths
fn bench_split_axis(c: &mut Criterion) {
    let mut group = c.benchmark_group("split_axis");
    for length in [128u32, 131, 1_920, 4_031] {
        group.bench_with_input(BenchmarkId::from_parameter(length), &length, |b, &length| {
            b.iter(|| black_box(split_axis(black_box(length), black_box(128))))
        });
    }
    group.finish();
}

/// Benchmark: full-surface redraw of a 512x512 source at 4x
fn bench_redraw_all(c: &mut Criterion) {
    let source = gradient(512, 512);
    let grid = PatchGrid::compute(source.width(), source.height(), 128);

    let mut store = PatchStore::new();
    let patches: Vec<Patch> = grid
        .regions()
        .map(|region| {
            let original = image::imageops::crop_imm(
                &source,
                region.x,
                region.y,
                region.width,
                region.height,
            )
            .to_image();
            Patch::new(region, original)
        })
        .collect();
    store.replace(patches);

    let mut compositor = Compositor::new(4);
    compositor.resize_for(&grid);

    c.bench_function("redraw_all_512_4x", |b| {
        b.iter(|| compositor.redraw_all(black_box(&store)))
    });
}

criterion_group!(benches, bench_split_axis, bench_redraw_all);
criterion_main!(benches);
