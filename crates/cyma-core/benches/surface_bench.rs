use criterion::{black_box, criterion_group, criterion_main, Criterion};
use cyma_core::{nearest_sample, refract, LensGeometry, LensParams, LensSurface, Ray, WaveField};
use glam::Vec3;

fn bench_deform_32_segments(c: &mut Criterion) {
    let field = WaveField::default();
    let mut lens = LensSurface::new(&LensGeometry::default(), LensParams::default());
    c.bench_function("deform_32_segments", |b| {
        b.iter(|| {
            lens.params.time += 0.016;
            lens.deform(&field);
            black_box(lens.normals());
        });
    });
}

fn bench_nearest_sample(c: &mut Criterion) {
    let lens = LensSurface::new(&LensGeometry::default(), LensParams::default());
    let ray = Ray::new(Vec3::new(0.3, 3.0, -0.2), Vec3::new(0.1, -1.0, 0.05));
    c.bench_function("nearest_sample_33x33", |b| {
        b.iter(|| black_box(nearest_sample(&lens, &ray, true)));
    });
}

fn bench_refract_1000(c: &mut Criterion) {
    c.bench_function("refract_1000", |b| {
        b.iter(|| {
            for i in 0..1000 {
                let a = i as f32 / 1000.0;
                let incident = Vec3::new(a.sin(), -a.cos(), 0.0);
                black_box(refract(incident, Vec3::Y, 1.0, 1.33));
            }
        });
    });
}

criterion_group!(
    benches,
    bench_deform_32_segments,
    bench_nearest_sample,
    bench_refract_1000,
);
criterion_main!(benches);
