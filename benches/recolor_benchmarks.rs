//! Performance benchmarks for the avatar pipeline
//!
//! Run with: cargo bench
//!
//! The recolour scan visits every template pixel, so it dominates avatar
//! building for large templates.

use avatarfit::avatar::{composite_face, recolor_template, FaceParams, RecolorThresholds};
use avatarfit::fitting::{render_fitting_preview, GarmentLayer};
use avatarfit::testing::{synthetic_face, synthetic_template};
use avatarfit::Rgba8;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use image::{Rgba, RgbaImage};

fn bench_recolor(c: &mut Criterion) {
    let mut group = c.benchmark_group("recolor_template");

    for &(w, h) in &[(300u32, 600u32), (600, 1200), (1080, 2160)] {
        let template = synthetic_template(w, h);
        group.throughput(Throughput::Elements((w * h) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(format!("{}x{}", w, h)), &template, |b, t| {
            b.iter(|| {
                let mut img = t.clone();
                black_box(recolor_template(
                    &mut img,
                    Rgba8::new(200, 150, 120, 255),
                    RecolorThresholds::default(),
                ))
            })
        });
    }

    group.finish();
}

fn bench_composite(c: &mut Criterion) {
    let template = synthetic_template(300, 600);
    let face = synthetic_face(512, Rgba([200, 150, 120, 255]));

    c.bench_function("composite_face_512", |b| {
        b.iter(|| {
            let mut avatar = template.clone();
            black_box(composite_face(&mut avatar, &face, FaceParams::default()).ok())
        })
    });
}

fn bench_fitting(c: &mut Criterion) {
    let avatar = synthetic_template(300, 600);
    let garments: Vec<GarmentLayer> = ["tops", "dress", "pants"]
        .iter()
        .map(|t| GarmentLayer {
            garment_type: t.to_string(),
            image: RgbaImage::from_pixel(800, 800, Rgba([30, 60, 90, 200])),
        })
        .collect();

    c.bench_function("fitting_preview_3_garments", |b| {
        b.iter(|| black_box(render_fitting_preview(&avatar, &garments, 150).ok()))
    });
}

criterion_group!(benches, bench_recolor, bench_composite, bench_fitting);
criterion_main!(benches);
