use corrlocate::{LocateConfig, Locator, MatchMetric, OwnedImage};
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

fn make_image(width: usize, height: usize) -> OwnedImage {
    let mut data = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            let value = ((x * 13) ^ (y * 7) ^ (x * y)) & 0xFF;
            data.push(value as u8);
        }
    }
    // Dimensions are fixed and non-zero.
    OwnedImage::new(data, width, height).unwrap()
}

fn extract_patch(image: &OwnedImage, x0: usize, y0: usize, width: usize, height: usize) -> OwnedImage {
    let mut out = Vec::with_capacity(width * height);
    for y in 0..height {
        let row = (y0 + y) * image.width();
        out.extend_from_slice(&image.data()[row + x0..row + x0 + width]);
    }
    OwnedImage::new(out, width, height).unwrap()
}

fn bench_locate(c: &mut Criterion) {
    let image = make_image(256, 256);
    let template = extract_patch(&image, 60, 40, 32, 32);

    for metric in [
        MatchMetric::SqDiff,
        MatchMetric::CCorrNormed,
        MatchMetric::CCoeffNormed,
    ] {
        let locator = Locator::default().with_config(LocateConfig {
            metric,
            confidence: 0.9,
            ..LocateConfig::default()
        });
        c.bench_function(&format!("locate_{}", metric.name()), |b| {
            b.iter(|| black_box(locator.locate(image.view(), template.view()).unwrap()));
        });
    }
}

fn bench_locate_all(c: &mut Criterion) {
    let mut image = make_image(256, 256);
    let template = extract_patch(&image, 60, 40, 24, 24);
    for (x, y) in [(10, 200), (150, 20), (200, 180)] {
        image.paste(template.view(), x, y);
    }

    let locator = Locator::new(0.95).with_config(LocateConfig {
        max_matches: Some(8),
        ..LocateConfig::default()
    });
    c.bench_function("locate_all_ccoeff_normed", |b| {
        b.iter(|| black_box(locator.locate_all(image.view(), template.view()).unwrap()));
    });

    #[cfg(feature = "rayon")]
    {
        let parallel = Locator::new(0.95).with_correlator(corrlocate::ParallelCorrelator);
        c.bench_function("locate_all_ccoeff_normed_rayon", |b| {
            b.iter(|| black_box(parallel.locate_all(image.view(), template.view()).unwrap()));
        });
    }
}

criterion_group!(benches, bench_locate, bench_locate_all);
criterion_main!(benches);
