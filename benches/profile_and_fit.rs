use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use focal_plane_adjuster_rs::fitting::{
    combined_function, fit_peaks, FitConfig, FitDataset, Gaussian, Lorentzian, PeakParameters,
};
use focal_plane_adjuster_rs::image_pipeline::{
    sample_line, BitDepth, ChannelOrder, Image, LineSegment, Point, StandardTiffWriter,
    TiffCompression, TiffWriter, WriteConfig,
};
use std::io::Cursor;

fn generate_rgb_image(width: usize, height: usize) -> Image {
    let mut data = Vec::with_capacity(width * height * 3);
    for y in 0..height {
        for x in 0..width {
            let value = ((x * 31 + y * 17) % 65536) as u16;
            data.extend_from_slice(&[value, value / 2, value / 4]);
        }
    }
    Image::from_vec(width, height, 3, BitDepth::Sixteen, data).unwrap()
}

fn known_peaks() -> PeakParameters {
    PeakParameters {
        lorentzians: [
            Lorentzian { amplitude: 100.0, center: 30.0, width: 2.0 },
            Lorentzian { amplitude: 80.0, center: 50.0, width: 3.0 },
            Lorentzian { amplitude: 60.0, center: 70.0, width: 2.5 },
        ],
        gaussian: Gaussian { amplitude: 20.0, center: 50.0, sigma: 25.0 },
    }
}

fn benchmark_line_sampling(c: &mut Criterion) {
    let mut group = c.benchmark_group("sample_line");
    let image = generate_rgb_image(2000, 1500);

    let segments = vec![
        ("horizontal", LineSegment::new(Point::new(0, 750), Point::new(1999, 750))),
        ("vertical", LineSegment::new(Point::new(1000, 0), Point::new(1000, 1499))),
        ("diagonal", LineSegment::new(Point::new(0, 0), Point::new(1999, 1499))),
        ("clamped", LineSegment::new(Point::new(-500, -500), Point::new(2500, 2000))),
    ];

    for (label, segment) in segments {
        group.bench_with_input(BenchmarkId::from_parameter(label), &segment, |b, segment| {
            b.iter(|| sample_line(black_box(&image), segment, ChannelOrder::Rgb).unwrap());
        });
    }

    group.finish();
}

fn benchmark_peak_fit(c: &mut Criterion) {
    let mut group = c.benchmark_group("fit_peaks");
    let known = known_peaks();

    for points in [101usize, 401, 1601] {
        let step = 100.0 / (points - 1) as f64;
        let x: Vec<f64> = (0..points).map(|i| i as f64 * step).collect();
        let y = x.iter().map(|&x| combined_function(x, &known)).collect();
        let dataset = FitDataset::new(x, y).unwrap();

        let factors = [1.05, 1.01, 1.1, 0.95, 0.99, 0.9, 1.05, 1.01, 1.1, 0.9, 1.02, 1.1];
        let guess: Vec<f64> = known.to_array().iter().zip(factors).map(|(v, f)| v * f).collect();
        let guess = PeakParameters::from_slice(&guess).unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(points), &dataset, |b, dataset| {
            let config = FitConfig::builder().compute_covariance(false).build();
            b.iter(|| fit_peaks(black_box(dataset), &guess, &config));
        });
    }

    group.finish();
}

fn benchmark_tiff_encoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("tiff_encoding");
    let image = generate_rgb_image(500, 500);

    let compressions = vec![
        (TiffCompression::None, "none"),
        (TiffCompression::Lzw, "lzw"),
        (TiffCompression::DeflateFast, "deflate_fast"),
    ];

    for (compression, label) in compressions {
        let config = WriteConfig::builder().compression(compression).build();
        group.bench_with_input(BenchmarkId::from_parameter(label), &image, |b, image| {
            b.iter(|| {
                let mut output = Cursor::new(Vec::new());
                let _ = StandardTiffWriter.write_tiff(black_box(image), &mut output, &config);
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_line_sampling,
    benchmark_peak_fit,
    benchmark_tiff_encoding
);
criterion_main!(benches);
