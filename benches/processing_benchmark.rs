use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use koppen_grid::models::{GridMapping, LookupQuery};
use koppen_grid::processors::{ClimateLookup, GridEncoder, KeyNormalizer};
use koppen_grid::readers::parse_grid_line;
use std::fmt::Write as _;
use tempfile::TempDir;

const CODES: [&str; 8] = ["Af", "Aw", "BWh", "BSk", "Cfa", "Cfb", "Dfb", "ET"];

// Half-degree table covering `rows` latitude bands of the globe
fn create_test_table(rows: usize) -> String {
    let mut table = String::with_capacity(rows * 720 * 20);
    for row in 0..rows {
        let lat = 89.75 - (row as f64) * 0.5;
        for col in 0..720 {
            let lon = -179.75 + (col as f64) * 0.5;
            let code = CODES[(row + col) % CODES.len()];
            let _ = writeln!(table, "{:.2} {:.2} {}", lat, lon, code);
        }
    }
    table
}

fn create_test_mapping(rows: usize) -> GridMapping {
    create_test_table(rows)
        .lines()
        .filter_map(parse_grid_line)
        .map(|r| (format!("{},{}", r.latitude, r.longitude), r.code))
        .collect()
}

fn benchmark_line_parsing(c: &mut Criterion) {
    c.bench_function("parse_grid_line", |b| {
        b.iter(|| parse_grid_line(black_box("-33.75   -70.75  Csb\r")))
    });
}

fn benchmark_encoder(c: &mut Criterion) {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let mut group = c.benchmark_group("encode");

    for rows in [10, 100] {
        let input = temp_dir.path().join(format!("table_{}.txt", rows));
        std::fs::write(&input, create_test_table(rows)).expect("Failed to write table");

        for use_mmap in [false, true] {
            let label = if use_mmap { "mmap" } else { "buffered" };
            group.bench_with_input(BenchmarkId::new(label, rows), &input, |b, input| {
                let encoder = GridEncoder::new().with_mmap(use_mmap);
                b.iter(|| encoder.encode(black_box(input)).expect("encode failed"))
            });
        }
    }

    group.finish();
}

fn benchmark_normalizer(c: &mut Criterion) {
    let mapping = create_test_mapping(100);
    let normalizer = KeyNormalizer::new();

    c.bench_function("normalize_72000_cells", |b| {
        b.iter(|| normalizer.normalize_mapping(black_box(mapping.clone())))
    });
}

fn benchmark_lookup(c: &mut Criterion) {
    let mapping = create_test_mapping(100);
    let lookup = ClimateLookup::new(&mapping);

    c.bench_function("lookup_exact", |b| {
        let query = LookupQuery::new(60.1, 10.9);
        b.iter(|| lookup.lookup(black_box(&query)))
    });

    // Latitudes below the generated bands force the nearest-cell scan
    c.bench_function("lookup_nearest", |b| {
        let query = LookupQuery::new(39.6, 10.9);
        b.iter(|| lookup.lookup(black_box(&query)))
    });
}

criterion_group!(
    benches,
    benchmark_line_parsing,
    benchmark_encoder,
    benchmark_normalizer,
    benchmark_lookup
);
criterion_main!(benches);
