//! Pipeline performance benchmarks.
//!
//! Measures decoding, splitting, and curation across dataset sizes.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use strata::{Curator, DatasetPreparer, StratifiedSplitter, TableCodec};

/// Generate a synthetic raw dataset with a skewed label distribution.
fn generate_raw_csv(rows: usize) -> String {
    let mut data = String::from(
        "cod_hex,cout_tot,prime,N_Inondation,WDI_GDP_per_capita,WDI_Inflation_rate,Tarification\n",
    );

    for row in 0..rows {
        // Mix of large classes and a long tail of tiny ones
        let class = if row % 7 == 0 { row } else { row % 13 };
        let cost = if row % 50 == 0 {
            String::new()
        } else {
            format!("{:.2}", (row % 997) as f64 * 12.5)
        };
        data.push_str(&format!(
            "{:X},{},{},{},{:.1},{:.2},\n",
            class,
            cost,
            (row % 11) * 100,
            row % 5,
            1000.0 + (row % 17) as f64 * 250.0,
            (row % 9) as f64 * 0.75,
        ));
    }

    data
}

/// Benchmark decoding raw CSV bytes.
fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    for rows in [1_000, 10_000, 100_000].iter() {
        let data = generate_raw_csv(*rows);
        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::new("rows", rows), &data, |b, data| {
            let codec = TableCodec::new();
            b.iter(|| black_box(codec.decode(data.as_bytes()).unwrap()))
        });
    }

    group.finish();
}

/// Benchmark the index splitter alone.
fn bench_split_indices(c: &mut Criterion) {
    let mut group = c.benchmark_group("split_indices");

    for rows in [1_000, 10_000, 100_000].iter() {
        let codes: Vec<usize> = (0..*rows)
            .map(|i| if i % 7 == 0 { 13 + i } else { i % 13 })
            .collect();
        group.throughput(Throughput::Elements(*rows as u64));
        group.bench_with_input(BenchmarkId::new("rows", rows), &codes, |b, codes| {
            let splitter = StratifiedSplitter::new();
            b.iter(|| black_box(splitter.split(codes)))
        });
    }

    group.finish();
}

/// Benchmark filter, encode, split, and weights on a decoded table.
fn bench_prepare(c: &mut Criterion) {
    let mut group = c.benchmark_group("prepare");
    group.sample_size(20);

    for rows in [1_000, 10_000].iter() {
        let table = TableCodec::new()
            .decode(generate_raw_csv(*rows).as_bytes())
            .unwrap();
        group.bench_with_input(BenchmarkId::new("rows", rows), &table, |b, table| {
            let preparer = DatasetPreparer::new();
            b.iter_with_setup(|| table.clone(), |t| black_box(preparer.prepare(t).unwrap()))
        });
    }

    group.finish();
}

/// Benchmark the curation pipeline.
fn bench_curate(c: &mut Criterion) {
    let mut group = c.benchmark_group("curate");
    group.sample_size(20);

    for rows in [1_000, 10_000].iter() {
        let table = TableCodec::new()
            .decode(generate_raw_csv(*rows).as_bytes())
            .unwrap();
        group.bench_with_input(BenchmarkId::new("rows", rows), &table, |b, table| {
            let curator = Curator::new();
            b.iter_with_setup(|| table.clone(), |t| black_box(curator.curate(t).unwrap()))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_decode,
    bench_split_indices,
    bench_prepare,
    bench_curate
);
criterion_main!(benches);
