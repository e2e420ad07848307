//! Pipeline benchmark: packet records → flow table → feature vectors.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use flow_features::features::FeatureExtractor;
use flow_features::flow::FlowTable;

fn make_dummy_records(n: usize, flows: usize) -> Vec<Vec<String>> {
    (0..n)
        .map(|i| {
            let flow = i % flows;
            let (src, dst, sport, dport) = if i % 2 == 0 {
                (format!("10.0.{}.{}", flow / 256, flow % 256), "192.168.1.1".to_string(), 40000 + flow, 443)
            } else {
                ("192.168.1.1".to_string(), format!("10.0.{}.{}", flow / 256, flow % 256), 443, 40000 + flow)
            };
            let syn = if i < flows { "1" } else { "0" };
            vec![
                i.to_string(),
                "0".to_string(),
                "eth0".to_string(),
                format!("{}.{:06}", 1_490_000_000 + i / 1000, i % 1000),
                "0".to_string(),
                "0".to_string(),
                src,
                dst,
                sport.to_string(),
                dport.to_string(),
                (64 + i % 1400).to_string(),
                "29200".to_string(),
                "64".to_string(),
            ]
            .into_iter()
            .chain(["0", syn, "0", "1", "1", "0", "23"].map(String::from))
            .collect()
        })
        .collect()
}

fn bench_table_ingest(c: &mut Criterion) {
    let records = make_dummy_records(10_000, 100);

    c.bench_function("table_ingest_10k_records", |b| {
        b.iter(|| {
            let mut table = FlowTable::new();
            for r in &records {
                black_box(table.ingest_record(r)).unwrap();
            }
            black_box(table.len())
        })
    });
}

fn bench_full_pipeline(c: &mut Criterion) {
    let records = make_dummy_records(10_000, 100);

    c.bench_function("full_pipeline_records_to_features", |b| {
        b.iter(|| {
            let mut extractor = FeatureExtractor::new();
            for r in &records {
                extractor.push(r).unwrap();
            }
            black_box(extractor.flush())
        })
    });
}

criterion_group!(benches, bench_table_ingest, bench_full_pipeline);
criterion_main!(benches);
