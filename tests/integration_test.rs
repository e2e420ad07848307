//! Integration test: config load, record file → flows → CSV/ARFF output.

mod common;

use common::{Pkt, ACK, FIN, SYN};
use flow_features::{
    config::ProcessorConfig, records::RecordReader, FeatureExtractor, OutputFormat, ProcessError,
};
use pretty_assertions::assert_eq;
use std::path::Path;

fn write_input(dir: &Path, packets: &[Pkt], extra: &[&str]) -> std::path::PathBuf {
    let path = dir.join("dataoutput.csv");
    let mut lines: Vec<String> = extra.iter().map(|s| s.to_string()).collect();
    lines.extend(packets.iter().map(Pkt::line));
    std::fs::write(&path, lines.join("\n") + "\n").unwrap();
    path
}

fn config_for(dir: &Path, input: std::path::PathBuf, format: OutputFormat) -> ProcessorConfig {
    let mut config = ProcessorConfig::default();
    config.input.path = input;
    config.output.path = dir.join("processed.out");
    config.output.format = format;
    config
}

#[test]
fn config_load_default() {
    let c = ProcessorConfig::load(Path::new("nonexistent.json"));
    assert_eq!(c.input.separator, ",");
    assert_eq!(c.output.format, OutputFormat::Csv);
    assert_eq!(c.output.relation, "processed");
}

#[test]
fn config_load_partial_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"output":{"format":"arff","relation":"tls"}}"#).unwrap();
    let c = ProcessorConfig::load(&path);
    assert_eq!(c.output.format, OutputFormat::Arff);
    assert_eq!(c.output.relation, "tls");
    assert_eq!(c.output.path, Path::new("processed.csv"));
    assert_eq!(c.log.level, "info");
}

#[test]
fn two_directions_make_one_flow_row() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(
        dir.path(),
        &[
            Pkt::up("1.000000").size(60).window(1000).ttl(64).flag(SYN),
            Pkt::down("3.500000")
                .size(100)
                .window(2000)
                .ttl(128)
                .flag(SYN)
                .flag(ACK)
                .content_type("22"),
        ],
        &["header,line"],
    );
    let config = config_for(dir.path(), input, OutputFormat::Csv);

    let summary = flow_features::run(&config).unwrap();
    assert_eq!(summary.flows, 1);
    assert_eq!(summary.records, 2);
    assert_eq!(summary.skipped, 1);

    let out = std::fs::read_to_string(&config.output.path).unwrap();
    let expected = [
        "1.1.1.1,2.2.2.2,80,443,2500000",
        "0.5,0.5,30.0,50.0",
        "60,60,60,100,100,100",
        "1000,1000,1000,2000,2000,2000",
        "64,64,64,128,128,128",
        "0.0,1.0,0.0,0.0,0.0,0.0",
        "0.0,1.0,0.0,0.0,1.0,0.0",
        "0.0,0.0,0.0,0.0,0.0",
        "0.0,0.0,1.0,0.0,0.0",
    ]
    .join(",");
    assert_eq!(out, format!("{}\n", expected));
}

#[test]
fn one_sided_flow_keeps_sentinels_and_nan() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), &[Pkt::up("10.000000").size(42)], &[]);
    let config = config_for(dir.path(), input, OutputFormat::Arff);
    flow_features::run(&config).unwrap();

    let out = std::fs::read_to_string(&config.output.path).unwrap();
    assert!(out.starts_with("@RELATION processed\n@ATTRIBUTE ipup string\n"));
    let row = out.lines().last().unwrap();
    let cols: Vec<&str> = row.split(',').collect();
    assert_eq!(cols.len(), 49);
    assert_eq!(&cols[4..9], &["0", "0", "0", "0", "0"]);
    // downlink packet size: max, min, avg
    assert_eq!(&cols[12..15], &["0", "9223372036854775807", "0"]);
    assert_eq!(cols[33], "NaN");
    assert_eq!(cols[48], "NaN");
}

#[test]
fn packets_after_close_are_counted_as_rejected() {
    let batch = RecordReader::default()
        .read(std::io::Cursor::new(
            [
                Pkt::up("1.000000").flag(SYN).line(),
                Pkt::down("1.000100").flag(SYN).flag(ACK).line(),
                Pkt::up("2.000000").flag(FIN).line(),
                Pkt::down("2.000100").flag(FIN).flag(ACK).line(),
                Pkt::up("2.000200").flag(ACK).line(),
                Pkt::up("3.000000").size(1400).line(),
            ]
            .join("\n"),
        ))
        .unwrap();

    let mut extractor = FeatureExtractor::new();
    extractor.push_batch(&batch).unwrap();
    let (vectors, summary) = extractor.flush();
    assert_eq!(vectors.len(), 1);
    assert_eq!(summary.records, 6);
    assert_eq!(summary.rejected, 1);
    assert_eq!(vectors[0].get("pkgsizeup-max").unwrap().to_string(), "60");
}

#[test]
fn malformed_record_aborts_with_line_number() {
    let dir = tempfile::tempdir().unwrap();
    let good = Pkt::up("1.000000").line();
    let bad = good.replace(",60,", ",sixty,");
    let input = write_input(dir.path(), &[], &[&good, &bad]);
    let config = config_for(dir.path(), input, OutputFormat::Csv);

    match flow_features::run(&config) {
        Err(ProcessError::Record { line, .. }) => assert_eq!(line, 2),
        other => panic!("expected record error, got {:?}", other.map(|s| s.flows)),
    }
}

#[test]
fn missing_input_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(dir.path(), dir.path().join("absent.csv"), OutputFormat::Csv);
    assert!(matches!(
        flow_features::run(&config),
        Err(ProcessError::Io { .. })
    ));
}

#[test]
fn flows_are_emitted_in_creation_order() {
    let mut extractor = FeatureExtractor::new();
    let mut second = Pkt::up("1.000000");
    second.src = "9.9.9.9";
    let mut third = Pkt::up("1.000000");
    third.src = "5.5.5.5";
    for p in [Pkt::up("1.000000"), second, third, Pkt::down("2.000000")] {
        extractor.push(&p.fields()).unwrap();
    }
    let (vectors, _) = extractor.flush();
    let sources: Vec<&str> = vectors
        .iter()
        .map(|v| v.as_slice()[0].as_str().unwrap())
        .collect();
    assert_eq!(sources, vec!["1.1.1.1", "9.9.9.9", "5.5.5.5"]);
}
