use anyhow::Result;
use flate2::write::GzEncoder;
use flate2::Compression;
use serde_json::json;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::tempdir;

use ooni_extract::pipeline::aggregation::aggregate_all;
use ooni_extract::pipeline::projection::FieldValue;
use ooni_extract::pipeline::storage::{read_snapshot, write_csv, write_snapshot, SNAPSHOT_SUFFIX};

fn write_archive(dir: &Path, name: &str, lines: &[String]) -> Result<()> {
    let file = fs::File::create(dir.join(name))?;
    let mut encoder = GzEncoder::new(file, Compression::default());
    encoder.write_all(lines.join("\n").as_bytes())?;
    encoder.finish()?;
    Ok(())
}

#[test]
fn webconnectivity_tree_end_to_end() -> Result<()> {
    let input = tempdir()?;
    let output = tempdir()?;

    let day = input.path().join("webconnectivity").join("2023-01-01");
    fs::create_dir_all(&day)?;
    let valid = json!({
        "probe_asn": "AS1234",
        "resolver_asn": "AS5678",
        "input": "https://example.org/",
        "test_keys": {
            "blocking": false,
            "accessible": true,
            "dns_consistency": "consistent",
        },
    });
    write_archive(
        &day,
        "a.jsonl.gz",
        &[valid.to_string(), "{corrupt line".to_string()],
    )?;

    let aggregate = aggregate_all(input.path())?;
    assert_eq!(aggregate.datasets.len(), 1);

    let stats = aggregate.stats.get("webconnectivity").unwrap();
    assert_eq!(stats.records_projected, 1);
    assert_eq!(stats.lines_skipped, 1);
    assert_eq!(stats.records_faulted, 0);

    // Snapshot holds exactly the one schema with its one record
    let snapshot_path = output
        .path()
        .join(format!("{}{}", "input", SNAPSHOT_SUFFIX));
    write_snapshot(&aggregate.datasets, &snapshot_path)?;
    let decoded = read_snapshot(&snapshot_path)?;
    assert_eq!(decoded.keys().collect::<Vec<_>>(), vec!["webconnectivity"]);
    let records = decoded.get("webconnectivity").unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(
        records[0].get("date"),
        Some(&FieldValue::Str("2023-01-01".to_string()))
    );
    assert_eq!(
        records[0].get("input"),
        Some(&FieldValue::Str("https://example.org/".to_string()))
    );

    // CSV has a header plus exactly one data row dated 2023-01-01
    let csv_path = output.path().join("webconnectivity.csv");
    write_csv(records, &csv_path)?;
    let mut reader = csv::Reader::from_path(&csv_path)?;
    let header = reader.headers()?.clone();
    assert_eq!(&header[0], "date");
    assert_eq!(&header[1], "probe_asn");
    let rows: Vec<csv::StringRecord> = reader.records().collect::<std::result::Result<_, _>>()?;
    assert_eq!(rows.len(), 1);
    assert_eq!(&rows[0][0], "2023-01-01");
    assert_eq!(&rows[0][1], "AS1234");

    Ok(())
}

#[test]
fn empty_input_root_yields_empty_snapshot_and_no_csvs() -> Result<()> {
    let input = tempdir()?;
    let output = tempdir()?;

    let aggregate = aggregate_all(input.path())?;
    assert!(aggregate.datasets.is_empty());

    let snapshot_path = output.path().join(format!("empty{}", SNAPSHOT_SUFFIX));
    write_snapshot(&aggregate.datasets, &snapshot_path)?;
    assert!(read_snapshot(&snapshot_path)?.is_empty());

    // No datasets, so nothing but the snapshot lands in the output dir
    let entries: Vec<_> = fs::read_dir(output.path())?.collect();
    assert_eq!(entries.len(), 1);

    Ok(())
}

#[test]
fn tor_null_test_keys_aggregates_with_zeroed_counters() -> Result<()> {
    let input = tempdir()?;

    let day = input.path().join("tor").join("2023-03-05");
    fs::create_dir_all(&day)?;
    let record = json!({
        "probe_asn": "AS1234",
        "resolver_asn": "AS5678",
        "test_keys": null,
    });
    write_archive(&day, "a.jsonl.gz", &[record.to_string()])?;

    let aggregate = aggregate_all(input.path())?;
    let stats = aggregate.stats.get("tor").unwrap();
    assert_eq!(stats.records_faulted, 0);

    let records = aggregate.datasets.get("tor").unwrap();
    assert_eq!(records.len(), 1);
    for counter in [
        "dir_port_total",
        "dir_port_accessible",
        "obfs4_total",
        "obfs4_accessible",
        "or_port_dirauth_total",
        "or_port_dirauth_accessible",
        "or_port_total",
        "or_port_accessible",
    ] {
        assert_eq!(records[0].get(counter), Some(&FieldValue::Int(0)), "{counter}");
    }

    Ok(())
}

#[test]
fn csv_rows_come_back_in_date_order_across_archives() -> Result<()> {
    let input = tempdir()?;
    let output = tempdir()?;

    // Two date buckets written out of order
    for (day, asn) in [("2023-02-01", "AS2"), ("2023-01-15", "AS1")] {
        let dir = input.path().join("dash").join(day);
        fs::create_dir_all(&dir)?;
        let record = json!({
            "probe_asn": asn,
            "resolver_asn": "AS9",
            "test_keys": {"failure": null},
        });
        write_archive(&dir, "a.jsonl.gz", &[record.to_string()])?;
    }

    let aggregate = aggregate_all(input.path())?;
    let csv_path = output.path().join("dash.csv");
    write_csv(aggregate.datasets.get("dash").unwrap(), &csv_path)?;

    let mut reader = csv::Reader::from_path(&csv_path)?;
    let dates: Vec<String> = reader
        .records()
        .map(|row| row.map(|r| r[0].to_string()))
        .collect::<std::result::Result<_, _>>()?;
    assert_eq!(dates, vec!["2023-01-15", "2023-02-01"]);

    Ok(())
}

#[test]
fn one_faulted_record_does_not_void_its_archive() -> Result<()> {
    let input = tempdir()?;

    let day = input.path().join("signal").join("2023-04-01");
    fs::create_dir_all(&day)?;
    let good = json!({
        "probe_asn": "AS1",
        "resolver_asn": "AS9",
        "test_keys": {
            "failure": null,
            "signal_backend_status": "ok",
            "signal_backend_failure": null,
        },
    });
    let bad = json!({
        "probe_asn": "AS2",
        "resolver_asn": "AS9",
        "test_keys": {"failure": null},
    });
    write_archive(&day, "a.jsonl.gz", &[good.to_string(), bad.to_string()])?;

    let aggregate = aggregate_all(input.path())?;
    let stats = aggregate.stats.get("signal").unwrap();
    assert_eq!(stats.records_projected, 1);
    assert_eq!(stats.records_faulted, 1);
    assert_eq!(aggregate.datasets.get("signal").unwrap().len(), 1);

    Ok(())
}
