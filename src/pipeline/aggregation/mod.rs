// Pipeline aggregation: the two-level directory walk that turns
// <schema>/<date>/<archive>.gz trees into per-schema datasets

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

use crate::constants;
use crate::error::{ExtractError, Result};
use crate::pipeline::ingestion;
use crate::pipeline::processing::projection::{
    self, FieldValue, ProjectedRecord, SchemaKind, DATE_FIELD,
};

/// Counters accumulated while aggregating one schema's directory tree.
#[derive(Debug, Default, Clone, Serialize)]
pub struct SchemaStats {
    pub archives_read: usize,
    pub records_decoded: usize,
    pub lines_skipped: usize,
    pub records_projected: usize,
    pub records_faulted: usize,
}

/// One schema's aggregated dataset plus its counters.
#[derive(Debug, Default)]
pub struct SchemaAggregate {
    pub records: Vec<ProjectedRecord>,
    pub stats: SchemaStats,
}

/// The full aggregate of one run: every discovered schema mapped to
/// its dataset, with per-schema counters alongside.
#[derive(Debug, Default)]
pub struct RunAggregate {
    pub datasets: BTreeMap<String, Vec<ProjectedRecord>>,
    pub stats: BTreeMap<String, SchemaStats>,
}

fn read_dir(dir: &Path) -> Result<fs::ReadDir> {
    fs::read_dir(dir).map_err(|e| ExtractError::ReadSource {
        path: dir.to_path_buf(),
        source: e,
    })
}

fn is_archive(path: &Path) -> bool {
    !path.is_dir()
        && path.extension().and_then(|e| e.to_str()) == Some(constants::ARCHIVE_EXTENSION)
}

/// Aggregate every archive under one schema directory.
///
/// Immediate subdirectories are date buckets; each archive inside one
/// is read, projected record by record, and tagged with the bucket
/// name as its `date`. Traversal follows directory-listing order; the
/// CSV stage is the one that sorts. Projection faults skip the record
/// and bump a counter, they never abort the walk.
pub fn aggregate_schema(base_dir: &Path, schema_id: &str) -> Result<SchemaAggregate> {
    let kind = SchemaKind::from_name(schema_id);
    let mut aggregate = SchemaAggregate::default();

    for entry in read_dir(base_dir)? {
        let entry = entry.map_err(|e| ExtractError::ReadSource {
            path: base_dir.to_path_buf(),
            source: e,
        })?;
        let date_dir = entry.path();
        if !date_dir.is_dir() {
            continue;
        }
        let date = entry.file_name().to_string_lossy().to_string();
        if NaiveDate::parse_from_str(&date, "%Y-%m-%d").is_err() {
            warn!(schema = %schema_id, "date directory is not YYYY-MM-DD: {}", date);
        }

        for archive in read_dir(&date_dir)? {
            let archive = archive.map_err(|e| ExtractError::ReadSource {
                path: date_dir.to_path_buf(),
                source: e,
            })?;
            let archive_path = archive.path();
            if !is_archive(&archive_path) {
                continue;
            }

            let batch = ingestion::read_archive(&archive_path)?;
            aggregate.stats.archives_read += 1;
            aggregate.stats.records_decoded += batch.records.len();
            aggregate.stats.lines_skipped += batch.skipped_lines;

            for raw in &batch.records {
                if raw.is_null() {
                    continue;
                }
                match projection::project(raw, kind) {
                    Ok(mut projected) => {
                        projected.insert(DATE_FIELD.to_string(), FieldValue::Str(date.clone()));
                        aggregate.records.push(projected);
                        aggregate.stats.records_projected += 1;
                    }
                    Err(err) => {
                        aggregate.stats.records_faulted += 1;
                        warn!(
                            schema = %schema_id,
                            date = %date,
                            archive = %archive_path.display(),
                            "skipping record: {}",
                            err
                        );
                    }
                }
            }
        }
    }

    Ok(aggregate)
}

/// Aggregate every schema directory under the input root. Each
/// top-level directory name is the schema identifier for everything
/// beneath it.
pub fn aggregate_all(input_root: &Path) -> Result<RunAggregate> {
    let mut run = RunAggregate::default();

    for entry in read_dir(input_root)? {
        let entry = entry.map_err(|e| ExtractError::ReadSource {
            path: input_root.to_path_buf(),
            source: e,
        })?;
        let schema_dir = entry.path();
        if !schema_dir.is_dir() {
            continue;
        }
        let schema_id = entry.file_name().to_string_lossy().to_string();
        if SchemaKind::from_name(&schema_id).is_none() {
            warn!(
                "unrecognized test type '{}': records keep probe_asn and date only",
                schema_id
            );
        }

        let aggregate = aggregate_schema(&schema_dir, &schema_id)?;
        info!(
            schema = %schema_id,
            records = aggregate.stats.records_projected,
            faulted = aggregate.stats.records_faulted,
            "schema aggregated"
        );
        run.stats.insert(schema_id.clone(), aggregate.stats);
        run.datasets.insert(schema_id, aggregate.records);
    }

    Ok(run)
}
