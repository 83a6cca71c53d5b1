// Pipeline ingestion: decompressing one measurement archive into raw records

use flate2::read::GzDecoder;
use serde_json::Value;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

use crate::error::{ExtractError, Result};

/// The decoded contents of one archive, records in file order.
#[derive(Debug, Default)]
pub struct ArchiveBatch {
    pub records: Vec<Value>,
    /// Non-empty lines that failed to parse as JSON. Corrupt or
    /// truncated lines are expected in the wild and are not faults.
    pub skipped_lines: usize,
}

/// Decompress a gzip archive of line-delimited JSON and decode each
/// line as one raw record.
///
/// The archive is loaded whole; the caller owns the batch. An
/// unreadable path or a corrupt gzip container is fatal, a bad line
/// is not.
pub fn read_archive(path: &Path) -> Result<ArchiveBatch> {
    let file = File::open(path).map_err(|e| ExtractError::ReadSource {
        path: path.to_path_buf(),
        source: e,
    })?;
    let mut decoder = GzDecoder::new(file);
    let mut text = String::new();
    decoder
        .read_to_string(&mut text)
        .map_err(|e| ExtractError::ReadSource {
            path: path.to_path_buf(),
            source: e,
        })?;

    let mut batch = ArchiveBatch::default();
    for line in text.split('\n') {
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<Value>(line) {
            Ok(record) => batch.records.push(record),
            Err(_) => batch.skipped_lines += 1,
        }
    }

    debug!(
        "read {} records from {} ({} lines skipped)",
        batch.records.len(),
        path.display(),
        batch.skipped_lines
    );
    Ok(batch)
}
