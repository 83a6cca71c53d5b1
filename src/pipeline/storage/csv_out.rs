//! CSV rendering of one schema's aggregated dataset.

use std::collections::BTreeSet;
use std::path::Path;

use crate::error::{ExtractError, Result};
use crate::pipeline::processing::projection::{ProjectedRecord, DATE_FIELD, PROBE_ASN_FIELD};

fn csv_error(path: &Path, source: csv::Error) -> ExtractError {
    ExtractError::Csv {
        path: path.to_path_buf(),
        source,
    }
}

/// Write one schema's records as CSV.
///
/// The header is the union of keys across all records with `date` and
/// `probe_asn` pinned to the first two columns and the rest sorted
/// lexicographically, so the layout is stable across runs. Rows are
/// stably sorted by ascending `date`; a field a record does not carry
/// renders as an empty cell. Every record must carry `date` by the
/// time it reaches this stage.
pub fn write_csv(records: &[ProjectedRecord], path: &Path) -> Result<()> {
    let mut extra_columns: BTreeSet<&str> = BTreeSet::new();
    for record in records {
        if !record.contains_key(DATE_FIELD) {
            return Err(ExtractError::MissingDate {
                path: path.to_path_buf(),
            });
        }
        for key in record.keys() {
            if key != DATE_FIELD && key != PROBE_ASN_FIELD {
                extra_columns.insert(key);
            }
        }
    }

    let mut header: Vec<&str> = vec![DATE_FIELD, PROBE_ASN_FIELD];
    header.extend(extra_columns.iter().copied());

    let mut sorted: Vec<&ProjectedRecord> = records.iter().collect();
    sorted.sort_by_key(|record| record.get(DATE_FIELD).map(|v| v.render()));

    let mut writer = csv::Writer::from_path(path).map_err(|e| csv_error(path, e))?;
    writer.write_record(&header).map_err(|e| csv_error(path, e))?;
    for record in sorted {
        let row: Vec<String> = header
            .iter()
            .map(|column| record.get(*column).map(|v| v.render()).unwrap_or_default())
            .collect();
        writer.write_record(&row).map_err(|e| csv_error(path, e))?;
    }
    writer.flush().map_err(|e| ExtractError::WriteOutput {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}
