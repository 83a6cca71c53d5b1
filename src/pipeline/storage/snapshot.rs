//! The cumulative snapshot: one binary file holding every schema's
//! dataset for a run.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::{ExtractError, Result};
use crate::pipeline::processing::projection::ProjectedRecord;

/// Suffix appended to the input root's basename to name the snapshot.
pub const SNAPSHOT_SUFFIX: &str = "_aggregate.bin";

/// The full schema-to-dataset mapping for one run.
pub type AggregateSnapshot = BTreeMap<String, Vec<ProjectedRecord>>;

/// Encode the whole mapping into one file, replacing any previous
/// snapshot at that path.
pub fn write_snapshot(aggregate: &AggregateSnapshot, path: &Path) -> Result<()> {
    let encoded = bincode::serialize(aggregate)?;
    fs::write(path, encoded).map_err(|e| ExtractError::WriteOutput {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Decode a snapshot written by [`write_snapshot`].
pub fn read_snapshot(path: &Path) -> Result<AggregateSnapshot> {
    let bytes = fs::read(path).map_err(|e| ExtractError::ReadSource {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(bincode::deserialize(&bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::processing::projection::FieldValue;

    #[test]
    fn snapshot_round_trips() {
        let mut record = ProjectedRecord::new();
        record.insert("probe_asn".to_string(), FieldValue::Str("AS1".to_string()));
        record.insert("date".to_string(), FieldValue::Str("2023-01-01".to_string()));
        record.insert("dir_port_total".to_string(), FieldValue::Int(0));

        let mut aggregate = AggregateSnapshot::new();
        aggregate.insert("tor".to_string(), vec![record]);

        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("input_aggregate.bin");
        write_snapshot(&aggregate, &path).unwrap();

        let decoded = read_snapshot(&path).unwrap();
        assert_eq!(decoded, aggregate);
    }

    #[test]
    fn an_existing_snapshot_is_replaced() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("input_aggregate.bin");

        let mut first = AggregateSnapshot::new();
        first.insert("dash".to_string(), Vec::new());
        first.insert("tor".to_string(), Vec::new());
        write_snapshot(&first, &path).unwrap();

        let second = AggregateSnapshot::new();
        write_snapshot(&second, &path).unwrap();

        assert_eq!(read_snapshot(&path).unwrap(), second);
    }
}
