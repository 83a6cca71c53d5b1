//! Projection for the tor test: eight per-target reachability counters.

use serde_json::Value;

use super::super::{
    copy_record_field, copy_required, require_object, FieldValue, ProjectedRecord, ProjectionError,
};

const TOR_COUNTERS: [&str; 8] = [
    "dir_port_total",
    "dir_port_accessible",
    "obfs4_total",
    "obfs4_accessible",
    "or_port_dirauth_total",
    "or_port_dirauth_accessible",
    "or_port_total",
    "or_port_accessible",
];

pub fn project_tor(
    record: &Value,
    test_keys: &Value,
    out: &mut ProjectedRecord,
) -> Result<(), ProjectionError> {
    copy_record_field(record, "resolver_asn", out)?;

    // A run that never reached any target reports test_keys as null;
    // every counter is zero in that case.
    if test_keys.is_null() {
        for counter in TOR_COUNTERS {
            out.insert(counter.to_string(), FieldValue::Int(0));
        }
        return Ok(());
    }

    let keys = require_object(test_keys, "test_keys")?;
    for counter in TOR_COUNTERS {
        copy_required(keys, counter, out)?;
    }
    Ok(())
}
