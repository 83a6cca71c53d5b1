//! Projection for the simple probe tests that report only a resolver
//! and an overall failure: dash, ndt, psiphon, riseupvpn,
//! stunreachability, torsf, and vanillator. dnscheck belongs here too
//! but reports its failure under a different key.

use serde_json::Value;

use super::super::{
    copy_record_field, copy_required, require_object, FieldValue, ProjectedRecord, ProjectionError,
};

pub fn project_failure(
    record: &Value,
    test_keys: &Value,
    out: &mut ProjectedRecord,
) -> Result<(), ProjectionError> {
    copy_record_field(record, "resolver_asn", out)?;
    let keys = require_object(test_keys, "test_keys")?;
    copy_required(keys, "failure", out)?;
    Ok(())
}

pub fn project_bootstrap_failure(
    record: &Value,
    test_keys: &Value,
    out: &mut ProjectedRecord,
) -> Result<(), ProjectionError> {
    copy_record_field(record, "resolver_asn", out)?;
    let keys = require_object(test_keys, "test_keys")?;
    // dnscheck reports its failure as bootstrap_failure; store it
    // under the shared column name.
    let value = keys
        .get("bootstrap_failure")
        .ok_or_else(|| ProjectionError::MissingField("bootstrap_failure".to_string()))?;
    out.insert("failure".to_string(), FieldValue::from_json(value));
    Ok(())
}
