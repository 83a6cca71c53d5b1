//! Projection for the HTTP tampering tests. Header-field manipulation
//! flattens the nested `tampering` verdict; invalid-request-line keeps
//! the whole `tampering` value as reported.

use serde_json::Value;

use super::super::{
    copy_required, require_object, FieldValue, ProjectedRecord, ProjectionError,
};

const TAMPERING_FIELDS: [&str; 6] = [
    "header_field_name",
    "header_field_number",
    "header_field_value",
    "header_name_capitalization",
    "request_line_capitalization",
    "total",
];

pub fn project_header_field_manipulation(
    test_keys: &Value,
    out: &mut ProjectedRecord,
) -> Result<(), ProjectionError> {
    let keys = require_object(test_keys, "test_keys")?;
    let tampering = keys
        .get("tampering")
        .ok_or_else(|| ProjectionError::MissingField("tampering".to_string()))?;
    let tampering = require_object(tampering, "tampering")?;
    for field in TAMPERING_FIELDS {
        copy_required(tampering, field, out)?;
    }
    Ok(())
}

pub fn project_invalid_request_line(
    test_keys: &Value,
    out: &mut ProjectedRecord,
) -> Result<(), ProjectionError> {
    let keys = require_object(test_keys, "test_keys")?;
    let tampering = keys
        .get("tampering")
        .ok_or_else(|| ProjectionError::MissingField("tampering".to_string()))?;
    out.insert("tampering".to_string(), FieldValue::from_json(tampering));
    Ok(())
}
