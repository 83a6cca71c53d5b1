//! Projection for webconnectivity, the only test keyed by a measured
//! input URL. Most consistency and blocking verdicts are optional in
//! the wild, so absent ones are stored as nulls rather than faulting.

use serde_json::Value;

use super::super::{copy_optional, copy_record_field, require_object, ProjectedRecord, ProjectionError};

const OPTIONAL_FIELDS: [&str; 14] = [
    "control_failure",
    "x_dns_flags",
    "dns_experiment_failure",
    "dns_consistency",
    "http_experiment_failure",
    "x_blocking_flags",
    "x_null_null_flags",
    "body_proportion",
    "body_length_match",
    "headers_match",
    "status_code_match",
    "title_match",
    "blocking",
    "accessible",
];

pub fn project_web_connectivity(
    record: &Value,
    test_keys: &Value,
    out: &mut ProjectedRecord,
) -> Result<(), ProjectionError> {
    copy_record_field(record, "input", out)?;
    copy_record_field(record, "resolver_asn", out)?;
    let keys = require_object(test_keys, "test_keys")?;
    for field in OPTIONAL_FIELDS {
        copy_optional(keys, field, out);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::super::{project, FieldValue, ProjectionError, SchemaKind};
    use serde_json::json;

    #[test]
    fn projects_input_and_all_verdict_columns() {
        let record = json!({
            "probe_asn": "AS1234",
            "resolver_asn": "AS5678",
            "input": "https://example.org/",
            "test_keys": {
                "blocking": false,
                "accessible": true,
                "body_proportion": 0.98,
            },
        });

        let out = project(&record, Some(SchemaKind::WebConnectivity)).unwrap();
        // input + probe_asn + resolver_asn + 14 verdict fields
        assert_eq!(out.len(), 17);
        assert_eq!(out.get("input"), Some(&FieldValue::Str("https://example.org/".to_string())));
        assert_eq!(out.get("accessible"), Some(&FieldValue::Bool(true)));
        assert_eq!(out.get("body_proportion"), Some(&FieldValue::Float(0.98)));
        assert_eq!(out.get("dns_consistency"), Some(&FieldValue::Null));
    }

    #[test]
    fn missing_input_is_a_fault() {
        let record = json!({
            "probe_asn": "AS1234",
            "resolver_asn": "AS5678",
            "test_keys": {},
        });

        let err = project(&record, Some(SchemaKind::WebConnectivity)).unwrap_err();
        assert_eq!(err, ProjectionError::MissingField("input".to_string()));
    }
}
