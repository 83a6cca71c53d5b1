use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use thiserror::Error;

pub mod projectors;
pub mod schema;

pub use schema::SchemaKind;

/// Field name added to every record during aggregation.
pub const DATE_FIELD: &str = "date";
/// Field name carried by every projected record.
pub const PROBE_ASN_FIELD: &str = "probe_asn";

/// An owned scalar-or-container value extracted from a raw record.
///
/// Mirrors the JSON shapes that survive projection. Tagged, so the
/// snapshot round-trips through a non-self-describing encoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<FieldValue>),
    Map(BTreeMap<String, FieldValue>),
}

impl FieldValue {
    pub fn from_json(value: &Value) -> FieldValue {
        match value {
            Value::Null => FieldValue::Null,
            Value::Bool(b) => FieldValue::Bool(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => FieldValue::Int(i),
                None => FieldValue::Float(n.as_f64().unwrap_or_default()),
            },
            Value::String(s) => FieldValue::Str(s.clone()),
            Value::Array(items) => {
                FieldValue::List(items.iter().map(FieldValue::from_json).collect())
            }
            Value::Object(map) => FieldValue::Map(
                map.iter()
                    .map(|(k, v)| (k.clone(), FieldValue::from_json(v)))
                    .collect(),
            ),
        }
    }

    fn as_json(&self) -> Value {
        match self {
            FieldValue::Null => Value::Null,
            FieldValue::Bool(b) => Value::Bool(*b),
            FieldValue::Int(i) => Value::from(*i),
            FieldValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            FieldValue::Str(s) => Value::String(s.clone()),
            FieldValue::List(items) => Value::Array(items.iter().map(FieldValue::as_json).collect()),
            FieldValue::Map(map) => Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.as_json()))
                    .collect(),
            ),
        }
    }

    /// Render the value as a CSV cell. Null becomes an empty cell;
    /// containers render as compact JSON text.
    pub fn render(&self) -> String {
        match self {
            FieldValue::Null => String::new(),
            FieldValue::Bool(b) => b.to_string(),
            FieldValue::Int(i) => i.to_string(),
            FieldValue::Float(f) => f.to_string(),
            FieldValue::Str(s) => s.clone(),
            other => serde_json::to_string(&other.as_json()).unwrap_or_default(),
        }
    }
}

/// A flat field-name to value mapping holding one schema's projection
/// of a raw record.
pub type ProjectedRecord = BTreeMap<String, FieldValue>;

/// A per-record projection fault. Recoverable: the aggregator skips
/// the offending record and keeps a count.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProjectionError {
    #[error("record is missing required field `{0}`")]
    MissingField(String),

    #[error("field `{field}` is not {expected}")]
    UnexpectedShape {
        field: String,
        expected: &'static str,
    },
}

/// Project the schema-specific field subset out of one raw record.
///
/// Every record must carry `probe_asn` and a `test_keys` entry, whatever
/// its test type. An unrecognized test type (`schema` of `None`) keeps
/// only `probe_asn`.
pub fn project(
    record: &Value,
    schema: Option<SchemaKind>,
) -> std::result::Result<ProjectedRecord, ProjectionError> {
    let mut out = ProjectedRecord::new();
    copy_record_field(record, PROBE_ASN_FIELD, &mut out)?;
    let test_keys = record
        .get("test_keys")
        .ok_or_else(|| ProjectionError::MissingField("test_keys".to_string()))?;

    let Some(kind) = schema else {
        return Ok(out);
    };

    match kind {
        SchemaKind::Dash
        | SchemaKind::Ndt
        | SchemaKind::Psiphon
        | SchemaKind::RiseupVpn
        | SchemaKind::StunReachability
        | SchemaKind::Torsf
        | SchemaKind::VanillaTor => projectors::basic::project_failure(record, test_keys, &mut out)?,
        SchemaKind::DnsCheck => {
            projectors::basic::project_bootstrap_failure(record, test_keys, &mut out)?
        }
        SchemaKind::FacebookMessenger => {
            projectors::messaging::project_facebook_messenger(test_keys, &mut out)?
        }
        SchemaKind::HttpHeaderFieldManipulation => {
            projectors::http::project_header_field_manipulation(test_keys, &mut out)?
        }
        SchemaKind::HttpInvalidRequestLine => {
            projectors::http::project_invalid_request_line(test_keys, &mut out)?
        }
        SchemaKind::Signal => projectors::messaging::project_signal(record, test_keys, &mut out)?,
        SchemaKind::Telegram => {
            projectors::messaging::project_telegram(record, test_keys, &mut out)?
        }
        SchemaKind::Tor => projectors::tor::project_tor(record, test_keys, &mut out)?,
        SchemaKind::WebConnectivity => {
            projectors::web_connectivity::project_web_connectivity(record, test_keys, &mut out)?
        }
        SchemaKind::WhatsApp => {
            projectors::messaging::project_whatsapp(record, test_keys, &mut out)?
        }
    }

    Ok(out)
}

/// Copy a required top-level record field into the projection.
pub(crate) fn copy_record_field(
    record: &Value,
    field: &str,
    out: &mut ProjectedRecord,
) -> std::result::Result<(), ProjectionError> {
    let value = record
        .get(field)
        .ok_or_else(|| ProjectionError::MissingField(field.to_string()))?;
    out.insert(field.to_string(), FieldValue::from_json(value));
    Ok(())
}

/// View a value as a JSON object, faulting with the field's name otherwise.
pub(crate) fn require_object<'a>(
    value: &'a Value,
    field: &str,
) -> std::result::Result<&'a Map<String, Value>, ProjectionError> {
    value.as_object().ok_or_else(|| ProjectionError::UnexpectedShape {
        field: field.to_string(),
        expected: "an object",
    })
}

/// Copy a required key out of an object into the projection.
pub(crate) fn copy_required(
    map: &Map<String, Value>,
    field: &str,
    out: &mut ProjectedRecord,
) -> std::result::Result<(), ProjectionError> {
    let value = map
        .get(field)
        .ok_or_else(|| ProjectionError::MissingField(field.to_string()))?;
    out.insert(field.to_string(), FieldValue::from_json(value));
    Ok(())
}

/// Copy an optional key out of an object; an absent key stores Null.
pub(crate) fn copy_optional(map: &Map<String, Value>, field: &str, out: &mut ProjectedRecord) {
    let value = map.get(field).map(FieldValue::from_json).unwrap_or(FieldValue::Null);
    out.insert(field.to_string(), value);
}

/// Length of a required list-valued key.
pub(crate) fn required_list_len(
    map: &Map<String, Value>,
    field: &str,
) -> std::result::Result<i64, ProjectionError> {
    let value = map
        .get(field)
        .ok_or_else(|| ProjectionError::MissingField(field.to_string()))?;
    let items = value.as_array().ok_or_else(|| ProjectionError::UnexpectedShape {
        field: field.to_string(),
        expected: "a list",
    })?;
    Ok(items.len() as i64)
}
