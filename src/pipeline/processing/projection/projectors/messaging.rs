//! Projection for the messaging-platform tests: facebookmessenger,
//! signal, telegram, and whatsapp.

use serde_json::Value;

use super::super::{
    copy_optional, copy_record_field, copy_required, require_object, required_list_len,
    FieldValue, ProjectedRecord, ProjectionError,
};

/// Per-endpoint DNS consistency and reachability verdicts reported by
/// the Facebook Messenger test.
const FACEBOOK_FIELDS: [&str; 16] = [
    "facebook_b_api_dns_consistent",
    "facebook_b_api_reachable",
    "facebook_b_graph_dns_consistent",
    "facebook_b_graph_reachable",
    "facebook_dns_blocking",
    "facebook_edge_dns_consistent",
    "facebook_edge_reachable",
    "facebook_external_cdn_dns_consistent",
    "facebook_external_cdn_reachable",
    "facebook_scontent_cdn_dns_consistent",
    "facebook_scontent_cdn_reachable",
    "facebook_star_dns_consistent",
    "facebook_star_reachable",
    "facebook_stun_dns_consistent",
    "facebook_stun_reachable",
    "facebook_tcp_blocking",
];

pub fn project_facebook_messenger(
    test_keys: &Value,
    out: &mut ProjectedRecord,
) -> Result<(), ProjectionError> {
    let keys = require_object(test_keys, "test_keys")?;
    for field in FACEBOOK_FIELDS {
        copy_required(keys, field, out)?;
    }
    Ok(())
}

pub fn project_signal(
    record: &Value,
    test_keys: &Value,
    out: &mut ProjectedRecord,
) -> Result<(), ProjectionError> {
    copy_record_field(record, "resolver_asn", out)?;
    let keys = require_object(test_keys, "test_keys")?;
    copy_required(keys, "failure", out)?;
    copy_required(keys, "signal_backend_status", out)?;
    copy_required(keys, "signal_backend_failure", out)?;
    Ok(())
}

pub fn project_telegram(
    record: &Value,
    test_keys: &Value,
    out: &mut ProjectedRecord,
) -> Result<(), ProjectionError> {
    copy_record_field(record, "resolver_asn", out)?;
    let keys = require_object(test_keys, "test_keys")?;
    copy_optional(keys, "failure", out);
    copy_optional(keys, "telegram_http_blocking", out);
    copy_optional(keys, "telegram_tcp_blocking", out);
    copy_optional(keys, "telegram_web_failure", out);
    copy_optional(keys, "telegram_web_status", out);
    Ok(())
}

pub fn project_whatsapp(
    record: &Value,
    test_keys: &Value,
    out: &mut ProjectedRecord,
) -> Result<(), ProjectionError> {
    copy_record_field(record, "resolver_asn", out)?;
    let keys = require_object(test_keys, "test_keys")?;
    copy_optional(keys, "failure", out);
    copy_optional(keys, "registration_server_failure", out);
    copy_optional(keys, "registration_server_status", out);
    // The endpoint lists are stored as their lengths, not the lists.
    out.insert(
        "whatsapp_endpoints_blocked".to_string(),
        FieldValue::Int(required_list_len(keys, "whatsapp_endpoints_blocked")?),
    );
    out.insert(
        "whatsapp_endpoints_dns_inconsistent".to_string(),
        FieldValue::Int(required_list_len(keys, "whatsapp_endpoints_dns_inconsistent")?),
    );
    copy_optional(keys, "whatsapp_endpoints_status", out);
    copy_optional(keys, "whatsapp_web_failure", out);
    copy_optional(keys, "whatsapp_web_status", out);
    Ok(())
}
