use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::constants;

/// The closed set of recognized test types.
///
/// Directory names under the input root resolve here; a name with no
/// variant is handled explicitly by the caller rather than falling
/// through a dispatch chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaKind {
    Dash,
    DnsCheck,
    FacebookMessenger,
    HttpHeaderFieldManipulation,
    HttpInvalidRequestLine,
    Ndt,
    Psiphon,
    RiseupVpn,
    Signal,
    StunReachability,
    Telegram,
    Tor,
    Torsf,
    VanillaTor,
    WebConnectivity,
    WhatsApp,
}

static SCHEMAS_BY_NAME: Lazy<HashMap<&'static str, SchemaKind>> =
    Lazy::new(|| SchemaKind::ALL.iter().map(|kind| (kind.name(), *kind)).collect());

impl SchemaKind {
    pub const ALL: [SchemaKind; 16] = [
        SchemaKind::Dash,
        SchemaKind::DnsCheck,
        SchemaKind::FacebookMessenger,
        SchemaKind::HttpHeaderFieldManipulation,
        SchemaKind::HttpInvalidRequestLine,
        SchemaKind::Ndt,
        SchemaKind::Psiphon,
        SchemaKind::RiseupVpn,
        SchemaKind::Signal,
        SchemaKind::StunReachability,
        SchemaKind::Telegram,
        SchemaKind::Tor,
        SchemaKind::Torsf,
        SchemaKind::VanillaTor,
        SchemaKind::WebConnectivity,
        SchemaKind::WhatsApp,
    ];

    /// The identifier this test type carries in the archive layout.
    pub fn name(&self) -> &'static str {
        match self {
            SchemaKind::Dash => constants::DASH,
            SchemaKind::DnsCheck => constants::DNSCHECK,
            SchemaKind::FacebookMessenger => constants::FACEBOOK_MESSENGER,
            SchemaKind::HttpHeaderFieldManipulation => constants::HTTP_HEADER_FIELD_MANIPULATION,
            SchemaKind::HttpInvalidRequestLine => constants::HTTP_INVALID_REQUEST_LINE,
            SchemaKind::Ndt => constants::NDT,
            SchemaKind::Psiphon => constants::PSIPHON,
            SchemaKind::RiseupVpn => constants::RISEUPVPN,
            SchemaKind::Signal => constants::SIGNAL,
            SchemaKind::StunReachability => constants::STUN_REACHABILITY,
            SchemaKind::Telegram => constants::TELEGRAM,
            SchemaKind::Tor => constants::TOR,
            SchemaKind::Torsf => constants::TORSF,
            SchemaKind::VanillaTor => constants::VANILLA_TOR,
            SchemaKind::WebConnectivity => constants::WEB_CONNECTIVITY,
            SchemaKind::WhatsApp => constants::WHATSAPP,
        }
    }

    /// Resolve a directory name to its test type, if recognized.
    pub fn from_name(name: &str) -> Option<SchemaKind> {
        SCHEMAS_BY_NAME.get(name).copied()
    }
}
