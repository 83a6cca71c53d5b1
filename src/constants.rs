/// Test-type identifier constants to ensure consistency across the codebase.
/// Each identifier doubles as the directory name under the input root and as
/// the dispatch key for field projection.

pub const DASH: &str = "dash";
pub const DNSCHECK: &str = "dnscheck";
pub const FACEBOOK_MESSENGER: &str = "facebookmessenger";
// Spelled the way the measurement archives spell it.
pub const HTTP_HEADER_FIELD_MANIPULATION: &str = "httpheaderfieldnamnipulation";
pub const HTTP_INVALID_REQUEST_LINE: &str = "httpinvalidrequestline";
pub const NDT: &str = "ndt";
pub const PSIPHON: &str = "psiphon";
pub const RISEUPVPN: &str = "riseupvpn";
pub const SIGNAL: &str = "signal";
pub const STUN_REACHABILITY: &str = "stunreachability";
pub const TELEGRAM: &str = "telegram";
pub const TOR: &str = "tor";
pub const TORSF: &str = "torsf";
pub const VANILLA_TOR: &str = "vanillator";
pub const WEB_CONNECTIVITY: &str = "webconnectivity";
pub const WHATSAPP: &str = "whatsapp";

/// File extension of the compressed measurement archives.
pub const ARCHIVE_EXTENSION: &str = "gz";

/// Get all recognized test-type identifiers
pub fn supported_schemas() -> Vec<&'static str> {
    vec![
        DASH,
        DNSCHECK,
        FACEBOOK_MESSENGER,
        HTTP_HEADER_FIELD_MANIPULATION,
        HTTP_INVALID_REQUEST_LINE,
        NDT,
        PSIPHON,
        RISEUPVPN,
        SIGNAL,
        STUN_REACHABILITY,
        TELEGRAM,
        TOR,
        TORSF,
        VANILLA_TOR,
        WEB_CONNECTIVITY,
        WHATSAPP,
    ]
}
