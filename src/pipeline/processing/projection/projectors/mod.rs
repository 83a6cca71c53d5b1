// Per-family projection functions, one module per group of test types
// that share a field shape.

pub mod basic;
pub mod http;
pub mod messaging;
pub mod tor;
pub mod web_connectivity;
