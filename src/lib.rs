//! Batch extractor for OONI network-measurement archives.
//!
//! Walks a `<schema>/<date>/<archive>.gz` tree, decodes each archive's
//! line-delimited JSON, projects the per-test-type field subset out of
//! every record, and writes one CSV dataset per schema plus a single
//! cumulative binary snapshot.

pub mod constants;
pub mod error;
pub mod logging;
pub mod pipeline;
