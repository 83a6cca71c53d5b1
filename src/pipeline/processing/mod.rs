// Pipeline processing: per-test-type field projection

pub mod projection;
