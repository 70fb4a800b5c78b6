//! Domain layer: lookup models, errors, and the ports the pipeline talks through.

pub mod errors;
pub mod models;
pub mod ports;
