//! Infrastructure layer: adapters and process plumbing.

pub mod config;
pub mod connector;
pub mod http;
pub mod logging;
pub mod setup;

pub use setup::build_lookup_service;
