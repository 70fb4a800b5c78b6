//! HTTP transport for the lookup service

pub mod server;

pub use server::{ErrorResponse, ProfileLookupHttpServer};
