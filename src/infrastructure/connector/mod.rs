//! Profile Connector and Contexts API adapter

pub mod client;

pub use client::ProfileConnectorClient;
