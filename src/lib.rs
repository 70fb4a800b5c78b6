//! Profile Lookup - customer profile resolution through the Profile Connector
//!
//! Resolves a profile by phone or email, optionally links it to a task's
//! context record, and optionally triggers an AI summary.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): lookup models, selection policy, ports
//! - **Service Layer** (`services`): the lookup pipeline and context linking
//! - **Infrastructure Layer** (`infrastructure`): HTTP client, config, logging, HTTP server
//! - **CLI Layer** (`cli`): Command-line interface
//!
//! # Example
//!
//! ```no_run
//! use profile_lookup::{build_lookup_service, ConfigLoader, LookupRequest};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ConfigLoader::load(None)?;
//!     let service = build_lookup_service(&config)?;
//!     let outcome = service.lookup(&LookupRequest::by_phone("+15551234567")).await?;
//!     println!("{:?}", outcome.profile);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::errors::{ConnectorApiError, LookupError, LookupResult};
pub use domain::models::{
    AttributeKeys, CandidateProfile, Config, ConnectorConfig, ConnectorInstanceId, LookupRequest,
    ProfileStatus, SummaryMode,
};
pub use domain::ports::{ContextStore, ProfileConnector, SummaryNotifier};
pub use infrastructure::build_lookup_service;
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{ContextLinkTask, LookupOutcome, ProfileLookupService};
