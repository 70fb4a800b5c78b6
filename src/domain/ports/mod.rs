//! Port trait definitions (Hexagonal Architecture)
//!
//! Async trait interfaces the infrastructure adapters implement:
//! - ProfileConnector: connector instance resolution and profile Find
//! - ContextStore: context creation and LookupId attachment
//! - SummaryNotifier: AI summary extension point

pub mod context_store;
pub mod null_summary;
pub mod profile_connector;
pub mod summary_notifier;

pub use context_store::ContextStore;
pub use null_summary::NullSummaryNotifier;
pub use profile_connector::ProfileConnector;
pub use summary_notifier::SummaryNotifier;
