//! Service layer: the lookup pipeline and its background context linking.

pub mod context_linker;
pub mod profile_lookup;

pub use context_linker::{ContextLinkTask, ContextLinker};
pub use profile_lookup::{LookupOutcome, ProfileLookupService};
