//! Null summary notifier.
//!
//! The Summary route is not reachable from deployed functions, so this is the
//! default until it opens up.

use async_trait::async_trait;

use super::SummaryNotifier;
use crate::domain::errors::ConnectorApiError;

/// Accepts every summary request and does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSummaryNotifier;

#[async_trait]
impl SummaryNotifier for NullSummaryNotifier {
    async fn post_summary(&self, profile_sid: &str) -> Result<(), ConnectorApiError> {
        tracing::debug!(profile_sid, "summary notifications disabled, skipping");
        Ok(())
    }
}
