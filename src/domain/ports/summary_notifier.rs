use async_trait::async_trait;

use crate::domain::errors::ConnectorApiError;

/// Downstream AI summary hook, awaited before a lookup responds.
#[async_trait]
pub trait SummaryNotifier: Send + Sync {
    async fn post_summary(&self, profile_sid: &str) -> Result<(), ConnectorApiError>;
}
