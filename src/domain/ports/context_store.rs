use async_trait::async_trait;

use crate::domain::errors::ConnectorApiError;
use crate::domain::models::{ContextRecord, NewContext};

/// Contexts API operations used to link a profile to a task.
#[async_trait]
pub trait ContextStore: Send + Sync {
    /// Create a context record.
    async fn create_context(&self, context: &NewContext) -> Result<ContextRecord, ConnectorApiError>;

    /// Register `lookup_id` as a LookupId of the context.
    async fn attach_lookup_id(
        &self,
        context_sid: &str,
        lookup_id: &str,
    ) -> Result<(), ConnectorApiError>;
}
