//! Wiring from configuration to a ready lookup service.

use std::sync::Arc;

use crate::domain::errors::ConnectorApiError;
use crate::domain::models::{Config, SummaryMode};
use crate::domain::ports::{NullSummaryNotifier, SummaryNotifier};
use crate::infrastructure::connector::ProfileConnectorClient;
use crate::services::ProfileLookupService;

/// Build the lookup service backed by the HTTP connector client.
pub fn build_lookup_service(config: &Config) -> Result<ProfileLookupService, ConnectorApiError> {
    let client = Arc::new(ProfileConnectorClient::new(&config.connector)?);

    let summary: Arc<dyn SummaryNotifier> = match config.summary.mode {
        SummaryMode::Disabled => Arc::new(NullSummaryNotifier),
        SummaryMode::Http => client.clone(),
    };

    Ok(ProfileLookupService::new(
        client.clone(),
        client,
        summary,
        config.attribute_keys.clone(),
    ))
}
