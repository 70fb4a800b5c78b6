use async_trait::async_trait;

use crate::domain::errors::ConnectorApiError;
use crate::domain::models::{CandidateProfile, ConnectorInstanceId, LookupAttribute};

/// Read side of the Profile Connector API.
#[async_trait]
pub trait ProfileConnector: Send + Sync {
    /// Fetch the account's active connector instance.
    async fn fetch_connector_instance(&self) -> Result<ConnectorInstanceId, ConnectorApiError>;

    /// Find profiles matching `attribute`, creating one when nothing matches
    /// and `write_if_not_found` is set. Candidates keep the server's order.
    async fn find_profiles(
        &self,
        connector: &ConnectorInstanceId,
        attribute: &LookupAttribute,
        write_if_not_found: bool,
    ) -> Result<Vec<CandidateProfile>, ConnectorApiError>;
}
