use async_trait::async_trait;
use reqwest::{Client as ReqwestClient, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use crate::domain::errors::ConnectorApiError;
use crate::domain::models::{
    CandidateProfile, ConnectorConfig, ConnectorInstance, ConnectorInstanceId, ContextRecord,
    FindProfilesResponse, LookupAttribute, LookupIdRequest, NewContext,
};
use crate::domain::ports::{ContextStore, ProfileConnector, SummaryNotifier};

/// HTTP client for the Profile Connector and Contexts APIs
///
/// One pooled reqwest client shared by every port it implements. All requests
/// authenticate with basic auth built from the account SID and auth token.
/// Nothing is retried.
#[derive(Clone)]
pub struct ProfileConnectorClient {
    http_client: ReqwestClient,
    account_sid: String,
    auth_token: String,
    profile_connector_url: String,
    context_url: String,
}

impl ProfileConnectorClient {
    /// Create a new client from connector configuration
    ///
    /// # Example
    /// ```no_run
    /// use profile_lookup::domain::models::ConnectorConfig;
    /// use profile_lookup::infrastructure::connector::ProfileConnectorClient;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let config = ConnectorConfig {
    ///     account_sid: "AC123".to_string(),
    ///     auth_token: "token".to_string(),
    ///     ..Default::default()
    /// };
    /// let client = ProfileConnectorClient::new(&config)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(config: &ConnectorConfig) -> Result<Self, ConnectorApiError> {
        info!(
            account_sid = %config.account_sid,
            profile_connector_url = %config.profile_connector_url,
            context_url = %config.context_url,
            timeout_secs = ?config.timeout_secs,
            "initializing Profile Connector client"
        );

        let mut builder = ReqwestClient::builder()
            .pool_max_idle_per_host(10)
            .tcp_nodelay(true);
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http_client = builder.build().map_err(ConnectorApiError::NetworkError)?;

        Ok(Self {
            http_client,
            account_sid: config.account_sid.clone(),
            auth_token: config.auth_token.clone(),
            profile_connector_url: config.profile_connector_url.trim_end_matches('/').to_string(),
            context_url: config.context_url.trim_end_matches('/').to_string(),
        })
    }

    fn authenticated(&self, request: RequestBuilder) -> RequestBuilder {
        request.basic_auth(&self.account_sid, Some(&self.auth_token))
    }

    async fn post_json<B: Serialize + Sync>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<Response, ConnectorApiError> {
        debug!("POST {}", url);
        let response = self
            .authenticated(self.http_client.post(url))
            .json(body)
            .send()
            .await?;
        ensure_success(response).await
    }
}

/// Turn a non-success response into a classified error.
async fn ensure_success(response: Response) -> Result<Response, ConnectorApiError> {
    let status = response.status();
    debug!("Response status: {}", status);

    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unable to read error body".to_string());
    warn!("API error ({}): {}", status, body);
    Err(ConnectorApiError::from_status(status, body))
}

/// Decode a successful response body.
async fn parse_body<T: DeserializeOwned>(response: Response) -> Result<T, ConnectorApiError> {
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| ConnectorApiError::MalformedResponse(e.to_string()))
}

#[async_trait]
impl ProfileConnector for ProfileConnectorClient {
    #[instrument(skip(self), fields(account_sid = %self.account_sid))]
    async fn fetch_connector_instance(&self) -> Result<ConnectorInstanceId, ConnectorApiError> {
        let url = format!("{}/Instances/{}", self.profile_connector_url, self.account_sid);
        debug!("GET {}", url);

        let response = self.authenticated(self.http_client.get(&url)).send().await?;
        let instance: ConnectorInstance = parse_body(ensure_success(response).await?).await?;

        Ok(instance.into())
    }

    #[instrument(skip(self, attribute), fields(connector = %connector, key = %attribute.key))]
    async fn find_profiles(
        &self,
        connector: &ConnectorInstanceId,
        attribute: &LookupAttribute,
        write_if_not_found: bool,
    ) -> Result<Vec<CandidateProfile>, ConnectorApiError> {
        let url = format!("{}/Profiles/Find", self.profile_connector_url);
        let attributes = serde_json::to_string(attribute)
            .map_err(|e| ConnectorApiError::InvalidRequest(e.to_string()))?;
        let write_if_not_found = if write_if_not_found { "true" } else { "false" };

        debug!("POST {}", url);
        let response = self
            .authenticated(self.http_client.post(&url))
            .form(&[
                ("UniqueName", connector.as_str()),
                ("Attributes", attributes.as_str()),
                ("WriteIfNotFound", write_if_not_found),
            ])
            .send()
            .await?;

        let found: FindProfilesResponse = parse_body(ensure_success(response).await?).await?;
        let candidates = found.into_candidates();
        debug!(candidates = candidates.len(), "Find returned candidates");
        Ok(candidates)
    }
}

#[async_trait]
impl ContextStore for ProfileConnectorClient {
    async fn create_context(&self, context: &NewContext) -> Result<ContextRecord, ConnectorApiError> {
        let response = self.post_json(&self.context_url, context).await?;
        parse_body(response).await
    }

    async fn attach_lookup_id(
        &self,
        context_sid: &str,
        lookup_id: &str,
    ) -> Result<(), ConnectorApiError> {
        let url = format!("{}/{}/LookupIds", self.context_url, context_sid);
        self.post_json(&url, &LookupIdRequest { id: lookup_id }).await?;
        Ok(())
    }
}

/// Summary delivery over HTTP, enabled with `summary.mode = "http"`.
#[async_trait]
impl SummaryNotifier for ProfileConnectorClient {
    async fn post_summary(&self, profile_sid: &str) -> Result<(), ConnectorApiError> {
        let url = format!("{}/Profiles/{}/Summary", self.profile_connector_url, profile_sid);
        self.post_json(&url, &serde_json::json!({ "sid": profile_sid }))
            .await?;
        Ok(())
    }
}
