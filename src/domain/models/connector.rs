use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of the account's active Profile Connector instance.
///
/// Fetched once per lookup and passed explicitly to every later stage.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectorInstanceId(String);

impl ConnectorInstanceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConnectorInstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Body of `GET Instances/{accountSid}`
#[derive(Debug, Clone, Deserialize)]
pub struct ConnectorInstance {
    pub configuration_id: String,
}

impl From<ConnectorInstance> for ConnectorInstanceId {
    fn from(instance: ConnectorInstance) -> Self {
        Self(instance.configuration_id)
    }
}
