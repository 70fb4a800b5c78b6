//! Context records that tie a resolved profile to a task.

use serde::{Deserialize, Serialize};

use super::connector::ConnectorInstanceId;

/// Namespace every profile context is created in
pub const CONTEXT_NAMESPACE: &str = "Twilio";

/// Attribute group carrying the profile reference
pub const PROFILE_ATTRIBUTE_GROUP: &str = "ProfileData";

/// Body of a context creation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewContext {
    pub namespace: String,
    pub attribute_group: String,
    pub attributes: ProfileContextAttributes,
}

/// Attributes stored on a profile context
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileContextAttributes {
    pub profile_connect_sid: String,
    pub connector_name: String,
}

impl NewContext {
    pub fn for_profile(profile_sid: &str, connector: &ConnectorInstanceId) -> Self {
        Self {
            namespace: CONTEXT_NAMESPACE.to_string(),
            attribute_group: PROFILE_ATTRIBUTE_GROUP.to_string(),
            attributes: ProfileContextAttributes {
                profile_connect_sid: profile_sid.to_string(),
                connector_name: connector.as_str().to_string(),
            },
        }
    }
}

/// Created context; only the SID is used
#[derive(Debug, Clone, Deserialize)]
pub struct ContextRecord {
    pub sid: String,
}

/// Body of a `LookupIds` request
#[derive(Debug, Clone, Serialize)]
pub struct LookupIdRequest<'a> {
    pub id: &'a str,
}

/// A context created for a profile and linked to a task
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextLink {
    pub context_sid: String,
    pub task_sid: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_context_wire_format() {
        let body = NewContext::for_profile("MP123", &ConnectorInstanceId::new("cfg_1"));
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "namespace": "Twilio",
                "attribute_group": "ProfileData",
                "attributes": {
                    "profileConnectSid": "MP123",
                    "connectorName": "cfg_1"
                }
            })
        );
    }
}
