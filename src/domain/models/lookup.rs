//! Lookup request and input validation.

use serde::{Deserialize, Deserializer, Serialize};

use super::config::AttributeKeys;
use crate::domain::errors::{LookupError, LookupResult};

/// A single profile lookup, as delivered by the caller.
///
/// Field names follow the function event payload (`taskSid`,
/// `doPostToAISummary`); `taskId` and `postSummary` are accepted as aliases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupRequest {
    /// Task to link the resolved profile to
    #[serde(default, alias = "taskId", skip_serializing_if = "Option::is_none")]
    pub task_sid: Option<String>,

    /// Phone number to look up; wins over `email`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Email address to look up
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Save the profile to a task context
    #[serde(default = "default_true", deserialize_with = "flexible_bool")]
    pub save_to_context: bool,

    /// Trigger the AI summary step
    #[serde(
        default,
        rename = "doPostToAISummary",
        alias = "postSummary",
        deserialize_with = "flexible_bool"
    )]
    pub post_summary: bool,
}

const fn default_true() -> bool {
    true
}

impl Default for LookupRequest {
    fn default() -> Self {
        Self {
            task_sid: None,
            phone: None,
            email: None,
            save_to_context: true,
            post_summary: false,
        }
    }
}

impl LookupRequest {
    /// Lookup by phone number.
    pub fn by_phone(phone: impl Into<String>) -> Self {
        Self {
            phone: Some(phone.into()),
            ..Default::default()
        }
    }

    /// Lookup by email address.
    pub fn by_email(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            ..Default::default()
        }
    }

    /// Link the resolved profile to this task.
    #[must_use]
    pub fn with_task_sid(mut self, task_sid: impl Into<String>) -> Self {
        self.task_sid = Some(task_sid.into());
        self
    }

    /// Pick the attribute to look up by. Phone takes precedence over email;
    /// empty strings count as absent.
    pub fn lookup_attribute(&self, keys: &AttributeKeys) -> LookupResult<LookupAttribute> {
        match (non_empty(self.phone.as_ref()), non_empty(self.email.as_ref())) {
            (Some(phone), _) => Ok(LookupAttribute::new(&keys.phone_key, phone)),
            (None, Some(email)) => Ok(LookupAttribute::new(&keys.email_key, email)),
            (None, None) => Err(LookupError::MissingIdentifier),
        }
    }

    /// Task SID to link a context to, if linking was requested.
    pub fn context_task_sid(&self) -> Option<&str> {
        if self.save_to_context {
            non_empty(self.task_sid.as_ref())
        } else {
            None
        }
    }
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|v| !v.is_empty())
}

/// Attribute key/value pair sent as the JSON `Attributes` form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LookupAttribute {
    pub key: String,
    pub value: String,
}

impl LookupAttribute {
    pub fn new(key: &str, value: &str) -> Self {
        Self {
            key: key.to_string(),
            value: value.to_string(),
        }
    }
}

/// Accept JSON booleans as well as the string forms serverless events carry.
fn flexible_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Bool(bool),
        Text(String),
        Null,
    }

    match Raw::deserialize(deserializer)? {
        Raw::Bool(value) => Ok(value),
        Raw::Null => Ok(false),
        Raw::Text(text) => match text.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Ok(true),
            "false" | "0" | "" => Ok(false),
            other => Err(serde::de::Error::custom(format!(
                "invalid boolean value: {other}"
            ))),
        },
    }
}
