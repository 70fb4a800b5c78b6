use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Default base URL of the Profile Connector API
pub const DEFAULT_PROFILE_CONNECTOR_URL: &str = "https://preview.twilio.com/ProfileConnector";

/// Default base URL of the Contexts API
pub const DEFAULT_CONTEXT_URL: &str = "https://context.twilio.com/v1/Contexts";

/// Main configuration structure for profile lookups
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Profile Connector credentials and endpoints
    #[serde(default)]
    pub connector: ConnectorConfig,

    /// Platform attribute names used for lookups
    #[serde(default)]
    pub attribute_keys: AttributeKeys,

    /// AI summary notification settings
    #[serde(default)]
    pub summary: SummaryConfig,

    /// HTTP endpoint settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Credentials and endpoints for the Profile Connector and Context APIs
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ConnectorConfig {
    /// Account SID, also the basic-auth username
    #[serde(default)]
    pub account_sid: String,

    /// Auth token, the basic-auth password
    #[serde(default)]
    pub auth_token: String,

    /// Base URL of the Profile Connector API
    #[serde(default = "default_profile_connector_url")]
    pub profile_connector_url: String,

    /// Base URL of the Contexts API
    #[serde(default = "default_context_url")]
    pub context_url: String,

    /// Per-request timeout in seconds; unset means no timeout
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_profile_connector_url() -> String {
    DEFAULT_PROFILE_CONNECTOR_URL.to_string()
}

fn default_context_url() -> String {
    DEFAULT_CONTEXT_URL.to_string()
}

impl Default for ConnectorConfig {
    fn default() -> Self {
        Self {
            account_sid: String::new(),
            auth_token: String::new(),
            profile_connector_url: default_profile_connector_url(),
            context_url: default_context_url(),
            timeout_secs: None,
        }
    }
}

// The auth token must never reach logs.
impl fmt::Debug for ConnectorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let auth_token = if self.auth_token.is_empty() {
            ""
        } else {
            "[REDACTED]"
        };
        f.debug_struct("ConnectorConfig")
            .field("account_sid", &self.account_sid)
            .field("auth_token", &auth_token)
            .field("profile_connector_url", &self.profile_connector_url)
            .field("context_url", &self.context_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Mapping from logical attribute to the platform's attribute name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AttributeKeys {
    /// Attribute key used for phone lookups
    #[serde(default = "default_phone_key")]
    pub phone_key: String,

    /// Attribute key used for email lookups
    #[serde(default = "default_email_key")]
    pub email_key: String,
}

fn default_phone_key() -> String {
    "phone".to_string()
}

fn default_email_key() -> String {
    "email".to_string()
}

impl Default for AttributeKeys {
    fn default() -> Self {
        Self {
            phone_key: default_phone_key(),
            email_key: default_email_key(),
        }
    }
}

/// How AI summary requests are delivered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryMode {
    /// Accept the request and do nothing
    #[default]
    Disabled,
    /// POST to the profile's Summary sub-resource
    Http,
}

/// AI summary notification settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SummaryConfig {
    #[serde(default)]
    pub mode: SummaryMode,
}

/// HTTP endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Send permissive CORS headers
    #[serde(default = "default_true")]
    pub enable_cors: bool,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

const fn default_port() -> u16 {
    3000
}

const fn default_true() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            enable_cors: default_true(),
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

/// Log file rotation policy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RotationPolicy {
    #[default]
    Daily,
    Hourly,
    Never,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format for stderr output
    #[serde(default)]
    pub format: LogFormat,

    /// Directory for rolling JSON log files (stderr only when unset)
    #[serde(default)]
    pub log_dir: Option<PathBuf>,

    /// Rotation policy for file output
    #[serde(default)]
    pub rotation: RotationPolicy,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
            log_dir: None,
            rotation: RotationPolicy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.attribute_keys.phone_key, "phone");
        assert_eq!(config.attribute_keys.email_key, "email");
        assert_eq!(
            config.connector.profile_connector_url,
            DEFAULT_PROFILE_CONNECTOR_URL
        );
        assert_eq!(config.connector.context_url, DEFAULT_CONTEXT_URL);
        assert_eq!(config.connector.timeout_secs, None);
        assert_eq!(config.summary.mode, SummaryMode::Disabled);
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_debug_redacts_auth_token() {
        let connector = ConnectorConfig {
            account_sid: "AC123".to_string(),
            auth_token: "super-secret".to_string(),
            ..Default::default()
        };
        let rendered = format!("{connector:?}");
        assert!(rendered.contains("AC123"));
        assert!(rendered.contains("[REDACTED]"));
        assert!(!rendered.contains("super-secret"));
    }

    #[test]
    fn test_yaml_parsing() {
        let yaml = r"
connector:
  account_sid: AC999
  auth_token: token
  timeout_secs: 15
attribute_keys:
  phone_key: mobile
summary:
  mode: http
logging:
  format: pretty
";
        let config: Config = serde_yaml::from_str(yaml).expect("YAML should parse");
        assert_eq!(config.connector.account_sid, "AC999");
        assert_eq!(config.connector.timeout_secs, Some(15));
        assert_eq!(config.attribute_keys.phone_key, "mobile");
        assert_eq!(config.attribute_keys.email_key, "email");
        assert_eq!(config.summary.mode, SummaryMode::Http);
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert_eq!(config.server.port, 3000);
    }
}
