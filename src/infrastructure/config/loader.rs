use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use reqwest::Url;
use std::path::Path;
use thiserror::Error;

use crate::domain::models::config::Config;

/// Default project config file, merged when present
pub const DEFAULT_CONFIG_FILE: &str = "profile-lookup.yaml";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Account SID is not set (ACCOUNT_SID or PROFILE_LOOKUP_CONNECTOR__ACCOUNT_SID)")]
    MissingAccountSid,

    #[error("Auth token is not set (AUTH_TOKEN or PROFILE_LOOKUP_CONNECTOR__AUTH_TOKEN)")]
    MissingAuthToken,

    #[error("Invalid {name} URL '{value}': {reason}")]
    InvalidUrl {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("Attribute key '{0}' cannot be empty")]
    EmptyAttributeKey(&'static str),

    #[error("Invalid timeout_secs: 0. Leave unset to disable the timeout")]
    InvalidTimeout,

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Server host cannot be empty")]
    EmptyServerHost,
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. `profile-lookup.yaml` in the working directory, or `path` when given
    /// 3. `ACCOUNT_SID`, `AUTH_TOKEN`, `PHONE_KEY`, `EMAIL_KEY` as injected by
    ///    the functions runtime
    /// 4. `PROFILE_LOOKUP_*` environment variables (highest priority)
    pub fn load(path: Option<&Path>) -> Result<Config> {
        let file = path.map_or_else(|| Path::new(DEFAULT_CONFIG_FILE).to_path_buf(), Path::to_path_buf);
        if path.is_some() && !file.exists() {
            anyhow::bail!("Config file not found: {}", file.display());
        }

        let config: Config = Self::figment(&file)
            .extract()
            .with_context(|| format!("Failed to load configuration ({})", file.display()))?;

        Self::validate(&config)?;
        Ok(config)
    }

    fn figment(file: &Path) -> Figment {
        Figment::new()
            // 1. Start with programmatic defaults
            .merge(Serialized::defaults(Config::default()))
            // 2. Merge the config file (missing files are skipped)
            .merge(Yaml::file(file))
            // 3. Merge the runtime's raw variable names
            .merge(
                Env::raw()
                    .only(&["ACCOUNT_SID", "AUTH_TOKEN"])
                    .map(|key| format!("connector.{}", key.as_str().to_lowercase()).into()),
            )
            .merge(
                Env::raw()
                    .only(&["PHONE_KEY", "EMAIL_KEY"])
                    .map(|key| format!("attribute_keys.{}", key.as_str().to_lowercase()).into()),
            )
            // 4. Merge prefixed environment variables (highest priority)
            .merge(Env::prefixed("PROFILE_LOOKUP_").split("__"))
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let connector = &config.connector;
        if connector.account_sid.trim().is_empty() {
            return Err(ConfigError::MissingAccountSid);
        }
        if connector.auth_token.trim().is_empty() {
            return Err(ConfigError::MissingAuthToken);
        }

        validate_url("profile_connector_url", &connector.profile_connector_url)?;
        validate_url("context_url", &connector.context_url)?;

        if connector.timeout_secs == Some(0) {
            return Err(ConfigError::InvalidTimeout);
        }

        if config.attribute_keys.phone_key.is_empty() {
            return Err(ConfigError::EmptyAttributeKey("phone_key"));
        }
        if config.attribute_keys.email_key.is_empty() {
            return Err(ConfigError::EmptyAttributeKey("email_key"));
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        if config.server.host.is_empty() {
            return Err(ConfigError::EmptyServerHost);
        }

        Ok(())
    }
}

fn validate_url(name: &'static str, value: &str) -> Result<(), ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidUrl {
        name,
        value: value.to_string(),
        reason,
    };
    let url = Url::parse(value).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::config::{ConnectorConfig, SummaryMode};

    fn valid_config() -> Config {
        Config {
            connector: ConnectorConfig {
                account_sid: "AC123".to_string(),
                auth_token: "token".to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_default_config_needs_credentials() {
        let result = ConfigLoader::validate(&Config::default());
        assert!(matches!(result, Err(ConfigError::MissingAccountSid)));
    }

    #[test]
    fn test_valid_config() {
        assert!(ConfigLoader::validate(&valid_config()).is_ok());
    }

    #[test]
    fn test_missing_auth_token() {
        let mut config = valid_config();
        config.connector.auth_token = "  ".to_string();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::MissingAuthToken)
        ));
    }

    #[test]
    fn test_invalid_urls() {
        let mut config = valid_config();
        config.connector.context_url = "not a url".to_string();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidUrl { name: "context_url", .. })
        ));

        let mut config = valid_config();
        config.connector.profile_connector_url = "ftp://example.com".to_string();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidUrl { name: "profile_connector_url", .. })
        ));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = valid_config();
        config.connector.timeout_secs = Some(0);
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidTimeout)
        ));
    }

    #[test]
    fn test_empty_attribute_key() {
        let mut config = valid_config();
        config.attribute_keys.email_key = String::new();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::EmptyAttributeKey("email_key"))
        ));
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = valid_config();
        config.logging.level = "verbose".to_string();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidLogLevel(_))
        ));
    }

    #[test]
    fn test_env_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("profile-lookup.yaml");
        std::fs::write(
            &file,
            "connector:\n  account_sid: ACfile\n  auth_token: file-token\nsummary:\n  mode: http\n",
        )
        .unwrap();

        temp_env::with_vars(
            [
                ("ACCOUNT_SID", Some("ACruntime")),
                ("PHONE_KEY", Some("mobile")),
                ("PROFILE_LOOKUP_CONNECTOR__AUTH_TOKEN", Some("env-token")),
            ],
            || {
                let config = ConfigLoader::load(Some(&file)).unwrap();
                assert_eq!(config.connector.account_sid, "ACruntime");
                assert_eq!(config.connector.auth_token, "env-token");
                assert_eq!(config.attribute_keys.phone_key, "mobile");
                assert_eq!(config.attribute_keys.email_key, "email");
                assert_eq!(config.summary.mode, SummaryMode::Http);
            },
        );
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = ConfigLoader::load(Some(&dir.path().join("absent.yaml")));
        assert!(result.is_err());
    }
}
