//! Greenlight configuration types and loading
//!
//! Credentials never live in the config file: the file names the
//! environment variables that hold them, and the values are resolved at
//! startup only.

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main Greenlight configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Slack credential and Web API configuration
    pub slack: SlackConfig,

    /// Gateway listener configuration
    pub gateway: GatewayConfig,

    /// Log level when not overridden on the command line
    #[serde(rename = "log-level")]
    pub log_level: Option<String>,
}

impl Config {
    /// Validate configuration before use
    ///
    /// Checks that the credential environment variables are set. Call
    /// this early in startup to fail fast with clear error messages.
    pub fn validate(&self) -> Result<()> {
        for env in [
            &self.slack.bot_token_env,
            &self.slack.app_token_env,
            &self.slack.signing_secret_env,
        ] {
            if std::env::var(env).is_err() {
                return Err(eyre::eyre!(
                    "Slack credential not found. Set the {} environment variable.",
                    env
                ));
            }
        }
        Ok(())
    }

    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: .greenlight.yml
        let local_config = PathBuf::from(".greenlight.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/greenlight/greenlight.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("greenlight").join("greenlight.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        // No config file found, use defaults
        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Read just the log level, for logging setup before the full load
    pub fn load_log_level(config_path: Option<&PathBuf>) -> Option<String> {
        Self::load(config_path).ok().and_then(|c| c.log_level)
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

/// Slack credential and Web API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SlackConfig {
    /// Environment variable holding the bot token (xoxb-)
    #[serde(rename = "bot-token-env")]
    pub bot_token_env: String,

    /// Environment variable holding the app-level token (xapp-), consumed
    /// by the connection relay
    #[serde(rename = "app-token-env")]
    pub app_token_env: String,

    /// Environment variable holding the signing secret, consumed by the
    /// connection relay
    #[serde(rename = "signing-secret-env")]
    pub signing_secret_env: String,

    /// Web API base URL
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Request timeout in milliseconds
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,
}

impl SlackConfig {
    /// Resolve the bot token from the configured environment variable
    pub fn bot_token(&self) -> Result<String> {
        std::env::var(&self.bot_token_env).context(format!("Environment variable {} not set", self.bot_token_env))
    }
}

impl Default for SlackConfig {
    fn default() -> Self {
        Self {
            bot_token_env: "SLACK_BOT_TOKEN".to_string(),
            app_token_env: "SLACK_APP_TOKEN".to_string(),
            signing_secret_env: "SLACK_SIGNING_SECRET".to_string(),
            base_url: "https://slack.com/api".to_string(),
            timeout_ms: 30_000,
        }
    }
}

/// Gateway listener configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listen address for the platform relay
    pub bind: String,

    /// Listen port
    pub port: u16,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".to_string(),
            port: 4000,
        }
    }
}

impl GatewayConfig {
    /// The full listen address
    pub fn addr(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.slack.bot_token_env, "SLACK_BOT_TOKEN");
        assert_eq!(config.slack.base_url, "https://slack.com/api");
        assert_eq!(config.gateway.port, 4000);
        assert_eq!(config.gateway.addr(), "127.0.0.1:4000");
        assert!(config.log_level.is_none());
    }

    #[test]
    fn test_deserialize_config() {
        let yaml = r#"
slack:
  bot-token-env: MY_BOT_TOKEN
  app-token-env: MY_APP_TOKEN
  signing-secret-env: MY_SIGNING_SECRET
  base-url: https://slack.example.com/api
  timeout-ms: 5000

gateway:
  bind: 0.0.0.0
  port: 8080

log-level: DEBUG
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.slack.bot_token_env, "MY_BOT_TOKEN");
        assert_eq!(config.slack.base_url, "https://slack.example.com/api");
        assert_eq!(config.slack.timeout_ms, 5000);
        assert_eq!(config.gateway.addr(), "0.0.0.0:8080");
        assert_eq!(config.log_level.as_deref(), Some("DEBUG"));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let yaml = r#"
gateway:
  port: 9000
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();

        // Specified value
        assert_eq!(config.gateway.port, 9000);

        // Defaults for unspecified
        assert_eq!(config.gateway.bind, "127.0.0.1");
        assert_eq!(config.slack.bot_token_env, "SLACK_BOT_TOKEN");
        assert_eq!(config.slack.timeout_ms, 30_000);
    }

    #[test]
    fn test_load_from_explicit_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "gateway:\n  port: 4321").unwrap();

        let config = Config::load(Some(&file.path().to_path_buf())).unwrap();
        assert_eq!(config.gateway.port, 4321);
    }

    #[test]
    fn test_load_from_missing_explicit_path_fails() {
        let path = PathBuf::from("/nonexistent/greenlight.yml");
        assert!(Config::load(Some(&path)).is_err());
    }

    #[test]
    fn test_validate_fails_when_credential_env_unset() {
        let config = Config {
            slack: SlackConfig {
                bot_token_env: "GREENLIGHT_TEST_SURELY_UNSET_TOKEN".to_string(),
                ..SlackConfig::default()
            },
            ..Config::default()
        };

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("GREENLIGHT_TEST_SURELY_UNSET_TOKEN"));
    }

    #[test]
    fn test_validate_passes_when_credentials_set() {
        // PATH is always present; stand it in for the three credential vars
        // to avoid mutating the process environment in tests.
        let config = Config {
            slack: SlackConfig {
                bot_token_env: "PATH".to_string(),
                app_token_env: "PATH".to_string(),
                signing_secret_env: "PATH".to_string(),
                ..SlackConfig::default()
            },
            ..Config::default()
        };

        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_bot_token_resolves_from_env() {
        let config = SlackConfig {
            bot_token_env: "PATH".to_string(),
            ..SlackConfig::default()
        };

        assert!(!config.bot_token().unwrap().is_empty());
    }
}
