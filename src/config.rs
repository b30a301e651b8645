//! Startup configuration for the bot.
//!
//! Sources, lowest precedence first: TOML file, `TG_TOKEN` environment
//! variable, command-line overrides. The result is passed explicitly into
//! the adapter; nothing reads it from global state.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info, instrument};

/// Environment variable holding the bot token.
pub const TOKEN_ENV: &str = "TG_TOKEN";

/// Bot configuration.
#[derive(Clone, Getters)]
pub struct BotConfig {
    /// Bot API token.
    token: String,

    /// Bot API base URL.
    api_url: String,

    /// Long-polling timeout in seconds.
    poll_timeout_secs: u64,

    /// Delay before retrying a failed poll, in seconds.
    retry_delay_secs: u64,
}

fn default_api_url() -> String {
    "https://api.telegram.org".to_string()
}

fn default_poll_timeout_secs() -> u64 {
    30
}

fn default_retry_delay_secs() -> u64 {
    5
}

/// Partially specified configuration, before the token is resolved.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    token: Option<String>,
    api_url: Option<String>,
    poll_timeout_secs: Option<u64>,
    retry_delay_secs: Option<u64>,
}

/// Command-line overrides.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// Token given on the command line.
    pub token: Option<String>,
    /// API URL given on the command line.
    pub api_url: Option<String>,
}

impl BotConfig {
    /// Creates a configuration with defaults for everything but the token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            api_url: default_api_url(),
            poll_timeout_secs: default_poll_timeout_secs(),
            retry_delay_secs: default_retry_delay_secs(),
        }
    }

    /// Resolves configuration from all sources.
    ///
    /// `path` is optional; a missing file is an error only if a path was
    /// given. `env_token` is the value of [`TOKEN_ENV`], if set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed, or if no
    /// source provides a non-empty token.
    #[instrument(skip_all)]
    pub fn resolve(path: Option<&Path>, env_token: Option<String>, overrides: Overrides) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => {
                debug!(path = %path.display(), "Loading config file");
                let content = std::fs::read_to_string(path)
                    .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
                toml::from_str::<ConfigFile>(&content)
                    .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?
            }
            None => ConfigFile::default(),
        };

        let token = overrides
            .token
            .or(env_token)
            .or(file.token)
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| ConfigError::new(format!("No bot token: set {TOKEN_ENV}, pass --token or add it to the config file")))?;

        let config = Self {
            token,
            api_url: overrides.api_url.or(file.api_url).unwrap_or_else(default_api_url),
            poll_timeout_secs: file.poll_timeout_secs.unwrap_or_else(default_poll_timeout_secs),
            retry_delay_secs: file.retry_delay_secs.unwrap_or_else(default_retry_delay_secs),
        };
        info!(api_url = %config.api_url, poll_timeout_secs = config.poll_timeout_secs, "Configuration resolved");
        Ok(config)
    }
}

impl std::fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotConfig")
            .field("token", &"<redacted>")
            .field("api_url", &self.api_url)
            .field("poll_timeout_secs", &self.poll_timeout_secs)
            .field("retry_delay_secs", &self.retry_delay_secs)
            .finish()
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes()).expect("Failed to write config");
        file
    }

    #[test]
    fn test_file_values_and_defaults() {
        let file = write_config("token = \"abc\"\npoll_timeout_secs = 10\n");
        let config = BotConfig::resolve(Some(file.path()), None, Overrides::default()).unwrap();
        assert_eq!(config.token(), "abc");
        assert_eq!(*config.poll_timeout_secs(), 10);
        assert_eq!(*config.retry_delay_secs(), 5);
        assert_eq!(config.api_url(), "https://api.telegram.org");
    }

    #[test]
    fn test_precedence() {
        let file = write_config("token = \"from-file\"\napi_url = \"http://file\"\n");
        let config = BotConfig::resolve(Some(file.path()), Some("from-env".to_string()), Overrides::default()).unwrap();
        assert_eq!(config.token(), "from-env");
        assert_eq!(config.api_url(), "http://file");

        let overrides = Overrides {
            token: Some("from-cli".to_string()),
            api_url: Some("http://cli".to_string()),
        };
        let config = BotConfig::resolve(Some(file.path()), Some("from-env".to_string()), overrides).unwrap();
        assert_eq!(config.token(), "from-cli");
        assert_eq!(config.api_url(), "http://cli");
    }

    #[test]
    fn test_missing_token() {
        let result = BotConfig::resolve(None, None, Overrides::default());
        assert!(result.unwrap_err().message.contains(TOKEN_ENV));

        let blank = BotConfig::resolve(None, Some("  ".to_string()), Overrides::default());
        assert!(blank.is_err());
    }

    #[test]
    fn test_missing_file() {
        let result = BotConfig::resolve(Some(Path::new("/nonexistent/bot.toml")), Some("t".to_string()), Overrides::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_key_rejected() {
        let file = write_config("token = \"abc\"\ntokn = \"typo\"\n");
        assert!(BotConfig::resolve(Some(file.path()), None, Overrides::default()).is_err());
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = BotConfig::new("secret-token");
        assert!(!format!("{config:?}").contains("secret-token"));
    }
}
