//! CLI configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `PAYFORM_LOG` - Tracing filter used when `RUST_LOG` is unset (default: info)
//! - `PAYFORM_LOG_FORMAT` - `pretty` or `json` (default: pretty)
//! - `PAYFORM_TX_PREFIX` - Prefix for generated vendor transaction codes (default: empty)

use thiserror::Error;

/// Longest accepted vendor transaction code prefix.
const MAX_TX_PREFIX_LENGTH: usize = 16;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Output format for log lines on stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Fallback tracing filter directive
    pub log_filter: String,
    /// Log line format
    pub log_format: LogFormat,
    /// Prefix for generated vendor transaction codes
    pub tx_prefix: String,
}

impl CliConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let log_filter = get_or_default(&lookup, "PAYFORM_LOG", "info");
        let log_format = match get_or_default(&lookup, "PAYFORM_LOG_FORMAT", "pretty").as_str() {
            "pretty" => LogFormat::Pretty,
            "json" => LogFormat::Json,
            other => {
                return Err(ConfigError::InvalidEnvVar(
                    "PAYFORM_LOG_FORMAT".to_string(),
                    format!("expected 'pretty' or 'json', got '{other}'"),
                ));
            }
        };
        let tx_prefix = get_or_default(&lookup, "PAYFORM_TX_PREFIX", "");
        validate_tx_prefix(&tx_prefix)?;

        Ok(Self {
            log_filter,
            log_format,
            tx_prefix,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a variable with a default value.
fn get_or_default(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: &str) -> String {
    lookup(key).unwrap_or_else(|| default.to_string())
}

/// The prefix ends up in a provider field that only accepts a narrow alphabet.
fn validate_tx_prefix(prefix: &str) -> Result<(), ConfigError> {
    if prefix.chars().count() > MAX_TX_PREFIX_LENGTH {
        return Err(ConfigError::InvalidEnvVar(
            "PAYFORM_TX_PREFIX".to_string(),
            format!("must be at most {MAX_TX_PREFIX_LENGTH} characters"),
        ));
    }
    if let Some(bad) = prefix
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
    {
        return Err(ConfigError::InvalidEnvVar(
            "PAYFORM_TX_PREFIX".to_string(),
            format!("contains unsupported character '{bad}'"),
        ));
    }
    Ok(())
}
