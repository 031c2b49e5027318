//! Configuration system for the broker pre-flight checker
//!
//! Loads a TOML configuration file describing the broker endpoints and
//! credential sources, and validates it before any probing starts.
//! Credentials are never stored in the file itself; the file names the
//! environment variables they are read from.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use thiserror::Error;

/// Main configuration structure for a pre-flight run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PreflightConfig {
    pub broker: BrokerSection,
    #[serde(default)]
    pub probe: ProbeSection,
    #[serde(default)]
    pub transport: TransportSection,
}

/// Broker endpoints and credential sources
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BrokerSection {
    /// Endpoint tried first, if given
    pub preferred_url: Option<String>,
    /// Remaining endpoints, tried last-listed-first after the preferred one
    #[serde(default)]
    pub fallback_urls: Vec<String>,
    /// Environment variable containing the username
    #[serde(default = "default_username_env")]
    pub username_env: String,
    /// Environment variable containing the password
    #[serde(default = "default_password_env")]
    pub password_env: String,
}

fn default_username_env() -> String {
    "BROKER_USERNAME".to_string()
}

fn default_password_env() -> String {
    "BROKER_PASSWORD".to_string()
}

/// Probe output behavior
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProbeSection {
    /// Echo the final outcome to stdout in addition to the log sink
    #[serde(default)]
    pub print_to_console: bool,
    /// Replace the password with `***` in diagnostic text (default: true)
    #[serde(default = "default_redact")]
    pub redact_credentials: bool,
    /// Contact named in the failure report trailer
    pub support_contact: Option<String>,
}

fn default_redact() -> bool {
    true
}

impl Default for ProbeSection {
    fn default() -> Self {
        Self {
            print_to_console: false,
            redact_credentials: true,
            support_contact: None,
        }
    }
}

/// Transport-level connection parameters
///
/// The probe itself has no timeout or retry policy; whatever timeout applies
/// to a single connection attempt is enforced here, inside the transport.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransportSection {
    /// Upper bound on a single connect attempt, in seconds
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

fn default_connect_timeout_secs() -> u64 {
    10
}

impl Default for TransportSection {
    fn default() -> Self {
        Self {
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

/// An authenticated identity for the broker
///
/// Immutable for the lifetime of a probe. The `Debug` impl never prints the
/// password; diagnostic text discloses it only under an explicit cleartext
/// policy.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Configuration loading and validation errors
///
/// All of these are fatal and surface before the first connection attempt.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),
    #[error("Environment variable not found: {0}")]
    EnvVarNotFound(String),
    #[error("Environment variable {0} is set but empty")]
    EmptyCredential(String),
    #[error("At least one broker URL has to be specified")]
    NoBrokerHost,
    #[error("Invalid broker URL: {0}")]
    InvalidBrokerUrl(String),
}

impl PreflightConfig {
    /// Load configuration from a TOML file and validate it
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: PreflightConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate that the configuration can drive a probe at all
    ///
    /// The probe needs at least one endpoint to try; everything else has a
    /// usable default.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let preferred_given = self.broker.preferred_url.is_some();
        let fallback_given = !self.broker.fallback_urls.is_empty();
        if !(preferred_given || fallback_given) {
            return Err(ConfigError::NoBrokerHost);
        }
        Ok(())
    }

    /// Resolve credentials from the configured environment variables
    ///
    /// Missing or empty variables are a configuration error, raised before
    /// the probe runs.
    pub fn resolve_credentials(&self) -> Result<Credentials, ConfigError> {
        let username = require_env(&self.broker.username_env)?;
        let password = require_env(&self.broker.password_env)?;
        Ok(Credentials::new(username, password))
    }

}

fn require_env(name: &str) -> Result<String, ConfigError> {
    let value =
        std::env::var(name).map_err(|_| ConfigError::EnvVarNotFound(name.to_string()))?;
    if value.is_empty() {
        return Err(ConfigError::EmptyCredential(name.to_string()));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config() {
        let toml_content = r#"
[broker]
preferred_url = "amqp://mq.example.org"
"#;

        let config: PreflightConfig = toml::from_str(toml_content).unwrap();
        assert_eq!(
            config.broker.preferred_url.as_deref(),
            Some("amqp://mq.example.org")
        );
        assert!(config.broker.fallback_urls.is_empty());
        assert_eq!(config.broker.username_env, "BROKER_USERNAME");
        assert_eq!(config.broker.password_env, "BROKER_PASSWORD");
        assert!(!config.probe.print_to_console);
        assert!(config.probe.redact_credentials);
        assert_eq!(config.transport.connect_timeout_secs, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_full_config() {
        let toml_content = r#"
[broker]
preferred_url = "amqp://mq1.example.org"
fallback_urls = ["amqp://mq2.example.org", "amqp://mq3.example.org"]
username_env = "MQ_USER"
password_env = "MQ_PASS"

[probe]
print_to_console = true
redact_credentials = false
support_contact = "ops@example.org"

[transport]
connect_timeout_secs = 3
"#;

        let config: PreflightConfig = toml::from_str(toml_content).unwrap();
        assert_eq!(config.broker.fallback_urls.len(), 2);
        assert_eq!(config.broker.username_env, "MQ_USER");
        assert!(config.probe.print_to_console);
        assert!(!config.probe.redact_credentials);
        assert_eq!(config.probe.support_contact.as_deref(), Some("ops@example.org"));
        assert_eq!(config.transport.connect_timeout_secs, 3);
    }

    #[test]
    fn test_fallback_only_config_is_valid() {
        let toml_content = r#"
[broker]
fallback_urls = ["amqp://mq2.example.org"]
"#;

        let config: PreflightConfig = toml::from_str(toml_content).unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_no_host_configured_is_rejected() {
        let toml_content = r#"
[broker]
fallback_urls = []
"#;

        let config: PreflightConfig = toml::from_str(toml_content).unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::NoBrokerHost)));
    }

    #[test]
    fn test_resolve_credentials_from_env() {
        let toml_content = r#"
[broker]
preferred_url = "amqp://localhost"
username_env = "PREFLIGHT_TEST_RESOLVE_USER"
password_env = "PREFLIGHT_TEST_RESOLVE_PASS"
"#;
        let config: PreflightConfig = toml::from_str(toml_content).unwrap();

        std::env::set_var("PREFLIGHT_TEST_RESOLVE_USER", "svc");
        std::env::set_var("PREFLIGHT_TEST_RESOLVE_PASS", "pw");
        let credentials = config.resolve_credentials().unwrap();
        assert_eq!(credentials.username(), "svc");
        assert_eq!(credentials.password(), "pw");
    }

    #[test]
    fn test_missing_credential_env_var() {
        let toml_content = r#"
[broker]
preferred_url = "amqp://localhost"
username_env = "PREFLIGHT_TEST_MISSING_USER"
password_env = "PREFLIGHT_TEST_MISSING_PASS"
"#;
        let config: PreflightConfig = toml::from_str(toml_content).unwrap();

        std::env::remove_var("PREFLIGHT_TEST_MISSING_USER");
        let result = config.resolve_credentials();
        assert!(matches!(result, Err(ConfigError::EnvVarNotFound(name)) if name == "PREFLIGHT_TEST_MISSING_USER"));
    }

    #[test]
    fn test_empty_credential_is_rejected() {
        let toml_content = r#"
[broker]
preferred_url = "amqp://localhost"
username_env = "PREFLIGHT_TEST_EMPTY_USER"
password_env = "PREFLIGHT_TEST_EMPTY_PASS"
"#;
        let config: PreflightConfig = toml::from_str(toml_content).unwrap();

        std::env::set_var("PREFLIGHT_TEST_EMPTY_USER", "");
        std::env::set_var("PREFLIGHT_TEST_EMPTY_PASS", "pw");
        let result = config.resolve_credentials();
        assert!(matches!(result, Err(ConfigError::EmptyCredential(name)) if name == "PREFLIGHT_TEST_EMPTY_USER"));
    }

    #[test]
    fn test_credentials_debug_hides_password() {
        let credentials = Credentials::new("svc", "hunter2");
        let rendered = format!("{credentials:?}");
        assert!(rendered.contains("svc"));
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("***"));
    }
}
