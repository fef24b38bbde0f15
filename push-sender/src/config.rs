//! Configuration for the push sender.

use config::{Config as ConfigLoader, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for the push sender.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub payload: PayloadConfig,
    #[serde(default)]
    pub dispatch: DispatchConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Push gateway endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// Full URL of the send endpoint.
    #[serde(default = "default_gateway_url")]
    pub url: String,
    /// Per-attempt timeout covering connect, handshake and response.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl GatewayConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            url: default_gateway_url(),
            timeout_secs: default_timeout(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PayloadConfig {
    /// Namespace of the reserved data keys (`com.<namespace>.push.ALERT`).
    #[serde(default = "default_namespace")]
    pub namespace: String,
    /// Reject encoded payloads larger than this many bytes. Unset means no limit.
    #[serde(default)]
    pub max_payload_bytes: Option<usize>,
}

impl Default for PayloadConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            max_payload_bytes: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DispatchConfig {
    /// Attempts per dispatch when the command line does not say otherwise.
    #[serde(default = "default_attempts")]
    pub attempts: u32,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            attempts: default_attempts(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// Default values
fn default_gateway_url() -> String {
    "https://android.googleapis.com/gcm/send".to_string()
}
fn default_timeout() -> u64 {
    10
}
fn default_namespace() -> String {
    push_common::DEFAULT_NAMESPACE.to_string()
}
fn default_attempts() -> u32 {
    1
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file and environment variables.
    ///
    /// Configuration sources (in order of precedence):
    /// 1. Environment variables (PUSH__SECTION__KEY format)
    /// 2. push-sender.toml file (if present)
    /// 3. Built-in defaults
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("push-sender")
    }

    /// Same as [`Config::load`] with an explicit file name (extension optional).
    pub fn load_from(file: &str) -> Result<Self, ConfigError> {
        let config = ConfigLoader::builder()
            .set_default("gateway.url", default_gateway_url())?
            .set_default("gateway.timeout_secs", default_timeout() as i64)?
            .set_default("payload.namespace", default_namespace())?
            .set_default("dispatch.attempts", default_attempts() as i64)?
            .set_default("logging.level", default_log_level())?
            .add_source(File::with_name(file).required(false))
            .add_source(
                Environment::with_prefix("PUSH")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make every attempt fail before it starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.gateway.timeout_secs == 0 {
            return Err(ConfigError::Message(
                "gateway.timeout_secs must be greater than 0".to_string(),
            ));
        }
        if self.payload.max_payload_bytes == Some(0) {
            return Err(ConfigError::Message(
                "payload.max_payload_bytes must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.gateway.url, "https://android.googleapis.com/gcm/send");
        assert_eq!(config.gateway.timeout(), Duration::from_secs(10));
        assert_eq!(config.payload.max_payload_bytes, None);
        assert!(config.validate().is_ok());
        assert_eq!(config.payload.namespace, "urbanairship");
        assert_eq!(config.dispatch.attempts, 1);
        assert_eq!(config.logging.level, "info");
    }

    fn write_toml(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_from_file_overrides_defaults() {
        let file = write_toml(
            r#"
[gateway]
url = "http://127.0.0.1:9999/send"
timeout_secs = 3

[payload]
max_payload_bytes = 4096

[dispatch]
attempts = 5
"#,
        );

        let path = file.path().to_str().unwrap().to_string();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.gateway.url, "http://127.0.0.1:9999/send");
        assert_eq!(config.gateway.timeout_secs, 3);
        assert_eq!(config.dispatch.attempts, 5);
        assert_eq!(config.payload.namespace, "urbanairship");
        assert_eq!(config.payload.max_payload_bytes, Some(4096));
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let file = write_toml("[gateway]\ntimeout_secs = 0\n");
        let path = file.path().to_str().unwrap().to_string();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("timeout_secs"));
    }

    #[test]
    fn test_zero_payload_limit_is_rejected() {
        let mut config = Config::default();
        config.payload.max_payload_bytes = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        let config = Config::load_from("/nonexistent/push-sender-config").unwrap();
        assert_eq!(config.gateway.timeout_secs, 10);
        assert_eq!(config.logging.level, "info");
    }
}
