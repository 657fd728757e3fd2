use crate::core::retry::{RetryPolicy, DEFAULT_BASE_DELAY, DEFAULT_MAX_RETRY_TIME};
use crate::utils::error::{ConfigError, Result};
use crate::utils::validation::{self, Validate};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.smartsheet.com/2.0";
pub const ACCESS_TOKEN_ENV: &str = "SMARTSHEET_ACCESS_TOKEN";
pub const LOG_FORMATS: &[&str] = &["compact", "json"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiConfig,
    pub retry: Option<RetryConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    pub access_token: Option<String>,
    pub user_agent: Option<String>,
    pub timeout_seconds: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            access_token: None,
            user_agent: None,
            timeout_seconds: None,
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RetryConfig {
    pub max_retry_time_seconds: Option<u64>,
    pub base_delay_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub format: Option<String>,
}

impl ClientConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let processed_content = Self::substitute_env_vars(content);
        Ok(toml::from_str(&processed_content)?)
    }

    /// Replace `${VAR}` with the environment value. Unset variables are left as written.
    fn substitute_env_vars(content: &str) -> String {
        static ENV_VAR: once_cell::sync::Lazy<Regex> =
            once_cell::sync::Lazy::new(|| Regex::new(r"\$\{([^}]+)\}").expect("valid pattern"));

        ENV_VAR
            .replace_all(content, |caps: &Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn base_url(&self) -> &str {
        &self.api.base_url
    }

    /// Token from the file, else the `SMARTSHEET_ACCESS_TOKEN` environment variable.
    pub fn access_token(&self) -> Option<String> {
        self.api
            .access_token
            .clone()
            .filter(|token| !token.trim().is_empty() && !token.starts_with("${"))
            .or_else(|| std::env::var(ACCESS_TOKEN_ENV).ok())
    }

    /// The access token, failing when neither the file nor the environment has one.
    pub fn require_access_token(&self) -> Result<String, ConfigError> {
        let token = self.access_token();
        let token = validation::validate_required_field("api.access_token", &token)?;
        validation::validate_non_empty_string("api.access_token", token)?;
        Ok(token.clone())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.api.timeout_seconds.map(Duration::from_secs)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        let retry = self.retry.clone().unwrap_or_default();
        RetryPolicy::new(
            retry
                .max_retry_time_seconds
                .map_or(DEFAULT_MAX_RETRY_TIME, Duration::from_secs),
            retry
                .base_delay_ms
                .map_or(DEFAULT_BASE_DELAY, Duration::from_millis),
        )
    }

    pub fn logging(&self) -> LoggingConfig {
        self.logging.clone().unwrap_or_default()
    }

    /// Check ranges, the base URL and the log format.
    pub fn validate_config(&self) -> Result<(), ConfigError> {
        validation::validate_url("api.base_url", &self.api.base_url)?;

        if let Some(timeout) = self.api.timeout_seconds {
            validation::validate_range("api.timeout_seconds", timeout, 1, 600)?;
        }

        if let Some(user_agent) = &self.api.user_agent {
            validation::validate_non_empty_string("api.user_agent", user_agent)?;
        }

        if let Some(retry) = &self.retry {
            if let Some(max) = retry.max_retry_time_seconds {
                validation::validate_range("retry.max_retry_time_seconds", max, 0, 3600)?;
            }
            if let Some(base) = retry.base_delay_ms {
                validation::validate_range("retry.base_delay_ms", base, 1, 60_000)?;
            }
        }

        if let Some(format) = self.logging.as_ref().and_then(|l| l.format.as_deref()) {
            validation::validate_one_of("logging.format", format, LOG_FORMATS)?;
        }

        Ok(())
    }
}

impl Validate for ClientConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[api]
base_url = "https://api.smartsheet.eu/2.0"
access_token = "token-123"
user_agent = "sheet-sync/1.0"
timeout_seconds = 20

[retry]
max_retry_time_seconds = 60
base_delay_ms = 500

[logging]
level = "debug"
format = "json"
"#;

        let config = ClientConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.base_url(), "https://api.smartsheet.eu/2.0");
        assert_eq!(config.access_token().as_deref(), Some("token-123"));
        assert_eq!(config.timeout(), Some(Duration::from_secs(20)));
        assert_eq!(
            config.retry_policy(),
            RetryPolicy::new(Duration::from_secs(60), Duration::from_millis(500))
        );
        assert_eq!(config.logging().format.as_deref(), Some("json"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_require_access_token() {
        let config = ClientConfig::from_toml_str("[api]\naccess_token = \"token-123\"\n").unwrap();
        assert_eq!(config.require_access_token().unwrap(), "token-123");

        if std::env::var(ACCESS_TOKEN_ENV).is_err() {
            let config = ClientConfig::from_toml_str("[api]\naccess_token = \"${UNSET_SHEET_TOKEN}\"\n").unwrap();
            assert!(matches!(
                config.require_access_token(),
                Err(ConfigError::Missing { ref field }) if field == "api.access_token"
            ));
        }
    }

    #[test]
    fn test_defaults_apply_to_empty_config() {
        let config = ClientConfig::from_toml_str("").unwrap();
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.retry_policy(), RetryPolicy::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("TEST_SMARTSHEET_BASE", "https://test.api.com/2.0");

        let toml_content = r#"
[api]
base_url = "${TEST_SMARTSHEET_BASE}"
"#;

        let config = ClientConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.base_url(), "https://test.api.com/2.0");

        std::env::remove_var("TEST_SMARTSHEET_BASE");
    }

    #[test]
    fn test_config_validation() {
        let config = ClientConfig::from_toml_str(
            r#"
[api]
base_url = "invalid-url"
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());

        let config = ClientConfig::from_toml_str(
            r#"
[logging]
format = "xml"
"#,
        )
        .unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { ref field, .. }) if field == "logging.format"
        ));
    }

    #[test]
    fn test_malformed_toml() {
        assert!(matches!(
            ClientConfig::from_toml_str("[api\nbase_url = 1"),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[retry]\nmax_retry_time_seconds = 5\n")
            .unwrap();

        let config = ClientConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.retry_policy().max_retry_time(), Duration::from_secs(5));
    }
}
