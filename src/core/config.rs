use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::env;

#[derive(Debug, Clone)]
pub struct ExchangeConfig {
    /// API key id shown in the exchange dashboard
    pub api_key: Secret<String>,
    /// PEM-encoded RSA private key
    pub private_key: Secret<String>,
    pub demo: bool,
    pub base_url: Option<String>,
    /// Calls per second allowed by the client-side pacer
    pub rate_limit: Option<u32>,
}

// Custom Serialize implementation - never expose secrets in serialization
impl Serialize for ExchangeConfig {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("ExchangeConfig", 5)?;
        state.serialize_field("api_key", "[REDACTED]")?;
        state.serialize_field("private_key", "[REDACTED]")?;
        state.serialize_field("demo", &self.demo)?;
        state.serialize_field("base_url", &self.base_url)?;
        state.serialize_field("rate_limit", &self.rate_limit)?;
        state.end()
    }
}

impl<'de> Deserialize<'de> for ExchangeConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct ExchangeConfigHelper {
            api_key: String,
            private_key: String,
            #[serde(default)]
            demo: bool,
            base_url: Option<String>,
            rate_limit: Option<u32>,
        }

        let helper = ExchangeConfigHelper::deserialize(deserializer)?;
        Ok(Self {
            api_key: Secret::new(helper.api_key),
            private_key: Secret::new(helper.private_key),
            demo: helper.demo,
            base_url: helper.base_url,
            rate_limit: helper.rate_limit,
        })
    }
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self::new(String::new(), String::new())
    }
}

impl ExchangeConfig {
    /// Create a new configuration from a key id and a PEM private key
    #[must_use]
    pub fn new(api_key: String, private_key: String) -> Self {
        Self {
            api_key: Secret::new(api_key),
            private_key: Secret::new(private_key),
            demo: false,
            base_url: None,
            rate_limit: None,
        }
    }

    /// Create configuration from environment variables
    ///
    /// Expected environment variables:
    /// - `{PREFIX}_API_KEY` (e.g., `KALSHI_API_KEY`)
    /// - `{PREFIX}_PRIVATE_KEY` with the PEM text, or
    ///   `{PREFIX}_PRIVATE_KEY_PATH` pointing at a PEM file
    /// - `{PREFIX}_DEMO` (optional, defaults to false)
    /// - `{PREFIX}_BASE_URL` (optional)
    /// - `{PREFIX}_RATE_LIMIT` (optional, calls per second)
    pub fn from_env(prefix: &str) -> Result<Self, ConfigError> {
        let prefix = prefix.to_uppercase();
        let api_key_var = format!("{}_API_KEY", prefix);
        let private_key_var = format!("{}_PRIVATE_KEY", prefix);
        let private_key_path_var = format!("{}_PRIVATE_KEY_PATH", prefix);
        let demo_var = format!("{}_DEMO", prefix);
        let base_url_var = format!("{}_BASE_URL", prefix);
        let rate_limit_var = format!("{}_RATE_LIMIT", prefix);

        let api_key = env::var(&api_key_var)
            .map_err(|_| ConfigError::MissingEnvironmentVariable(api_key_var))?;

        let private_key = match env::var(&private_key_var) {
            Ok(pem) => pem,
            Err(_) => {
                let path = env::var(&private_key_path_var).map_err(|_| {
                    ConfigError::MissingEnvironmentVariable(format!(
                        "{} or {}",
                        private_key_var, private_key_path_var
                    ))
                })?;
                std::fs::read_to_string(&path).map_err(|e| {
                    ConfigError::InvalidConfiguration(format!(
                        "Failed to read private key file '{}': {}",
                        path, e
                    ))
                })?
            }
        };

        let demo = env::var(&demo_var)
            .unwrap_or_else(|_| "false".to_string())
            .parse::<bool>()
            .unwrap_or(false);

        let base_url = env::var(&base_url_var).ok();

        let rate_limit = match env::var(&rate_limit_var) {
            Ok(raw) => Some(raw.parse::<u32>().map_err(|e| {
                ConfigError::InvalidConfiguration(format!(
                    "{} must be a positive integer: {}",
                    rate_limit_var, e
                ))
            })?),
            Err(_) => None,
        };

        Ok(Self {
            api_key: Secret::new(api_key),
            private_key: Secret::new(private_key),
            demo,
            base_url,
            rate_limit,
        })
    }

    /// Create configuration from .env file and environment variables
    ///
    /// **Security Warning**: Never commit .env files to version control!
    #[cfg(feature = "env-file")]
    pub fn from_env_file(prefix: &str) -> Result<Self, ConfigError> {
        Self::from_env_file_with_path(prefix, ".env")
    }

    /// Create configuration from a specific .env file path
    #[cfg(feature = "env-file")]
    pub fn from_env_file_with_path(prefix: &str, env_file_path: &str) -> Result<Self, ConfigError> {
        match dotenv::from_path(env_file_path) {
            Ok(_) => {}
            Err(dotenv::Error::Io(io_err)) if io_err.kind() == std::io::ErrorKind::NotFound => {
                // no file, fall back to the process environment
            }
            Err(e) => {
                return Err(ConfigError::InvalidConfiguration(format!(
                    "Failed to load .env file '{}': {}",
                    env_file_path, e
                )));
            }
        }

        Self::from_env(prefix)
    }

    /// Check if this configuration has credentials for signing
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        !self.api_key.expose_secret().is_empty() && !self.private_key.expose_secret().is_empty()
    }

    /// Use the demo environment
    #[must_use]
    pub const fn demo(mut self, demo: bool) -> Self {
        self.demo = demo;
        self
    }

    /// Set custom base URL
    #[must_use]
    pub fn base_url(mut self, base_url: String) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// Set the client-side rate limit in calls per second
    #[must_use]
    pub const fn rate_limit(mut self, calls_per_second: u32) -> Self {
        self.rate_limit = Some(calls_per_second);
        self
    }

    /// Get API key id
    pub fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }

    /// Get the PEM private key (use carefully - exposes secret)
    pub fn private_key(&self) -> &str {
        self.private_key.expose_secret()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvironmentVariable(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialization_redacts_secrets() {
        let config = ExchangeConfig::new("key-id".to_string(), "-----BEGIN".to_string())
            .demo(true)
            .rate_limit(5);
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("[REDACTED]"));
        assert!(!json.contains("key-id"));
        assert!(!json.contains("-----BEGIN"));
        assert!(json.contains("\"rate_limit\":5"));
    }

    #[test]
    fn test_deserialize_defaults() {
        let config: ExchangeConfig =
            serde_json::from_str(r#"{"api_key":"id","private_key":"pem","base_url":null,"rate_limit":null}"#)
                .unwrap();
        assert!(!config.demo);
        assert!(config.has_credentials());
        assert_eq!(config.api_key(), "id");
    }

    #[test]
    fn test_empty_credentials() {
        assert!(!ExchangeConfig::default().has_credentials());
    }

    #[test]
    fn test_from_env_missing_key() {
        let result = ExchangeConfig::from_env("KALSHIX_UNSET_PREFIX_FOR_TESTS");
        assert!(matches!(
            result,
            Err(ConfigError::MissingEnvironmentVariable(_))
        ));
    }
}
