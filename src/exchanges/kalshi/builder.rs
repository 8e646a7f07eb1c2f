use crate::core::config::ExchangeConfig;
use crate::core::errors::ExchangeError;
use crate::core::kernel::rate_limiter::{interval_for_rate, DEFAULT_CALLS_PER_SECOND};
use crate::core::kernel::{ReqwestRest, RestClientBuilder, RestClientConfig};
use crate::exchanges::kalshi::{connector::KalshiConnector, signer::KalshiSigner};
use secrecy::Secret;
use std::sync::Arc;
use std::time::Duration;

/// Kalshi REST API base URL (production)
pub const KALSHI_REST_URL: &str = "https://api.elections.kalshi.com/trade-api/v2";

/// Kalshi REST API base URL (demo)
pub const KALSHI_REST_URL_DEMO: &str = "https://demo-api.kalshi.co/trade-api/v2";

/// Builder for Kalshi connectors
///
/// ```rust,no_run
/// use kalshix::core::config::ExchangeConfig;
/// use kalshix::exchanges::kalshi::KalshiBuilder;
/// use std::time::Duration;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pem = std::fs::read_to_string("kalshi_private_key.pem")?;
/// let connector = KalshiBuilder::new()
///     .with_config(ExchangeConfig::new("key-id".to_string(), pem))
///     .with_rate_limit(5)
///     .with_timeout(Duration::from_secs(10))
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct KalshiBuilder {
    config: ExchangeConfig,
    timeout: Duration,
    min_interval: Option<Duration>,
    api_prefix: Option<String>,
    user_agent: Option<String>,
}

impl Default for KalshiBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl KalshiBuilder {
    pub fn new() -> Self {
        Self {
            config: ExchangeConfig::default(),
            timeout: Duration::from_secs(30),
            min_interval: None,
            api_prefix: None,
            user_agent: None,
        }
    }

    /// Set the exchange configuration
    pub fn with_config(mut self, config: ExchangeConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the key id and PEM private key
    pub fn with_credentials(mut self, key_id: String, private_key_pem: String) -> Self {
        self.config.api_key = Secret::new(key_id);
        self.config.private_key = Secret::new(private_key_pem);
        self
    }

    /// Use the demo environment
    pub fn with_demo(mut self, demo: bool) -> Self {
        self.config.demo = demo;
        self
    }

    /// Override the base URL, e.g. to target a local stub
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.config.base_url = Some(base_url);
        self
    }

    /// Allow `calls_per_second` requests per second
    pub fn with_rate_limit(mut self, calls_per_second: u32) -> Self {
        self.config.rate_limit = Some(calls_per_second);
        self
    }

    /// Set the minimum interval between requests directly
    pub fn with_min_interval(mut self, min_interval: Duration) -> Self {
        self.min_interval = Some(min_interval);
        self
    }

    /// Set the per-request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the version prefix included in the signed message
    pub fn with_api_prefix(mut self, api_prefix: String) -> Self {
        self.api_prefix = Some(api_prefix);
        self
    }

    /// Override the `User-Agent` header sent with every request
    pub fn with_user_agent(mut self, user_agent: String) -> Self {
        self.user_agent = Some(user_agent);
        self
    }

    fn base_url(&self) -> String {
        self.config.base_url.clone().unwrap_or_else(|| {
            if self.config.demo {
                KALSHI_REST_URL_DEMO.to_string()
            } else {
                KALSHI_REST_URL.to_string()
            }
        })
    }

    fn min_interval(&self) -> Result<Duration, ExchangeError> {
        if let Some(interval) = self.min_interval {
            return Ok(interval);
        }
        match self.config.rate_limit {
            Some(0) => Err(ExchangeError::ConfigurationError(
                "Rate limit must be at least one call per second".to_string(),
            )),
            Some(calls) => Ok(interval_for_rate(calls)),
            None => Ok(interval_for_rate(DEFAULT_CALLS_PER_SECOND)),
        }
    }

    /// Build the signed gateway only
    pub fn build_rest(self) -> Result<ReqwestRest, ExchangeError> {
        if !self.config.has_credentials() {
            return Err(ExchangeError::ConfigurationError(
                "Kalshi requires a key id and an RSA private key".to_string(),
            ));
        }

        let signer = Arc::new(KalshiSigner::from_pem(
            self.config.api_key().to_string(),
            self.config.private_key(),
        )?);

        let mut rest_config = RestClientConfig::new(self.base_url(), "kalshi".to_string())
            .with_timeout(self.timeout)
            .with_min_interval(self.min_interval()?);
        if let Some(prefix) = self.api_prefix {
            rest_config = rest_config.with_api_prefix(prefix);
        }
        if let Some(user_agent) = self.user_agent {
            rest_config = rest_config.with_user_agent(user_agent);
        }

        RestClientBuilder::new(rest_config)
            .with_signer(signer)
            .build()
    }

    /// Build a connector over a fresh gateway
    pub fn build(self) -> Result<KalshiConnector<ReqwestRest>, ExchangeError> {
        Ok(KalshiConnector::new(self.build_rest()?))
    }
}

/// Create a Kalshi connector from configuration
pub fn build_connector(config: ExchangeConfig) -> Result<KalshiConnector<ReqwestRest>, ExchangeError> {
    KalshiBuilder::new().with_config(config).build()
}
