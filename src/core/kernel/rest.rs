use crate::core::errors::{ExchangeError, BAD_REQUEST_HINT, NOT_FOUND_HINT};
use crate::core::kernel::rate_limiter::{RateLimiter, DEFAULT_CALLS_PER_SECOND};
use crate::core::kernel::signer::Signer;
use crate::core::params::{strip_query, Params};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, Response, StatusCode};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{instrument, trace, warn};

/// REST client trait for making signed HTTP requests
///
/// Every call is paced, signed and classified by the implementation.
/// `endpoint` is a path starting with `/`, relative to the configured base
/// URL, and may already carry a query string.
#[async_trait]
pub trait RestClient: Send + Sync {
    /// Make a GET request
    ///
    /// # Arguments
    /// * `endpoint` - The API endpoint path
    /// * `params` - Query parameters, rendered under the falsy-omission rule
    ///
    /// # Returns
    /// The response body as a JSON value
    async fn get(&self, endpoint: &str, params: &Params) -> Result<Value, ExchangeError>;

    /// Make a POST request
    ///
    /// # Arguments
    /// * `endpoint` - The API endpoint path
    /// * `body` - Request body as JSON value
    ///
    /// # Returns
    /// The response body as a JSON value
    async fn post(&self, endpoint: &str, body: &Value) -> Result<Value, ExchangeError>;

    /// Make a DELETE request, optionally with a JSON body
    async fn delete(&self, endpoint: &str, body: Option<&Value>) -> Result<Value, ExchangeError>;
}

/// Configuration for the REST client
#[derive(Clone, Debug)]
pub struct RestClientConfig {
    /// Base URL for the API, including the version root
    pub base_url: String,
    /// Exchange name for logging and tracing
    pub exchange_name: String,
    /// Prefix placed between the method and the path in the signed message
    pub api_prefix: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// Minimum spacing between dispatches
    pub min_interval: Duration,
    /// User agent string to include in requests
    pub user_agent: String,
}

impl RestClientConfig {
    /// Create a new configuration
    ///
    /// # Arguments
    /// * `base_url` - Base URL for the API
    /// * `exchange_name` - Name of the exchange
    pub fn new(base_url: String, exchange_name: String) -> Self {
        Self {
            base_url,
            exchange_name,
            api_prefix: "/trade-api/v2".to_string(),
            timeout: Duration::from_secs(30),
            min_interval: Duration::from_secs(1) / DEFAULT_CALLS_PER_SECOND,
            user_agent: "kalshix/0.1".to_string(),
        }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the minimum interval between requests
    pub fn with_min_interval(mut self, min_interval: Duration) -> Self {
        self.min_interval = min_interval;
        self
    }

    /// Set the prefix used when building the signed message
    pub fn with_api_prefix(mut self, api_prefix: String) -> Self {
        self.api_prefix = api_prefix;
        self
    }

    /// Set the user agent string
    pub fn with_user_agent(mut self, user_agent: String) -> Self {
        self.user_agent = user_agent;
        self
    }
}

/// Builder for creating REST client instances
pub struct RestClientBuilder {
    config: RestClientConfig,
    signer: Option<Arc<dyn Signer>>,
}

impl RestClientBuilder {
    /// Create a new builder with the given configuration
    pub fn new(config: RestClientConfig) -> Self {
        Self {
            config,
            signer: None,
        }
    }

    /// Set the signer for requests
    pub fn with_signer(mut self, signer: Arc<dyn Signer>) -> Self {
        self.signer = Some(signer);
        self
    }

    /// Build the REST client
    ///
    /// Fails when no signer was given: every request must be signed.
    pub fn build(self) -> Result<ReqwestRest, ExchangeError> {
        let signer = self.signer.ok_or_else(|| {
            ExchangeError::ConfigurationError(
                "A signer is required to build the REST client".to_string(),
            )
        })?;

        if !self.config.base_url.starts_with("http://")
            && !self.config.base_url.starts_with("https://")
        {
            return Err(ExchangeError::ConfigurationError(format!(
                "Base URL must include a scheme: {}",
                self.config.base_url
            )));
        }

        let rate_limiter = RateLimiter::new(self.config.min_interval)?;

        let client = Client::builder()
            .timeout(self.config.timeout)
            .user_agent(&self.config.user_agent)
            .build()
            .map_err(|e| {
                ExchangeError::ConfigurationError(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(ReqwestRest {
            client,
            config: self.config,
            signer,
            rate_limiter,
        })
    }
}

/// Implementation of `RestClient` using reqwest
///
/// Clones share the HTTP session, the signer and the pacing state.
#[derive(Clone)]
pub struct ReqwestRest {
    client: Client,
    config: RestClientConfig,
    signer: Arc<dyn Signer>,
    rate_limiter: RateLimiter,
}

impl std::fmt::Debug for ReqwestRest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestRest")
            .field("config", &self.config)
            .field("rate_limiter", &self.rate_limiter)
            .finish_non_exhaustive()
    }
}

impl ReqwestRest {
    pub fn config(&self) -> &RestClientConfig {
        &self.config
    }

    /// Get the current timestamp in milliseconds
    fn get_timestamp() -> Result<u64, ExchangeError> {
        u64::try_from(chrono::Utc::now().timestamp_millis()).map_err(|e| {
            ExchangeError::SigningError(format!("System clock is before the epoch: {}", e))
        })
    }

    /// Build the full URL for an endpoint
    fn build_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), endpoint)
    }

    /// Path covered by the signature: version prefix plus path, never the query
    fn signing_path(&self, endpoint: &str) -> String {
        format!("{}{}", self.config.api_prefix, strip_query(endpoint))
    }

    /// Handle the response and extract JSON
    #[instrument(skip(self, response), fields(exchange = %self.config.exchange_name, status = %response.status()))]
    async fn handle_response(&self, response: Response) -> Result<Value, ExchangeError> {
        let status = response.status();
        let response_text = response.text().await?;

        trace!("Response body: {}", response_text);

        classify_response(status, &response_text)
    }

    /// Pace, sign, send and classify one request
    #[instrument(skip(self, params, body), fields(exchange = %self.config.exchange_name, method = %method, endpoint = %endpoint))]
    async fn make_request(
        &self,
        method: Method,
        endpoint: &str,
        params: &Params,
        body: Option<&Value>,
    ) -> Result<Value, ExchangeError> {
        if !endpoint.starts_with('/') {
            return Err(ExchangeError::InvalidParameters(format!(
                "Endpoint must be a path starting with '/': {}",
                endpoint
            )));
        }

        let body_bytes = body
            .map(serde_json::to_vec)
            .transpose()
            .map_err(|e| {
                ExchangeError::SerializationError(format!("Failed to serialize request body: {}", e))
            })?;

        self.rate_limiter.acquire().await;

        let path = params.append_to(endpoint);
        let timestamp = Self::get_timestamp()?;
        let headers =
            self.signer
                .sign_request(method.as_str(), &self.signing_path(&path), timestamp)?;

        let mut request = self
            .client
            .request(method, self.build_url(&path))
            .header(CONTENT_TYPE, "application/json");

        for (key, value) in headers {
            request = request.header(key, value);
        }

        if let Some(bytes) = body_bytes {
            request = request.body(bytes);
        }

        let response = request.send().await?;

        self.handle_response(response).await
    }
}

/// Map a status code and body onto the crate's result type.
///
/// 2xx decodes the body (an empty body is `null`), 404 and 400 carry a tip,
/// anything else is a plain failure.
pub fn classify_response(status: StatusCode, body: &str) -> Result<Value, ExchangeError> {
    if status.is_success() {
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        return serde_json::from_str(body).map_err(|e| {
            ExchangeError::DeserializationError(format!("Failed to parse JSON response: {}", e))
        });
    }

    let reason = status.canonical_reason().unwrap_or("Unknown").to_string();
    warn!(status = status.as_u16(), %reason, "Request rejected");

    Err(match status {
        StatusCode::NOT_FOUND => ExchangeError::NotFound {
            status: status.as_u16(),
            reason,
            hint: NOT_FOUND_HINT,
            body: body.to_string(),
        },
        StatusCode::BAD_REQUEST => ExchangeError::BadRequest {
            status: status.as_u16(),
            reason,
            hint: BAD_REQUEST_HINT,
            body: body.to_string(),
        },
        _ => ExchangeError::RequestFailed {
            status: status.as_u16(),
            reason,
            body: body.to_string(),
        },
    })
}

#[async_trait]
impl RestClient for ReqwestRest {
    #[instrument(skip(self, params), fields(exchange = %self.config.exchange_name, endpoint = %endpoint, param_count = params.len()))]
    async fn get(&self, endpoint: &str, params: &Params) -> Result<Value, ExchangeError> {
        self.make_request(Method::GET, endpoint, params, None).await
    }

    #[instrument(skip(self, body), fields(exchange = %self.config.exchange_name, endpoint = %endpoint))]
    async fn post(&self, endpoint: &str, body: &Value) -> Result<Value, ExchangeError> {
        self.make_request(Method::POST, endpoint, &Params::new(), Some(body))
            .await
    }

    #[instrument(skip(self, body), fields(exchange = %self.config.exchange_name, endpoint = %endpoint))]
    async fn delete(&self, endpoint: &str, body: Option<&Value>) -> Result<Value, ExchangeError> {
        self.make_request(Method::DELETE, endpoint, &Params::new(), body)
            .await
    }
}
