/// Kernel - signed transport layer
///
/// The kernel holds the exchange-agnostic part of the client: a REST
/// gateway that paces, signs and classifies every request, the `Signer`
/// seam it signs through, and the rate limiter that spaces dispatches.
///
/// # Request lifecycle
///
/// 1. wait for the rate limiter
/// 2. take a millisecond timestamp
/// 3. sign `{timestamp}{METHOD}{api_prefix}{path without query}`
/// 4. send with the signer's headers and `Content-Type: application/json`
/// 5. classify the status: 2xx decodes JSON, 404 and 400 carry a tip,
///    anything else is `RequestFailed`
///
/// # Example
///
/// ```rust,no_run
/// use kalshix::core::kernel::*;
/// use kalshix::core::params::Params;
/// use kalshix::exchanges::kalshi::KalshiSigner;
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pem = std::fs::read_to_string("kalshi_private_key.pem")?;
/// let signer = Arc::new(KalshiSigner::from_pem("key-id".to_string(), &pem)?);
/// let rest_config = RestClientConfig::new(
///     "https://api.elections.kalshi.com/trade-api/v2".to_string(),
///     "kalshi".to_string(),
/// );
/// let rest = RestClientBuilder::new(rest_config)
///     .with_signer(signer)
///     .build()?;
///
/// let markets = rest
///     .get("/markets", &Params::new().with("status", "open"))
///     .await?;
/// # Ok(())
/// # }
/// ```
pub mod rate_limiter;
pub mod rest;
pub mod signer;

// Re-export key types for convenience
pub use rate_limiter::RateLimiter;
pub use rest::{classify_response, ReqwestRest, RestClient, RestClientBuilder, RestClientConfig};
pub use signer::{SignatureResult, Signer};
