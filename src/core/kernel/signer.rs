use crate::core::errors::ExchangeError;
use std::collections::HashMap;

/// Result type for signing operations: the authentication headers to attach
pub type SignatureResult = Result<HashMap<String, String>, ExchangeError>;

/// Signer trait for request authentication
///
/// The gateway decides what is signed; implementations turn that into the
/// headers an exchange expects.
pub trait Signer: Send + Sync {
    /// Sign a request and return the headers to attach
    ///
    /// # Arguments
    /// * `method` - Upper-case HTTP method (GET, POST, DELETE)
    /// * `path` - Versioned request path without query string
    /// * `timestamp` - Request timestamp in milliseconds since the epoch
    fn sign_request(&self, method: &str, path: &str, timestamp: u64) -> SignatureResult;
}
