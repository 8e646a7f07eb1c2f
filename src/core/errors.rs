use thiserror::Error;

/// Hint attached to HTTP 404 responses
pub const NOT_FOUND_HINT: &str = "verify the ticker/identifier used";

/// Hint attached to HTTP 400 responses
pub const BAD_REQUEST_HINT: &str = "one or more parameters invalid";

#[derive(Error, Debug)]
pub enum ExchangeError {
    #[error("Not found: {status} {reason} (tip: {hint})")]
    NotFound {
        status: u16,
        reason: String,
        hint: &'static str,
        body: String,
    },

    #[error("Bad request: {status} {reason} (tip: {hint})")]
    BadRequest {
        status: u16,
        reason: String,
        hint: &'static str,
        body: String,
    },

    #[error("Request failed: {status} {reason}")]
    RequestFailed {
        status: u16,
        reason: String,
        body: String,
    },

    #[error("Signing error: {0}")]
    SigningError(String),

    #[error("Transport error: {0}")]
    TransportError(#[from] reqwest::Error),

    #[error("Deserialization error: {0}")]
    DeserializationError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Authentication error: {0}")]
    AuthError(String),

    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Configuration error: {0}")]
    ConfigError(#[from] crate::core::config::ConfigError),
}

impl ExchangeError {
    /// HTTP status code carried by the error, if it came from a response
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::NotFound { status, .. }
            | Self::BadRequest { status, .. }
            | Self::RequestFailed { status, .. } => Some(*status),
            Self::TransportError(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Human-readable tip for 404 and 400 responses
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::NotFound { hint, .. } | Self::BadRequest { hint, .. } => Some(*hint),
            _ => None,
        }
    }

    /// Errors that point at key or environment misconfiguration.
    ///
    /// Nothing in this crate retries, but callers running their own loops
    /// should stop on these rather than try again.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::SigningError(_)
                | Self::AuthError(_)
                | Self::ConfigurationError(_)
                | Self::ConfigError(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_errors_expose_status_and_hint() {
        let err = ExchangeError::NotFound {
            status: 404,
            reason: "Not Found".to_string(),
            hint: NOT_FOUND_HINT,
            body: String::new(),
        };
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.hint(), Some(NOT_FOUND_HINT));
        assert!(err.to_string().contains("verify the ticker"));

        let err = ExchangeError::RequestFailed {
            status: 503,
            reason: "Service Unavailable".to_string(),
            body: "down".to_string(),
        };
        assert_eq!(err.status(), Some(503));
        assert_eq!(err.hint(), None);
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_signing_error_is_fatal() {
        let err = ExchangeError::SigningError("bad key".to_string());
        assert!(err.is_fatal());
        assert_eq!(err.status(), None);
    }
}
