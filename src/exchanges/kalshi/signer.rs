use crate::core::errors::ExchangeError;
use crate::core::kernel::{SignatureResult, Signer};
use base64::{engine::general_purpose, Engine as _};
use rsa::pkcs1::DecodeRsaPrivateKey;
use rsa::pkcs8::DecodePrivateKey;
use rsa::pss::BlindedSigningKey;
use rsa::signature::{RandomizedSigner, SignatureEncoding};
use rsa::RsaPrivateKey;
use sha2::Sha256;
use std::collections::HashMap;
use std::path::Path;

pub const ACCESS_KEY_HEADER: &str = "KALSHI-ACCESS-KEY";
pub const ACCESS_SIGNATURE_HEADER: &str = "KALSHI-ACCESS-SIGNATURE";
pub const ACCESS_TIMESTAMP_HEADER: &str = "KALSHI-ACCESS-TIMESTAMP";

/// RSA-PSS signer for Kalshi API requests
///
/// Signs `{timestamp}{METHOD}{path}` with PSS padding, MGF1-SHA256 and a
/// salt as long as the digest. PSS is randomized, so signing the same
/// message twice gives two different signatures that both verify.
pub struct KalshiSigner {
    key_id: String,
    signing_key: BlindedSigningKey<Sha256>,
}

impl KalshiSigner {
    pub fn new(key_id: String, private_key: RsaPrivateKey) -> Self {
        Self {
            key_id,
            signing_key: BlindedSigningKey::<Sha256>::new(private_key),
        }
    }

    /// Parse a PEM private key in PKCS#8 (`BEGIN PRIVATE KEY`) or
    /// PKCS#1 (`BEGIN RSA PRIVATE KEY`) form
    pub fn from_pem(key_id: String, pem: &str) -> Result<Self, ExchangeError> {
        let pem = pem.trim();
        let private_key = RsaPrivateKey::from_pkcs8_pem(pem)
            .or_else(|_| RsaPrivateKey::from_pkcs1_pem(pem))
            .map_err(|e| {
                ExchangeError::AuthError(format!("Failed to parse RSA private key: {}", e))
            })?;

        Ok(Self::new(key_id, private_key))
    }

    /// Load the private key from a PEM file on disk
    pub fn from_pem_file(key_id: String, path: impl AsRef<Path>) -> Result<Self, ExchangeError> {
        let path = path.as_ref();
        let pem = std::fs::read_to_string(path).map_err(|e| {
            ExchangeError::AuthError(format!(
                "Failed to read private key file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_pem(key_id, &pem)
    }

    /// Sign `text` and return the base64 signature
    pub fn sign_pss_text(&self, text: &str) -> Result<String, ExchangeError> {
        let mut rng = rand::thread_rng();
        let signature = self
            .signing_key
            .try_sign_with_rng(&mut rng, text.as_bytes())
            .map_err(|e| ExchangeError::SigningError(format!("RSA-PSS signing failed: {}", e)))?;

        Ok(general_purpose::STANDARD.encode(signature.to_bytes()))
    }
}

impl std::fmt::Debug for KalshiSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KalshiSigner")
            .field("key_id", &self.key_id)
            .finish_non_exhaustive()
    }
}

/// Message covered by the signature
pub fn signing_message(timestamp: u64, method: &str, path: &str) -> String {
    format!("{}{}{}", timestamp, method.to_uppercase(), path)
}

impl Signer for KalshiSigner {
    fn sign_request(&self, method: &str, path: &str, timestamp: u64) -> SignatureResult {
        let signature = self.sign_pss_text(&signing_message(timestamp, method, path))?;

        let mut headers = HashMap::new();
        headers.insert(ACCESS_KEY_HEADER.to_string(), self.key_id.clone());
        headers.insert(ACCESS_SIGNATURE_HEADER.to_string(), signature);
        headers.insert(ACCESS_TIMESTAMP_HEADER.to_string(), timestamp.to_string());

        Ok(headers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rsa::pkcs1::EncodeRsaPrivateKey;
    use rsa::pkcs8::{EncodePrivateKey, LineEnding};
    use rsa::pss::{Signature, VerifyingKey};
    use rsa::signature::Verifier;
    use rsa::RsaPublicKey;

    fn test_key() -> RsaPrivateKey {
        RsaPrivateKey::new(&mut rand::thread_rng(), 1024).unwrap()
    }

    fn verify(public_key: &RsaPublicKey, message: &str, signature_b64: &str) -> bool {
        let bytes = general_purpose::STANDARD.decode(signature_b64).unwrap();
        let signature = Signature::try_from(bytes.as_slice()).unwrap();
        VerifyingKey::<Sha256>::new(public_key.clone())
            .verify(message.as_bytes(), &signature)
            .is_ok()
    }

    #[test]
    fn test_signing_message_format() {
        assert_eq!(
            signing_message(1_700_000_000_000, "get", "/trade-api/v2/markets"),
            "1700000000000GET/trade-api/v2/markets"
        );
    }

    #[test]
    fn test_signatures_are_randomized_but_both_verify() {
        let key = test_key();
        let public_key = key.to_public_key();
        let signer = KalshiSigner::new("key-id".to_string(), key);

        let message = signing_message(1_700_000_000_000, "GET", "/trade-api/v2/portfolio/balance");
        let first = signer.sign_pss_text(&message).unwrap();
        let second = signer.sign_pss_text(&message).unwrap();

        assert_ne!(first, second);
        assert!(verify(&public_key, &message, &first));
        assert!(verify(&public_key, &message, &second));
        assert!(!verify(&public_key, "1700000000000GET/trade-api/v2/other", &first));
    }

    #[test]
    fn test_sign_request_headers() {
        let key = test_key();
        let public_key = key.to_public_key();
        let signer = KalshiSigner::new("key-id".to_string(), key);

        let headers = signer
            .sign_request("POST", "/trade-api/v2/portfolio/orders", 42)
            .unwrap();

        assert_eq!(headers[ACCESS_KEY_HEADER], "key-id");
        assert_eq!(headers[ACCESS_TIMESTAMP_HEADER], "42");
        assert!(verify(
            &public_key,
            "42POST/trade-api/v2/portfolio/orders",
            &headers[ACCESS_SIGNATURE_HEADER]
        ));
    }

    #[test]
    fn test_from_pem_accepts_pkcs8_and_pkcs1() {
        let key = test_key();
        let pkcs8 = key.to_pkcs8_pem(LineEnding::LF).unwrap();
        let pkcs1 = key.to_pkcs1_pem(LineEnding::LF).unwrap();

        assert!(KalshiSigner::from_pem("id".to_string(), &pkcs8).is_ok());
        assert!(KalshiSigner::from_pem("id".to_string(), &pkcs1).is_ok());
    }

    #[test]
    fn test_from_pem_rejects_garbage() {
        let err = KalshiSigner::from_pem("id".to_string(), "not a key").unwrap_err();
        assert!(matches!(err, ExchangeError::AuthError(_)));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_from_missing_pem_file() {
        let err = KalshiSigner::from_pem_file("id".to_string(), "/nonexistent/key.pem").unwrap_err();
        assert!(matches!(err, ExchangeError::AuthError(_)));
    }

    #[test]
    fn test_debug_hides_key_material() {
        let signer = KalshiSigner::new("key-id".to_string(), test_key());
        let debug = format!("{:?}", signer);
        assert!(debug.contains("key-id"));
        assert!(!debug.contains("signing_key"));
    }
}
