//! Discord interaction signature verification.
//!
//! Discord signs every interaction request with the application's ed25519 key over the
//! concatenation of the `X-Signature-Timestamp` header and the raw request body. Requests
//! that fail verification are rejected with 401 before any handler runs.

use axum::{
    body::{to_bytes, Body},
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use ed25519_dalek::{Signature, Verifier, VerifyingKey};

use crate::server::{
    error::{auth::AuthError, config::ConfigError, AppError},
    state::AppState,
};

pub const SIGNATURE_HEADER: &str = "x-signature-ed25519";
pub const TIMESTAMP_HEADER: &str = "x-signature-timestamp";

const PUBLIC_KEY_VAR: &str = "DISCORD_PUBLIC_KEY";

/// Largest interaction body accepted for verification.
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Parses the hex-encoded application public key.
///
/// # Returns
/// - `Ok(VerifyingKey)` - Valid 32-byte ed25519 public key
/// - `Err(ConfigError::InvalidEnvVar)` - The key does not decode to an ed25519 public key
pub fn parse_public_key(hex_key: &str) -> Result<VerifyingKey, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEnvVar {
        name: PUBLIC_KEY_VAR.to_string(),
        reason,
    };

    let bytes = hex::decode(hex_key.trim()).map_err(|e| invalid(format!("not valid hex: {}", e)))?;
    let bytes: [u8; 32] = bytes
        .try_into()
        .map_err(|bytes: Vec<u8>| invalid(format!("expected 32 bytes, got {}", bytes.len())))?;

    VerifyingKey::from_bytes(&bytes)
        .map_err(|e| invalid(format!("not an ed25519 public key: {}", e)))
}

/// Verifies a signature over `timestamp || body`.
///
/// # Arguments
/// - `key` - Application public key
/// - `signature_hex` - Hex-encoded signature header value
/// - `timestamp` - Timestamp header value
/// - `body` - Raw request body
///
/// # Returns
/// - `Ok(())` - Signature is valid
/// - `Err(AuthError)` - Signature is malformed or does not verify
pub fn verify_signature(
    key: &VerifyingKey,
    signature_hex: &str,
    timestamp: &str,
    body: &[u8],
) -> Result<(), AuthError> {
    let signature_bytes = hex::decode(signature_hex).map_err(|_| AuthError::MalformedSignature)?;
    let signature =
        Signature::from_slice(&signature_bytes).map_err(|_| AuthError::MalformedSignature)?;

    let mut message = Vec::with_capacity(timestamp.len() + body.len());
    message.extend_from_slice(timestamp.as_bytes());
    message.extend_from_slice(body);

    key.verify(&message, &signature)
        .map_err(|_| AuthError::InvalidSignature)
}

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Result<&'a str, AuthError> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .ok_or(AuthError::MissingSignature)
}

/// Axum middleware rejecting requests without a valid Discord signature.
///
/// The body is buffered for verification and handed on unchanged to the next handler.
pub async fn require_discord_signature(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (parts, body) = request.into_parts();

    let signature = header(&parts.headers, SIGNATURE_HEADER)?.to_string();
    let timestamp = header(&parts.headers, TIMESTAMP_HEADER)?.to_string();

    let bytes = to_bytes(body, MAX_BODY_BYTES)
        .await
        .map_err(|e| AuthError::UnreadableBody(e.to_string()))?;

    verify_signature(&state.verifying_key, &signature, &timestamp, &bytes)?;

    Ok(next
        .run(Request::from_parts(parts, Body::from(bytes)))
        .await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ed25519_dalek::{Signer, SigningKey};

    fn signing_key() -> SigningKey {
        SigningKey::from_bytes(&[7u8; 32])
    }

    fn sign(key: &SigningKey, timestamp: &str, body: &[u8]) -> String {
        let mut message = timestamp.as_bytes().to_vec();
        message.extend_from_slice(body);
        hex::encode(key.sign(&message).to_bytes())
    }

    #[test]
    fn accepts_valid_signature() {
        let key = signing_key();
        let signature = sign(&key, "1700000000", b"{\"type\":1}");

        assert!(verify_signature(
            &key.verifying_key(),
            &signature,
            "1700000000",
            b"{\"type\":1}"
        )
        .is_ok());
    }

    #[test]
    fn rejects_tampered_body() {
        let key = signing_key();
        let signature = sign(&key, "1700000000", b"{\"type\":1}");

        let result = verify_signature(
            &key.verifying_key(),
            &signature,
            "1700000000",
            b"{\"type\":2}",
        );

        assert!(matches!(result, Err(AuthError::InvalidSignature)));
    }

    #[test]
    fn rejects_changed_timestamp() {
        let key = signing_key();
        let signature = sign(&key, "1700000000", b"{}");

        let result = verify_signature(&key.verifying_key(), &signature, "1700000001", b"{}");

        assert!(matches!(result, Err(AuthError::InvalidSignature)));
    }

    #[test]
    fn rejects_malformed_signature() {
        let key = signing_key();

        assert!(matches!(
            verify_signature(&key.verifying_key(), "zz", "1", b"{}"),
            Err(AuthError::MalformedSignature)
        ));
        assert!(matches!(
            verify_signature(&key.verifying_key(), "abcd", "1", b"{}"),
            Err(AuthError::MalformedSignature)
        ));
    }

    #[test]
    fn parses_hex_public_key() {
        let key = signing_key().verifying_key();
        let parsed = parse_public_key(&hex::encode(key.to_bytes())).unwrap();

        assert_eq!(parsed, key);
        assert!(matches!(
            parse_public_key("abcd"),
            Err(ConfigError::InvalidEnvVar { ref name, .. }) if name == "DISCORD_PUBLIC_KEY"
        ));
        assert!(matches!(
            parse_public_key("not hex"),
            Err(ConfigError::InvalidEnvVar { .. })
        ));
    }
}
