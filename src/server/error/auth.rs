use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum AuthError {
    /// Interaction request is missing the Discord signature headers.
    #[error("Interaction request is missing signature headers")]
    MissingSignature,

    /// Signature header could not be decoded as a 64-byte ed25519 signature.
    #[error("Interaction signature is malformed")]
    MalformedSignature,

    /// Signature did not verify against the application's public key.
    ///
    /// Discord periodically sends deliberately invalid signatures and expects them to be
    /// rejected with 401.
    #[error("Interaction signature verification failed")]
    InvalidSignature,

    /// Request body could not be buffered for verification.
    #[error("Failed to read interaction body: {0}")]
    UnreadableBody(String),
}

/// Converts authentication errors into HTTP responses.
///
/// Every signature failure maps to 401 Unauthorized with the same body so that callers
/// cannot distinguish a missing header from a bad signature.
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            Json(ErrorDto {
                error: "Invalid signature".to_string(),
            }),
        )
            .into_response()
    }
}
