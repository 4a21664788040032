use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    BoxError, Json,
};
use thiserror::Error;
use tracing::{error, warn};

use crate::models::result::{codes, ApiResult};

/// Every failure the auth core can produce.
///
/// Verification failures are collapsed into a single `401` by the HTTP
/// layer; the variant is only ever visible to server-side logging.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("failed to generate key pair: {0}")]
    KeyGeneration(String),

    #[error("failed to sign token")]
    Signing(#[source] jsonwebtoken::errors::Error),

    #[error("failed to serialize JWKS document")]
    Serialization(#[source] serde_json::Error),

    #[error("invalid JWKS document: {0}")]
    Parse(String),

    #[error("no token in request")]
    MissingToken,

    #[error("malformed token: {0}")]
    MalformedToken(String),

    #[error("failed to resolve public key")]
    KeyResolution(#[source] BoxError),

    #[error("token signature is invalid")]
    SignatureInvalid,

    #[error("token claims could not be decoded: {0}")]
    ClaimsDecode(String),

    #[error("token has expired")]
    TokenExpired,

    #[error("expected a {expected} token")]
    WrongTokenType { expected: &'static str },

    #[error("invalid request body: {0}")]
    InvalidRequest(#[from] JsonRejection),
}

impl AuthError {
    /// True for failures caused by the presented token (or the lack of one),
    /// as opposed to failures of the issuing side.
    pub fn is_token_error(&self) -> bool {
        matches!(
            self,
            AuthError::MissingToken
                | AuthError::MalformedToken(_)
                | AuthError::KeyResolution(_)
                | AuthError::SignatureInvalid
                | AuthError::ClaimsDecode(_)
                | AuthError::TokenExpired
                | AuthError::WrongTokenType { .. }
        )
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        if self.is_token_error() {
            warn!(error = %self, "Rejecting request with invalid auth token");
            return unauthorized();
        }

        if let AuthError::InvalidRequest(rejection) = &self {
            warn!(error = %rejection, "Rejecting malformed request body");
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResult::<()>::new(codes::CLIENT_ERROR, rejection.body_text())),
            )
                .into_response();
        }

        error!(error = %self, "Auth service failure");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResult::<()>::from_code(codes::SERVICE_ERROR)),
        )
            .into_response()
    }
}

/// The fixed response every rejected token gets.
pub fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(ApiResult::<()>::new(
            codes::ERROR_AUTH_TOKEN,
            "invalid or expired jwt",
        )),
    )
        .into_response()
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_errors_are_classified() {
        assert!(AuthError::MissingToken.is_token_error());
        assert!(AuthError::TokenExpired.is_token_error());
        assert!(AuthError::SignatureInvalid.is_token_error());
        assert!(AuthError::KeyResolution("down".into()).is_token_error());
        assert!(!AuthError::KeyGeneration("rng".into()).is_token_error());
        assert!(!AuthError::Parse("empty".into()).is_token_error());
    }

    #[test]
    fn token_errors_answer_401() {
        let response = AuthError::TokenExpired.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = AuthError::KeyGeneration("rng".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
