// src/services/jwt_service.rs
use crate::error::AuthError;
use crate::models::jwt::{Claims, TokenPair, TokenType};
use crate::services::key_service::PrivateKey;
use crate::services::resolver::PublicKeyResolver;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::Utc;
use jsonwebtoken::{crypto, decode_header, encode, Algorithm, Header};
use tracing::{debug, instrument};

/// Signs access and refresh tokens with the process' single active key.
#[derive(Clone, Debug)]
pub struct TokenIssuer {
    private_key: PrivateKey,
}

impl TokenIssuer {
    pub fn new(private_key: PrivateKey) -> Self {
        Self { private_key }
    }

    /* ---------- PUBLIC API ---------- */

    #[instrument(skip(self))]
    pub fn issue_access_token(&self, username: &str, id: i64) -> Result<String, AuthError> {
        self.sign(&Claims::new(username, id, TokenType::Access))
    }

    #[instrument(skip(self))]
    pub fn issue_refresh_token(&self, username: &str, id: i64) -> Result<String, AuthError> {
        self.sign(&Claims::new(username, id, TokenType::Refresh))
    }

    /// Issue a fresh access/refresh pair for the same identity.
    pub fn issue_token_pair(&self, username: &str, id: i64) -> Result<TokenPair, AuthError> {
        Ok(TokenPair {
            access_token: self.issue_access_token(username, id)?,
            refresh_token: self.issue_refresh_token(username, id)?,
        })
    }

    /// Sign arbitrary claims into a compact ES256 token.
    pub fn sign(&self, claims: &Claims) -> Result<String, AuthError> {
        let mut header = Header::new(Algorithm::ES256);
        header.kid = Some(self.private_key.key_id().to_string());

        encode(&header, claims, self.private_key.encoding_key()).map_err(AuthError::Signing)
    }
}

/// Validate a token against whatever key `resolver` yields right now.
///
/// The checks run in a fixed order: token shape, key resolution, signature,
/// claims shape, expiry. `Ok` always carries the decoded claims.
#[instrument(skip_all)]
pub fn validate(token: &str, resolver: &dyn PublicKeyResolver) -> Result<Claims, AuthError> {
    let (message, payload, signature) = split_token(token)?;

    let header = decode_header(token).map_err(|e| AuthError::MalformedToken(e.to_string()))?;
    if header.alg != Algorithm::ES256 {
        return Err(AuthError::MalformedToken(format!(
            "unsupported algorithm {:?}",
            header.alg
        )));
    }

    let public_key = resolver.resolve().map_err(AuthError::KeyResolution)?;
    let decoding_key = public_key.decoding_key()?;

    let verified = crypto::verify(signature, message.as_bytes(), &decoding_key, Algorithm::ES256)
        .unwrap_or(false);
    if !verified {
        return Err(AuthError::SignatureInvalid);
    }

    let claims = decode_claims(payload)?;

    // no leeway
    if claims.is_expired_at(Utc::now().timestamp()) {
        return Err(AuthError::TokenExpired);
    }

    debug!(id = claims.id, token_type = claims.token_type.as_str(), "Token validated");
    Ok(claims)
}

/* ---------- PRIVATE HELPERS ---------- */

/// Split `header.claims.signature` into the signed message, the claims
/// segment and the signature.
fn split_token(token: &str) -> Result<(&str, &str, &str), AuthError> {
    let malformed = || AuthError::MalformedToken("expected header.claims.signature".to_string());

    let (message, signature) = token.rsplit_once('.').ok_or_else(malformed)?;
    let (_, payload) = message.split_once('.').ok_or_else(malformed)?;
    if payload.contains('.') {
        return Err(malformed());
    }

    Ok((message, payload, signature))
}

fn decode_claims(payload: &str) -> Result<Claims, AuthError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|e| AuthError::ClaimsDecode(e.to_string()))?;

    serde_json::from_slice(&bytes).map_err(|e| AuthError::ClaimsDecode(e.to_string()))
}
