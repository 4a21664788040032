use axum::body::Bytes;
use jsonwebtoken::jwk::{
    AlgorithmParameters, CommonParameters, EllipticCurve, EllipticCurveKeyParameters,
    EllipticCurveKeyType, Jwk, JwkSet, KeyAlgorithm, PublicKeyUse,
};
use tracing::{debug, instrument};

use crate::error::AuthError;
use crate::services::key_service::PublicKey;

/// Serialize `public_key` as a single-key JWKS document.
#[instrument(skip_all, fields(kid = public_key.key_id()))]
pub fn generate_jwks_document(public_key: &PublicKey) -> Result<Bytes, AuthError> {
    let (x, y) = public_key.coordinates();

    let jwk = Jwk {
        common: CommonParameters {
            public_key_use: Some(PublicKeyUse::Signature),
            key_operations: None,
            key_algorithm: Some(KeyAlgorithm::ES256),
            key_id: public_key.key_id().map(str::to_string),
            x509_url: None,
            x509_chain: None,
            x509_sha1_fingerprint: None,
            x509_sha256_fingerprint: None,
        },
        algorithm: AlgorithmParameters::EllipticCurve(EllipticCurveKeyParameters {
            key_type: EllipticCurveKeyType::EC,
            curve: EllipticCurve::P256,
            x,
            y,
        }),
    };

    let document = serde_json::to_vec(&JwkSet { keys: vec![jwk] })
        .map_err(AuthError::Serialization)?;

    debug!(bytes = document.len(), "Generated JWKS document");
    Ok(Bytes::from(document))
}

/// Rebuild the public key published in a JWKS document.
///
/// Only the first key is considered, and it has to be an EC P-256 key.
pub fn public_key_from_jwks(document: &[u8]) -> Result<PublicKey, AuthError> {
    let jwks: JwkSet =
        serde_json::from_slice(document).map_err(|e| AuthError::Parse(e.to_string()))?;

    let jwk = jwks
        .keys
        .first()
        .ok_or_else(|| AuthError::Parse("document contains no keys".to_string()))?;

    match &jwk.algorithm {
        AlgorithmParameters::EllipticCurve(params) if params.curve == EllipticCurve::P256 => {
            PublicKey::from_coordinates(&params.x, &params.y, jwk.common.key_id.clone())
        }
        AlgorithmParameters::EllipticCurve(params) => Err(AuthError::Parse(format!(
            "unsupported curve {:?}",
            params.curve
        ))),
        other => Err(AuthError::Parse(format!("unsupported key type {other:?}"))),
    }
}
