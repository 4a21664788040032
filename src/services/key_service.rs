use std::fmt;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use jsonwebtoken::{DecodingKey, EncodingKey};
use p256::{elliptic_curve::sec1::ToEncodedPoint, pkcs8::EncodePrivateKey, FieldBytes, SecretKey};
use rand::{rngs::OsRng, RngCore};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::AuthError;

const COORDINATE_LEN: usize = 32;

/// The signing half of a key pair. Only ever held by the issuing process.
#[derive(Clone)]
pub struct PrivateKey {
    key_id: String,
    encoding_key: EncodingKey,
}

/// The verifying half of a P-256 key pair, optionally tagged with a key id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey {
    key_id: Option<String>,
    key: p256::PublicKey,
}

pub struct KeyPair {
    pub private_key: PrivateKey,
    pub public_key: PublicKey,
}

impl KeyPair {
    /// Generate a fresh P-256 key pair from the OS random source.
    ///
    /// Out-of-range seeds are redrawn. An error means the random source itself
    /// failed; callers treat it as fatal.
    #[instrument]
    pub fn generate() -> Result<Self, AuthError> {
        let secret_key = random_secret_key(&mut OsRng)?;

        // jsonwebtoken wants EC signing keys as PKCS#8 DER
        let pkcs8_der = secret_key
            .to_pkcs8_der()
            .map_err(|e| AuthError::KeyGeneration(e.to_string()))?;

        let key_id = Uuid::new_v4().to_string();
        info!(kid = %key_id, "Generated ES256 signing key pair");

        Ok(Self {
            private_key: PrivateKey {
                key_id: key_id.clone(),
                encoding_key: EncodingKey::from_ec_der(pkcs8_der.as_bytes()),
            },
            public_key: PublicKey {
                key_id: Some(key_id),
                key: secret_key.public_key(),
            },
        })
    }

    pub fn into_parts(self) -> (PrivateKey, PublicKey) {
        (self.private_key, self.public_key)
    }
}

impl PrivateKey {
    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    pub(crate) fn encoding_key(&self) -> &EncodingKey {
        &self.encoding_key
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("key_id", &self.key_id)
            .finish_non_exhaustive()
    }
}

impl PublicKey {
    /// Rebuild a public key from base64url affine coordinates, as found in a JWK.
    pub fn from_coordinates(x: &str, y: &str, key_id: Option<String>) -> Result<Self, AuthError> {
        let x = decode_coordinate("x", x)?;
        let y = decode_coordinate("y", y)?;

        let mut sec1 = Vec::with_capacity(1 + 2 * COORDINATE_LEN);
        sec1.push(0x04);
        sec1.extend_from_slice(&x);
        sec1.extend_from_slice(&y);

        let key = p256::PublicKey::from_sec1_bytes(&sec1)
            .map_err(|_| AuthError::Parse("coordinates are not a point on P-256".to_string()))?;

        Ok(Self { key_id, key })
    }

    pub fn key_id(&self) -> Option<&str> {
        self.key_id.as_deref()
    }

    /// Base64url (unpadded) encodings of the affine `x` and `y` coordinates.
    pub fn coordinates(&self) -> (String, String) {
        let point = self.key.to_encoded_point(false);
        // uncompressed SEC1: 0x04 || x || y
        let bytes = point.as_bytes();
        let (x, y) = bytes[1..].split_at(COORDINATE_LEN);

        (URL_SAFE_NO_PAD.encode(x), URL_SAFE_NO_PAD.encode(y))
    }

    pub(crate) fn decoding_key(&self) -> Result<DecodingKey, AuthError> {
        let (x, y) = self.coordinates();
        DecodingKey::from_ec_components(&x, &y).map_err(|e| AuthError::KeyResolution(e.into()))
    }
}

/// Draw seeds until one is a valid scalar: non-zero and below the curve order.
fn random_secret_key<R: RngCore>(rng: &mut R) -> Result<SecretKey, AuthError> {
    let mut seed = FieldBytes::default();
    loop {
        rng.try_fill_bytes(seed.as_mut_slice())
            .map_err(|e| AuthError::KeyGeneration(e.to_string()))?;

        if let Ok(secret_key) = SecretKey::from_bytes(&seed) {
            return Ok(secret_key);
        }
    }
}

fn decode_coordinate(name: &str, value: &str) -> Result<Vec<u8>, AuthError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(value)
        .map_err(|e| AuthError::Parse(format!("coordinate {name} is not base64url: {e}")))?;

    if bytes.len() != COORDINATE_LEN {
        return Err(AuthError::Parse(format!(
            "coordinate {name} has {} bytes, expected {COORDINATE_LEN}",
            bytes.len()
        )));
    }

    Ok(bytes)
}
