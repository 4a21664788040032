use std::sync::Arc;

use axum::BoxError;

use crate::services::key_service::PublicKey;

/// Supplies the key a token is verified against, at verification time.
///
/// Implemented for plain closures, so a resolver can be as small as
/// `move || Ok(public_key.clone())`, and for [`PublicKey`] itself when the
/// key is known up front. Resolvers run inline on the caller's task.
pub trait PublicKeyResolver: Send + Sync {
    fn resolve(&self) -> Result<PublicKey, BoxError>;
}

pub type SharedResolver = Arc<dyn PublicKeyResolver>;

impl<F> PublicKeyResolver for F
where
    F: Fn() -> Result<PublicKey, BoxError> + Send + Sync,
{
    fn resolve(&self) -> Result<PublicKey, BoxError> {
        self()
    }
}

impl PublicKeyResolver for PublicKey {
    fn resolve(&self) -> Result<PublicKey, BoxError> {
        Ok(self.clone())
    }
}
