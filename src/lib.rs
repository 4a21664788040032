//! Shared building blocks for CassetteOS services: ES256 token issuance and
//! verification, JWKS publication and an axum middleware guarding routes.

use axum::{
    body::Bytes,
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;
#[cfg(test)]
mod tests;

pub use api::jwks::{jwks_router, JWKS_PATH};
pub use error::AuthError;
pub use middleware::auth::{auth_middleware, AuthGate};
pub use models::jwt::{Claims, TokenPair, TokenType};
pub use services::jwks_service::{generate_jwks_document, public_key_from_jwks};
pub use services::jwt_service::{validate, TokenIssuer};
pub use services::key_service::{KeyPair, PrivateKey, PublicKey};
pub use services::resolver::{PublicKeyResolver, SharedResolver};

#[derive(Clone)]
pub struct AppState {
    pub issuer: TokenIssuer,
    pub resolver: SharedResolver,
}

pub fn create_router(state: AppState, jwks_json: Bytes) -> Router {
    // Create a CORS layer
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // route_layer only guards the routes registered above it
    Router::new()
        .route("/v1/users/current", get(api::user::get_current_user))
        .route_layer(from_fn_with_state(state.resolver.clone(), auth_middleware))
        .route("/v1/users/refresh", post(api::auth::refresh))
        .with_state(state)
        .merge(jwks_router(jwks_json))
        .layer(cors)
}
