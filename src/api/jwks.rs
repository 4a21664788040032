use axum::{
    body::Bytes,
    extract::State,
    http::header,
    response::IntoResponse,
    routing::get,
    Router,
};

/// Well-known location of the public key set.
pub const JWKS_PATH: &str = "/.well-known/jwks.json";

/// Serve a pre-generated JWKS document at [`JWKS_PATH`].
///
/// The endpoint is public on purpose: it only ever exposes public keys.
pub fn jwks_router(jwks_json: Bytes) -> Router {
    Router::new()
        .route(JWKS_PATH, get(serve_jwks))
        .with_state(jwks_json)
}

async fn serve_jwks(State(jwks_json): State<Bytes>) -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/json")], jwks_json)
}
