use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, Request},
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};

use crate::{
    error::{self, AuthError},
    models::jwt::Claims,
    services::{
        jwt_service,
        resolver::{PublicKeyResolver, SharedResolver},
    },
};

/// Outcome of running a request through the token check.
#[derive(Debug)]
pub enum AuthGate {
    /// Token verified; the request proceeds with these claims attached.
    Continue(Claims),
    /// The chain stops here and the caller gets a 401.
    Reject(AuthError),
}

impl AuthGate {
    /// Check the raw `Authorization` header value. The value is the token
    /// itself; no scheme prefix is stripped.
    pub fn evaluate(headers: &HeaderMap, resolver: &dyn PublicKeyResolver) -> Self {
        let token = match headers.get(AUTHORIZATION).map(|value| value.to_str()) {
            Some(Ok(token)) if !token.is_empty() => token,
            Some(Err(_)) => {
                return AuthGate::Reject(AuthError::MalformedToken(
                    "authorization header is not visible ASCII".to_string(),
                ))
            }
            _ => return AuthGate::Reject(AuthError::MissingToken),
        };

        match jwt_service::validate(token, resolver) {
            Ok(claims) => AuthGate::Continue(claims),
            Err(err) => AuthGate::Reject(err),
        }
    }
}

pub async fn auth_middleware(
    State(resolver): State<SharedResolver>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    match AuthGate::evaluate(request.headers(), resolver.as_ref()) {
        AuthGate::Continue(claims) => {
            debug!(id = claims.id, username = %claims.username, "Request authorized");

            // Add the claims to request extensions
            request.extensions_mut().insert(claims);
            next.run(request).await
        }
        AuthGate::Reject(err) => {
            warn!(error = %err, uri = %request.uri(), "Request rejected");
            error::unauthorized()
        }
    }
}
