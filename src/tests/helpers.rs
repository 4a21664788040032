use axum::{
    body::{Body, Bytes},
    http::{HeaderMap, Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::sync::{Arc, Once};
use tower::ServiceExt;
use tracing::{info, Level};
use tracing_subscriber::fmt::format::FmtSpan;

use crate::{
    create_router, generate_jwks_document, AppState, KeyPair, PublicKey, TokenIssuer,
};

static INIT: Once = Once::new();

/// Initialize logging exactly once
pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_test_writer()
            .with_target(false)
            .with_thread_ids(true)
            .with_level(true)
            .with_file(true)
            .with_line_number(true)
            .with_thread_names(true)
            .with_max_level(Level::ERROR)
            .with_span_events(FmtSpan::NONE)
            .init();
    });
}

pub struct TestApp {
    pub router: Router,
    pub issuer: TokenIssuer,
    pub public_key: PublicKey,
    pub jwks_json: Bytes,
}

pub fn create_test_app() -> TestApp {
    init_tracing();
    info!("Creating test application");

    let (private_key, public_key) = KeyPair::generate()
        .expect("Failed to generate test key pair")
        .into_parts();
    let jwks_json = generate_jwks_document(&public_key).expect("Failed to build JWKS");
    let issuer = TokenIssuer::new(private_key);

    let state = AppState {
        issuer: issuer.clone(),
        resolver: Arc::new(public_key.clone()),
    };
    let router = create_router(state, jwks_json.clone());

    info!("Test application created");
    TestApp {
        router,
        issuer,
        public_key,
        jwks_json,
    }
}

pub fn auth_header(token: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert("authorization", token.parse().unwrap());
    headers
}

pub async fn test_request(
    app: Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
    headers: Option<HeaderMap>,
) -> (StatusCode, String, HeaderMap) {
    info!(method = %method, uri = %uri, "Making test request");

    let body = if let Some(json) = body {
        info!(body = %json, "Request body");
        Body::from(serde_json::to_string(&json).unwrap())
    } else {
        Body::empty()
    };

    let mut request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");

    // Add custom headers if provided
    if let Some(custom_headers) = headers {
        for (key, value) in custom_headers.iter() {
            request = request.header(key, value);
        }
    }

    let request = request.body(body).unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = String::from_utf8(
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec(),
    )
    .unwrap();

    info!(status = %status, body = %body, "Test response received");
    (status, body, headers)
}
