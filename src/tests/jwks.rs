use axum::{http::StatusCode, BoxError};
use serde_json::Value;
use std::net::SocketAddr;
use tokio::net::TcpListener;

use super::helpers::{create_test_app, test_request};
use crate::{jwks_router, public_key_from_jwks, validate, PublicKey, JWKS_PATH};

#[tokio::test]
async fn test_jwks_endpoint() {
    let app = create_test_app();

    let (status, body, headers) = test_request(app.router, "GET", JWKS_PATH, None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers["content-type"], "application/json");
    assert_eq!(body.as_bytes(), app.jwks_json.as_ref());

    let jwks: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(jwks["keys"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_jwks_endpoint_is_get_only() {
    let app = create_test_app();

    let (status, _, _) = test_request(app.router, "POST", JWKS_PATH, None, None).await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

/// Issue a token, publish the key over a real socket, then verify the token
/// with the key a remote consumer would have fetched.
#[tokio::test]
async fn test_jwt_flow_over_http() {
    let app = create_test_app();
    let access_token = app.issuer.issue_access_token("testuser", 1).unwrap();
    let refresh_token = app.issuer.issue_refresh_token("testuser", 1).unwrap();

    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();
    let jwks_json = app.jwks_json.clone();
    let server = tokio::spawn(async move {
        axum::serve(listener, jwks_router(jwks_json)).await.unwrap();
    });

    let response = reqwest::get(format!("http://{addr}{JWKS_PATH}"))
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let fetched = response.bytes().await.unwrap();

    let jwks: Value = serde_json::from_slice(&fetched).unwrap();
    assert_eq!(jwks["keys"].as_array().unwrap().len(), 1);

    let consumed_key = public_key_from_jwks(&fetched).unwrap();
    assert_eq!(consumed_key, app.public_key);

    let resolver = move || -> Result<PublicKey, BoxError> { Ok(consumed_key.clone()) };

    let claims = validate(&access_token, &resolver).unwrap();
    assert_eq!(claims.username, "testuser");
    assert_eq!(claims.id, 1);

    let claims = validate(&refresh_token, &resolver).unwrap();
    assert_eq!(claims.username, "testuser");
    assert_eq!(claims.id, 1);

    server.abort();
}
