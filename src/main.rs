use std::sync::Arc;

use cassetteos_common::{
    config::Config, create_router, generate_jwks_document, AppState, KeyPair, TokenIssuer,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    // No key pair, no authenticated routes
    let (private_key, public_key) = KeyPair::generate()?.into_parts();
    let jwks_json = generate_jwks_document(&public_key)?;

    let state = AppState {
        issuer: TokenIssuer::new(private_key),
        resolver: Arc::new(public_key),
    };

    // Create the router
    let app = create_router(state, jwks_json);

    tracing::info!("listening on {}", config.listen_addr);
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
