use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Deserialize;
use tracing::{info, instrument};

use crate::{
    error::AuthError,
    models::{
        jwt::{TokenPair, TokenType},
        result::ApiResult,
    },
    services::jwt_service,
    AppState,
};

#[derive(Deserialize)]
pub struct RefreshRequest {
    refresh_token: String,
}

/// Exchange a valid refresh token for a brand-new token pair.
#[instrument(skip_all)]
pub async fn refresh(
    State(state): State<AppState>,
    payload: Result<Json<RefreshRequest>, JsonRejection>,
) -> Result<Json<ApiResult<TokenPair>>, AuthError> {
    let Json(payload) = payload?;
    let claims = jwt_service::validate(&payload.refresh_token, state.resolver.as_ref())?;

    if claims.token_type != TokenType::Refresh {
        return Err(AuthError::WrongTokenType {
            expected: TokenType::Refresh.as_str(),
        });
    }

    let pair = state.issuer.issue_token_pair(&claims.username, claims.id)?;
    info!(id = claims.id, "Refreshed token pair");

    Ok(Json(ApiResult::ok(pair)))
}
