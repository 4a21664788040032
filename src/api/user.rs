use axum::{extract::Extension, Json};

use crate::models::{jwt::Claims, result::ApiResult};

pub async fn get_current_user(Extension(claims): Extension<Claims>) -> Json<ApiResult<Claims>> {
    Json(ApiResult::ok(claims))
}
