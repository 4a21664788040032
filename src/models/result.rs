use serde::{Deserialize, Serialize};

/// Result codes shared by every endpoint of the surrounding system.
pub mod codes {
    pub const SUCCESS: i32 = 200;
    pub const CLIENT_ERROR: i32 = 400;
    pub const ERROR_AUTH_TOKEN: i32 = 401;
    pub const SERVICE_ERROR: i32 = 500;

    pub fn message(code: i32) -> &'static str {
        match code {
            SUCCESS => "ok",
            CLIENT_ERROR => "params error",
            ERROR_AUTH_TOKEN => "Error auth token",
            SERVICE_ERROR => "service error",
            _ => "unknown error",
        }
    }
}

/// Generic response envelope: `{"success": <code>, "message": "...", "data": ...}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResult<T> {
    pub success: i32,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResult<T> {
    pub fn new(success: i32, message: impl Into<String>) -> Self {
        Self {
            success,
            message: message.into(),
            data: None,
        }
    }

    pub fn from_code(success: i32) -> Self {
        Self::new(success, codes::message(success))
    }

    pub fn ok(data: T) -> Self {
        Self {
            data: Some(data),
            ..Self::from_code(codes::SUCCESS)
        }
    }
}
