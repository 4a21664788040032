use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

pub const ACCESS_TOKEN_LIFETIME_SECS: i64 = 3 * 60 * 60;
pub const REFRESH_TOKEN_LIFETIME_SECS: i64 = 7 * 24 * 60 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

impl TokenType {
    pub fn as_str(self) -> &'static str {
        match self {
            TokenType::Access => "access",
            TokenType::Refresh => "refresh",
        }
    }

    fn lifetime(self) -> Duration {
        match self {
            TokenType::Access => Duration::seconds(ACCESS_TOKEN_LIFETIME_SECS),
            TokenType::Refresh => Duration::seconds(REFRESH_TOKEN_LIFETIME_SECS),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub id: i64,                // user id
    pub username: String,
    pub iat: i64,               // issued at
    pub exp: i64,               // expiration time
    pub token_type: TokenType,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

impl Claims {
    pub fn new(username: &str, id: i64, token_type: TokenType) -> Self {
        let now = Utc::now();
        let expires_at = now + token_type.lifetime();

        Self {
            id,
            username: username.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            token_type,
        }
    }

    /// A token stays valid up to and including its `exp` second.
    pub fn is_expired_at(&self, now: i64) -> bool {
        now > self.exp
    }
}
