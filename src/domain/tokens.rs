use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Lifetime of an access token, in seconds.
pub const ACCESS_TOKEN_TTL_SECS: i64 = 60 * 60;
/// Lifetime of a refresh token, in seconds.
pub const REFRESH_TOKEN_TTL_SECS: i64 = 7 * 24 * 60 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Access,
    Refresh,
}

impl TokenKind {
    pub fn ttl_seconds(self) -> i64 {
        match self {
            TokenKind::Access => ACCESS_TOKEN_TTL_SECS,
            TokenKind::Refresh => REFRESH_TOKEN_TTL_SECS,
        }
    }

    pub fn as_i16(self) -> i16 {
        match self {
            TokenKind::Access => 1,
            TokenKind::Refresh => 2,
        }
    }

    pub fn from_i16(value: i16) -> Option<Self> {
        match value {
            1 => Some(TokenKind::Access),
            2 => Some(TokenKind::Refresh),
            _ => None,
        }
    }
}

/// A stored token row. There is at most one row per `(user_id, kind)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub id: i64,
    pub value: String,
    pub kind: TokenKind,
    pub user_id: i64,
}

#[derive(Debug, Clone)]
pub struct NewToken {
    pub value: String,
    pub kind: TokenKind,
    pub user_id: i64,
}

/// Server-side token store. A token whose value is absent from the store is
/// considered revoked, whatever its signature says.
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Insert a token. Fails if the user already has a token of that kind.
    async fn create(&self, token: NewToken) -> Result<Token>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Token>>;

    async fn find_by_value(&self, value: &str) -> Result<Option<Token>>;

    async fn find_by_user_and_kind(&self, user_id: i64, kind: TokenKind) -> Result<Option<Token>>;

    /// All tokens of a user, access first.
    async fn find_by_user(&self, user_id: i64) -> Result<Vec<Token>>;

    /// Replace the signed value of an existing row, keeping its id.
    /// Returns `None` when the row does not exist.
    async fn update_value(&self, id: i64, value: &str) -> Result<Option<Token>>;

    async fn delete(&self, id: i64) -> Result<bool>;

    async fn delete_by_user(&self, user_id: i64) -> Result<u64>;
}
