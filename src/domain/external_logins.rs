use anyhow::Result;
use async_trait::async_trait;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Google,
}

impl Provider {
    pub fn as_i16(self) -> i16 {
        match self {
            Provider::Google => 1,
        }
    }

    pub fn from_i16(value: i16) -> Option<Self> {
        match value {
            1 => Some(Provider::Google),
            _ => None,
        }
    }
}

/// Link between a local user and an identity at an external provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalLogin {
    pub id: i64,
    pub provider: Provider,
    pub provider_client_id: String,
    pub provider_client_token: String,
    pub user_id: i64,
}

#[derive(Debug, Clone)]
pub struct NewExternalLogin {
    pub provider: Provider,
    pub provider_client_id: String,
    pub provider_client_token: String,
    pub user_id: i64,
}

#[async_trait]
pub trait ExternalLoginRepository: Send + Sync {
    async fn create(&self, login: NewExternalLogin) -> Result<ExternalLogin>;

    async fn find_by_client_id(&self, client_id: &str) -> Result<Option<ExternalLogin>>;

    async fn find_by_user(&self, user_id: i64) -> Result<Option<ExternalLogin>>;

    /// Store the latest provider token for the user's login.
    /// Returns `None` if the user has no external login.
    async fn update_token_for_user(
        &self,
        user_id: i64,
        provider_client_token: &str,
    ) -> Result<Option<ExternalLogin>>;

    async fn delete_by_user(&self, user_id: i64) -> Result<u64>;
}
