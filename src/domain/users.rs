use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    Standard,
}

impl UserRole {
    /// Storage encoding of the role column.
    pub fn as_i16(self) -> i16 {
        match self {
            UserRole::Admin => 1,
            UserRole::Standard => 2,
        }
    }

    pub fn from_i16(value: i16) -> Option<Self> {
        match value {
            1 => Some(UserRole::Admin),
            2 => Some(UserRole::Standard),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub user_name: String,
    pub role: UserRole,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub user_name: String,
    pub role: UserRole,
}

impl NewUser {
    /// Users created through an external login always start as `Standard`.
    pub fn standard(email: impl Into<String>, user_name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            user_name: user_name.into(),
            role: UserRole::Standard,
        }
    }
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, new_user: NewUser) -> Result<User, anyhow::Error>;
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, anyhow::Error>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, anyhow::Error>;
    async fn delete(&self, id: i64) -> Result<bool, anyhow::Error>;
}
