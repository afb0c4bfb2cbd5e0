use crate::domain::auth::{IdentityVerifier, TokenCodec};
use crate::domain::diary_entries::DiaryEntryRepository;
use crate::domain::external_logins::ExternalLoginRepository;
use crate::domain::tokens::TokenRepository;
use crate::domain::users::UserRepository;
use crate::infrastructure::db::DbPool;
use crate::infrastructure::repositories::{
    diary_entries::PostgresDiaryEntryRepository, external_logins::PostgresExternalLoginRepository,
    tokens::PostgresTokenRepository, users::PostgresUserRepository,
};
use std::sync::Arc;

/// Storage handles used by the use cases and the request guard
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub tokens: Arc<dyn TokenRepository>,
    pub external_logins: Arc<dyn ExternalLoginRepository>,
    pub diary_entries: Arc<dyn DiaryEntryRepository>,
}

impl Repositories {
    pub fn postgres(pool: &DbPool) -> Self {
        Self {
            users: Arc::new(PostgresUserRepository::new(pool.clone())),
            tokens: Arc::new(PostgresTokenRepository::new(pool.clone())),
            external_logins: Arc::new(PostgresExternalLoginRepository::new(pool.clone())),
            diary_entries: Arc::new(PostgresDiaryEntryRepository::new(pool.clone())),
        }
    }
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub repositories: Repositories,
    pub token_codec: Arc<dyn TokenCodec>,
    pub identity_verifier: Arc<dyn IdentityVerifier>,
}

impl AppState {
    pub fn new(
        pool: DbPool,
        repositories: Repositories,
        token_codec: Arc<dyn TokenCodec>,
        identity_verifier: Arc<dyn IdentityVerifier>,
    ) -> Self {
        Self {
            pool,
            repositories,
            token_codec,
            identity_verifier,
        }
    }
}
