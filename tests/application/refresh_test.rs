use crate::common;
use crate::setup_test_db_or_skip;
use serial_test::serial;
use std::sync::Arc;
use tokenguard::application::auth::authenticate::{AuthenticateRequest, AuthenticateUseCase};
use tokenguard::application::auth::refresh::{RefreshTokenRequest, RefreshTokenUseCase};
use tokenguard::domain::auth::AuthError;
use tokenguard::domain::tokens::{TokenKind, TokenRepository};
use tokenguard::infrastructure::repositories::{
    external_logins::PostgresExternalLoginRepository, tokens::PostgresTokenRepository,
    users::PostgresUserRepository,
};
use tokenguard::shared::error::AppError;

#[tokio::test]
#[serial]
async fn test_refresh_replaces_access_token() {
    let pool = setup_test_db_or_skip!();
    common::cleanup_test_db(&pool).await;
    let users = Arc::new(PostgresUserRepository::new(pool.clone()));
    let tokens = Arc::new(PostgresTokenRepository::new(pool.clone()));
    let logins = Arc::new(PostgresExternalLoginRepository::new(pool.clone()));

    let pair = AuthenticateUseCase::new(
        users.clone(),
        tokens.clone(),
        logins,
        common::test_codec(),
        Arc::new(common::StubVerifier),
    )
    .execute(AuthenticateRequest {
        email: "dave@example.com".to_string(),
        user_name: "dave".to_string(),
        provider_id: "google-dave".to_string(),
        provider_token: common::VALID_PROVIDER_TOKEN.to_string(),
    })
    .await
    .unwrap();

    let refresh = RefreshTokenUseCase::new(users, tokens.clone(), common::test_codec());

    let response = refresh
        .execute(RefreshTokenRequest {
            refresh_token: pair.refresh.value.clone(),
        })
        .await
        .unwrap();

    let access = tokens
        .find_by_user_and_kind(pair.access.user_id, TokenKind::Access)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(access.id, pair.access.id);
    assert_eq!(access.value, response.token);
    assert_ne!(access.value, pair.access.value);

    // Refresh row is untouched
    let stored_refresh = tokens
        .find_by_user_and_kind(pair.access.user_id, TokenKind::Refresh)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored_refresh.value, pair.refresh.value);

    // Once revoked, the refresh token stops working
    tokens.delete(stored_refresh.id).await.unwrap();
    let err = refresh
        .execute(RefreshTokenRequest {
            refresh_token: pair.refresh.value,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Auth(AuthError::CredentialRevoked)));

    common::cleanup_test_db(&pool).await;
}
