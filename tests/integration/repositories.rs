use crate::common;

use serial_test::serial;
use tokenguard::domain::diary_entries::DiaryEntryRepository;
use tokenguard::domain::external_logins::{ExternalLoginRepository, NewExternalLogin, Provider};
use tokenguard::domain::tokens::{NewToken, TokenKind, TokenRepository};
use tokenguard::domain::users::{NewUser, UserRepository, UserRole};
use tokenguard::infrastructure::repositories::{
    diary_entries::PostgresDiaryEntryRepository, external_logins::PostgresExternalLoginRepository,
    tokens::PostgresTokenRepository, users::PostgresUserRepository,
};

fn new_token(value: &str, kind: TokenKind, user_id: i64) -> NewToken {
    NewToken {
        value: value.to_string(),
        kind,
        user_id,
    }
}

#[tokio::test]
#[serial]
async fn test_user_round_trip() {
    let pool = setup_test_db_or_skip!();
    common::cleanup_test_db(&pool).await;
    let users = PostgresUserRepository::new(pool.clone());

    let created = users
        .create(NewUser::standard("alice@example.com", "alice"))
        .await
        .unwrap();

    let by_email = users.find_by_email("alice@example.com").await.unwrap().unwrap();
    assert_eq!(by_email, created);
    assert_eq!(by_email.role, UserRole::Standard);
    assert!(users.find_by_id(created.id + 1).await.unwrap().is_none());

    assert!(users.delete(created.id).await.unwrap());
    assert!(!users.delete(created.id).await.unwrap());
}

#[tokio::test]
#[serial]
async fn test_one_token_per_user_and_kind() {
    let pool = setup_test_db_or_skip!();
    common::cleanup_test_db(&pool).await;
    let users = PostgresUserRepository::new(pool.clone());
    let tokens = PostgresTokenRepository::new(pool.clone());
    let user = users
        .create(NewUser::standard("alice@example.com", "alice"))
        .await
        .unwrap();

    tokens.create(new_token("a1", TokenKind::Access, user.id)).await.unwrap();
    tokens.create(new_token("r1", TokenKind::Refresh, user.id)).await.unwrap();

    assert!(tokens.create(new_token("a2", TokenKind::Access, user.id)).await.is_err());

    let pair = tokens.find_by_user(user.id).await.unwrap();
    assert_eq!(pair.len(), 2);
    assert_eq!(pair[0].kind, TokenKind::Access);
    assert_eq!(pair[1].kind, TokenKind::Refresh);

    common::cleanup_test_db(&pool).await;
}

#[tokio::test]
#[serial]
async fn test_token_update_keeps_row() {
    let pool = setup_test_db_or_skip!();
    common::cleanup_test_db(&pool).await;
    let users = PostgresUserRepository::new(pool.clone());
    let tokens = PostgresTokenRepository::new(pool.clone());
    let user = users
        .create(NewUser::standard("alice@example.com", "alice"))
        .await
        .unwrap();
    let token = tokens.create(new_token("old", TokenKind::Access, user.id)).await.unwrap();

    let updated = tokens.update_value(token.id, "new").await.unwrap().unwrap();

    assert_eq!(updated.id, token.id);
    assert_eq!(updated.value, "new");
    assert!(tokens.find_by_value("old").await.unwrap().is_none());
    let found = tokens
        .find_by_user_and_kind(user.id, TokenKind::Access)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.value, "new");
    assert!(tokens.update_value(token.id + 100, "x").await.unwrap().is_none());

    common::cleanup_test_db(&pool).await;
}

#[tokio::test]
#[serial]
async fn test_deleting_user_cascades() {
    let pool = setup_test_db_or_skip!();
    common::cleanup_test_db(&pool).await;
    let users = PostgresUserRepository::new(pool.clone());
    let tokens = PostgresTokenRepository::new(pool.clone());
    let logins = PostgresExternalLoginRepository::new(pool.clone());
    let user = users
        .create(NewUser::standard("alice@example.com", "alice"))
        .await
        .unwrap();
    tokens.create(new_token("a1", TokenKind::Access, user.id)).await.unwrap();
    logins
        .create(NewExternalLogin {
            provider: Provider::Google,
            provider_client_id: "google-1".to_string(),
            provider_client_token: "t".to_string(),
            user_id: user.id,
        })
        .await
        .unwrap();

    users.delete(user.id).await.unwrap();

    assert!(tokens.find_by_value("a1").await.unwrap().is_none());
    assert!(logins.find_by_client_id("google-1").await.unwrap().is_none());
}

#[tokio::test]
#[serial]
async fn test_external_login_token_update() {
    let pool = setup_test_db_or_skip!();
    common::cleanup_test_db(&pool).await;
    let users = PostgresUserRepository::new(pool.clone());
    let logins = PostgresExternalLoginRepository::new(pool.clone());
    let user = users
        .create(NewUser::standard("alice@example.com", "alice"))
        .await
        .unwrap();

    assert!(logins.update_token_for_user(user.id, "t2").await.unwrap().is_none());

    logins
        .create(NewExternalLogin {
            provider: Provider::Google,
            provider_client_id: "google-1".to_string(),
            provider_client_token: "t1".to_string(),
            user_id: user.id,
        })
        .await
        .unwrap();

    let updated = logins.update_token_for_user(user.id, "t2").await.unwrap().unwrap();
    assert_eq!(updated.provider_client_token, "t2");
    assert_eq!(updated.provider, Provider::Google);

    common::cleanup_test_db(&pool).await;
}

#[tokio::test]
#[serial]
async fn test_diary_entry_resolves_owner() {
    let pool = setup_test_db_or_skip!();
    common::cleanup_test_db(&pool).await;
    let users = PostgresUserRepository::new(pool.clone());
    let entries = PostgresDiaryEntryRepository::new(pool.clone());
    let user = users
        .create(NewUser::standard("alice@example.com", "alice"))
        .await
        .unwrap();
    let entry_id = common::insert_diary_entry(&pool, user.id, "hike").await;

    let entry = entries.find_by_id(entry_id).await.unwrap().unwrap();

    assert_eq!(entry.title, "hike");
    assert_eq!(entry.owner_id(), user.id);
    assert!(entries.find_by_id(entry_id + 1).await.unwrap().is_none());

    common::cleanup_test_db(&pool).await;
}
