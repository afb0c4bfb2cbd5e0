use crate::domain::external_logins::{ExternalLogin, ExternalLoginRepository, NewExternalLogin};
use crate::infrastructure::db::DbPool;
use crate::infrastructure::db::models::external_logins::ExternalLoginDbModel;
use anyhow::Result;
use async_trait::async_trait;

pub struct PostgresExternalLoginRepository {
    pool: DbPool,
}

impl PostgresExternalLoginRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ExternalLoginRepository for PostgresExternalLoginRepository {
    async fn create(&self, login: NewExternalLogin) -> Result<ExternalLogin> {
        let login_db = sqlx::query_as::<_, ExternalLoginDbModel>(
            r#"
            INSERT INTO external_logins (provider, provider_client_id, provider_client_token, user_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, provider, provider_client_id, provider_client_token, user_id
            "#,
        )
        .bind(login.provider.as_i16())
        .bind(&login.provider_client_id)
        .bind(&login.provider_client_token)
        .bind(login.user_id)
        .fetch_one(&self.pool)
        .await?;

        login_db.try_into()
    }

    async fn find_by_client_id(&self, client_id: &str) -> Result<Option<ExternalLogin>> {
        let login_db = sqlx::query_as::<_, ExternalLoginDbModel>(
            r#"
            SELECT id, provider, provider_client_id, provider_client_token, user_id
            FROM external_logins
            WHERE provider_client_id = $1
            "#,
        )
        .bind(client_id)
        .fetch_optional(&self.pool)
        .await?;

        login_db.map(ExternalLogin::try_from).transpose()
    }

    async fn find_by_user(&self, user_id: i64) -> Result<Option<ExternalLogin>> {
        let login_db = sqlx::query_as::<_, ExternalLoginDbModel>(
            r#"
            SELECT id, provider, provider_client_id, provider_client_token, user_id
            FROM external_logins
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        login_db.map(ExternalLogin::try_from).transpose()
    }

    async fn update_token_for_user(
        &self,
        user_id: i64,
        provider_client_token: &str,
    ) -> Result<Option<ExternalLogin>> {
        let login_db = sqlx::query_as::<_, ExternalLoginDbModel>(
            r#"
            UPDATE external_logins
            SET provider_client_token = $1
            WHERE user_id = $2
            RETURNING id, provider, provider_client_id, provider_client_token, user_id
            "#,
        )
        .bind(provider_client_token)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        login_db.map(ExternalLogin::try_from).transpose()
    }

    async fn delete_by_user(&self, user_id: i64) -> Result<u64> {
        let result = sqlx::query("DELETE FROM external_logins WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
