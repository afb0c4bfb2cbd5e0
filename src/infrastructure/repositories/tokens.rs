use crate::domain::tokens::{NewToken, Token, TokenKind, TokenRepository};
use crate::infrastructure::db::DbPool;
use crate::infrastructure::db::models::tokens::TokenDbModel;
use anyhow::Result;
use async_trait::async_trait;

/// Token store backed by the `tokens` table. The `(user_id, kind)` unique
/// constraint makes a second token of the same kind for a user fail.
pub struct PostgresTokenRepository {
    pool: DbPool,
}

impl PostgresTokenRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn into_tokens(rows: Vec<TokenDbModel>) -> Result<Vec<Token>> {
    rows.into_iter().map(Token::try_from).collect()
}

#[async_trait]
impl TokenRepository for PostgresTokenRepository {
    async fn create(&self, token: NewToken) -> Result<Token> {
        let token_db = sqlx::query_as::<_, TokenDbModel>(
            r#"
            INSERT INTO tokens (value, kind, user_id)
            VALUES ($1, $2, $3)
            RETURNING id, value, kind, user_id
            "#,
        )
        .bind(&token.value)
        .bind(token.kind.as_i16())
        .bind(token.user_id)
        .fetch_one(&self.pool)
        .await?;

        token_db.try_into()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Token>> {
        let token_db = sqlx::query_as::<_, TokenDbModel>(
            "SELECT id, value, kind, user_id FROM tokens WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        token_db.map(Token::try_from).transpose()
    }

    async fn find_by_value(&self, value: &str) -> Result<Option<Token>> {
        let token_db = sqlx::query_as::<_, TokenDbModel>(
            "SELECT id, value, kind, user_id FROM tokens WHERE value = $1",
        )
        .bind(value)
        .fetch_optional(&self.pool)
        .await?;

        token_db.map(Token::try_from).transpose()
    }

    async fn find_by_user_and_kind(&self, user_id: i64, kind: TokenKind) -> Result<Option<Token>> {
        let token_db = sqlx::query_as::<_, TokenDbModel>(
            r#"
            SELECT id, value, kind, user_id
            FROM tokens
            WHERE user_id = $1 AND kind = $2
            "#,
        )
        .bind(user_id)
        .bind(kind.as_i16())
        .fetch_optional(&self.pool)
        .await?;

        token_db.map(Token::try_from).transpose()
    }

    async fn find_by_user(&self, user_id: i64) -> Result<Vec<Token>> {
        let rows = sqlx::query_as::<_, TokenDbModel>(
            r#"
            SELECT id, value, kind, user_id
            FROM tokens
            WHERE user_id = $1
            ORDER BY kind
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        into_tokens(rows)
    }

    async fn update_value(&self, id: i64, value: &str) -> Result<Option<Token>> {
        let token_db = sqlx::query_as::<_, TokenDbModel>(
            r#"
            UPDATE tokens
            SET value = $1
            WHERE id = $2
            RETURNING id, value, kind, user_id
            "#,
        )
        .bind(value)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        token_db.map(Token::try_from).transpose()
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM tokens WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_by_user(&self, user_id: i64) -> Result<u64> {
        let result = sqlx::query("DELETE FROM tokens WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
