use crate::domain::users::{NewUser, User, UserRepository};
use crate::infrastructure::db::DbPool;
use crate::infrastructure::db::models::users::UserDbModel;
use async_trait::async_trait;

#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: DbPool,
}

impl PostgresUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<User, anyhow::Error> {
        let user = sqlx::query_as::<_, UserDbModel>(
            r#"
            INSERT INTO users (email, user_name, role)
            VALUES ($1, $2, $3)
            RETURNING id, email, user_name, role
            "#,
        )
        .bind(new_user.email)
        .bind(new_user.user_name)
        .bind(new_user.role.as_i16())
        .fetch_one(&self.pool)
        .await?;

        user.try_into()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, anyhow::Error> {
        let user = sqlx::query_as::<_, UserDbModel>(
            r#"
            SELECT id, email, user_name, role
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        user.map(User::try_from).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, anyhow::Error> {
        let user = sqlx::query_as::<_, UserDbModel>(
            r#"
            SELECT id, email, user_name, role
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        user.map(User::try_from).transpose()
    }

    async fn delete(&self, id: i64) -> Result<bool, anyhow::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
