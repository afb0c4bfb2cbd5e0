use crate::domain::users::{User, UserRole};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct UserDbModel {
    pub id: i64,
    pub email: String,
    pub user_name: String,
    pub role: i16,
}

impl TryFrom<UserDbModel> for User {
    type Error = anyhow::Error;

    fn try_from(model: UserDbModel) -> Result<Self, Self::Error> {
        let role = UserRole::from_i16(model.role)
            .ok_or_else(|| anyhow::anyhow!("Unknown role {} for user {}", model.role, model.id))?;

        Ok(Self {
            id: model.id,
            email: model.email,
            user_name: model.user_name,
            role,
        })
    }
}
