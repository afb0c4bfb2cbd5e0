use crate::domain::external_logins::{ExternalLogin, Provider};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct ExternalLoginDbModel {
    pub id: i64,
    pub provider: i16,
    pub provider_client_id: String,
    pub provider_client_token: String,
    pub user_id: i64,
}

impl TryFrom<ExternalLoginDbModel> for ExternalLogin {
    type Error = anyhow::Error;

    fn try_from(model: ExternalLoginDbModel) -> Result<Self, Self::Error> {
        let provider = Provider::from_i16(model.provider).ok_or_else(|| {
            anyhow::anyhow!("Unknown provider {} for login {}", model.provider, model.id)
        })?;

        Ok(Self {
            id: model.id,
            provider,
            provider_client_id: model.provider_client_id,
            provider_client_token: model.provider_client_token,
            user_id: model.user_id,
        })
    }
}
