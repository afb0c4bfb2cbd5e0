use crate::application::auth::token_pair::sign;
use crate::domain::auth::{AuthError, TokenCodec, TokenError};
use crate::domain::tokens::{TokenKind, TokenRepository};
use crate::domain::users::UserRepository;
use crate::shared::error::AppError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct RefreshTokenResponse {
    /// The new access token
    pub token: String,
}

/// Trade a stored refresh token for a new access token. The refresh token
/// itself is left untouched.
pub struct RefreshTokenUseCase {
    users: Arc<dyn UserRepository>,
    tokens: Arc<dyn TokenRepository>,
    token_codec: Arc<dyn TokenCodec>,
}

impl RefreshTokenUseCase {
    pub fn new(
        users: Arc<dyn UserRepository>,
        tokens: Arc<dyn TokenRepository>,
        token_codec: Arc<dyn TokenCodec>,
    ) -> Self {
        Self {
            users,
            tokens,
            token_codec,
        }
    }

    #[tracing::instrument(skip(self, req))]
    pub async fn execute(
        &self,
        req: RefreshTokenRequest,
    ) -> Result<RefreshTokenResponse, AppError> {
        self.token_codec
            .validate_token(&req.refresh_token)
            .map_err(|e| match e {
                TokenError::Expired => AuthError::CredentialExpired,
                _ => AuthError::CredentialInvalid,
            })?;

        let stored = self
            .tokens
            .find_by_value(&req.refresh_token)
            .await?
            .filter(|t| t.kind == TokenKind::Refresh)
            .ok_or(AuthError::CredentialRevoked)?;

        let claims = self
            .token_codec
            .get_claims(&req.refresh_token)
            .map_err(|_| AuthError::CredentialInvalid)?;

        let user = self
            .users
            .find_by_email(&claims.email)
            .await?
            .filter(|u| u.id == stored.user_id)
            .ok_or(AuthError::CredentialInvalid)?;

        let access_row = self
            .tokens
            .find_by_user_and_kind(user.id, TokenKind::Access)
            .await?
            .ok_or(AuthError::AccessTokenRowMissing)?;

        let value = sign(self.token_codec.as_ref(), &user, TokenKind::Access)?;
        let access = self
            .tokens
            .update_value(access_row.id, &value)
            .await?
            .ok_or(AuthError::AccessTokenRowMissing)?;

        tracing::debug!(user_id = user.id, "access token refreshed");

        Ok(RefreshTokenResponse {
            token: access.value,
        })
    }
}
