use crate::application::auth::token_pair::{TokenPair, issue_token_pair, rotate_token_pair};
use crate::domain::auth::{AuthError, IdentityVerifier, TokenCodec};
use crate::domain::external_logins::{ExternalLoginRepository, NewExternalLogin, Provider};
use crate::domain::tokens::TokenRepository;
use crate::domain::users::{NewUser, User, UserRepository};
use crate::shared::error::AppError;
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticateRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "User name is required"))]
    pub user_name: String,

    #[validate(length(min = 1, message = "Provider id is required"))]
    pub provider_id: String,

    #[validate(length(min = 1, message = "Provider token is required"))]
    pub provider_token: String,
}

/// Log a user in with an external identity. New users are created on the fly,
/// known users get their token pair rotated.
pub struct AuthenticateUseCase {
    users: Arc<dyn UserRepository>,
    tokens: Arc<dyn TokenRepository>,
    external_logins: Arc<dyn ExternalLoginRepository>,
    token_codec: Arc<dyn TokenCodec>,
    identity_verifier: Arc<dyn IdentityVerifier>,
}

impl AuthenticateUseCase {
    pub fn new(
        users: Arc<dyn UserRepository>,
        tokens: Arc<dyn TokenRepository>,
        external_logins: Arc<dyn ExternalLoginRepository>,
        token_codec: Arc<dyn TokenCodec>,
        identity_verifier: Arc<dyn IdentityVerifier>,
    ) -> Self {
        Self {
            users,
            tokens,
            external_logins,
            token_codec,
            identity_verifier,
        }
    }

    #[tracing::instrument(skip(self, req), fields(email = %req.email))]
    pub async fn execute(&self, req: AuthenticateRequest) -> Result<TokenPair, AppError> {
        self.identity_verifier.verify(&req.provider_token).await?;

        match self.users.find_by_email(&req.email).await? {
            Some(user) => self.reauthenticate(user, req).await,
            None => self.register(req).await,
        }
    }

    async fn reauthenticate(
        &self,
        user: User,
        req: AuthenticateRequest,
    ) -> Result<TokenPair, AppError> {
        let updated = self
            .external_logins
            .update_token_for_user(user.id, &req.provider_token)
            .await?;

        if updated.is_none() {
            if let Some(existing) = self
                .external_logins
                .find_by_client_id(&req.provider_id)
                .await?
            {
                tracing::warn!(
                    user_id = user.id,
                    linked_user_id = existing.user_id,
                    "provider id already linked to another user"
                );
                return Err(AuthError::IdentityVerificationFailed(
                    "provider id is linked to another user".to_string(),
                )
                .into());
            }

            tracing::warn!(user_id = user.id, "user had no external login, linking it now");
            self.external_logins
                .create(NewExternalLogin {
                    provider: Provider::Google,
                    provider_client_id: req.provider_id,
                    provider_client_token: req.provider_token,
                    user_id: user.id,
                })
                .await?;
        }

        let pair = rotate_token_pair(&user, self.token_codec.as_ref(), self.tokens.as_ref()).await?;
        tracing::debug!(user_id = user.id, "token pair rotated");
        Ok(pair)
    }

    async fn register(&self, req: AuthenticateRequest) -> Result<TokenPair, AppError> {
        let user = self
            .users
            .create(NewUser::standard(req.email, req.user_name))
            .await?;

        match self
            .link_and_issue(&user, req.provider_id, req.provider_token)
            .await
        {
            Ok(pair) => {
                tracing::info!(user_id = user.id, "user registered");
                Ok(pair)
            }
            Err(err) => {
                self.compensate(&user).await;
                Err(err)
            }
        }
    }

    async fn link_and_issue(
        &self,
        user: &User,
        provider_id: String,
        provider_token: String,
    ) -> Result<TokenPair, AppError> {
        self.external_logins
            .create(NewExternalLogin {
                provider: Provider::Google,
                provider_client_id: provider_id,
                provider_client_token: provider_token,
                user_id: user.id,
            })
            .await?;

        issue_token_pair(user, self.token_codec.as_ref(), self.tokens.as_ref()).await
    }

    /// Undo a half-finished registration.
    async fn compensate(&self, user: &User) {
        let result = async {
            self.tokens.delete_by_user(user.id).await?;
            self.external_logins.delete_by_user(user.id).await?;
            self.users.delete(user.id).await
        }
        .await;

        if let Err(e) = result {
            tracing::error!(user_id = user.id, "failed to roll back registration: {:?}", e);
        }
    }
}
