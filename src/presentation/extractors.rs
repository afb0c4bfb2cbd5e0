use crate::domain::auth::{AuthError, Claims};
use crate::domain::users::User;
use crate::shared::error::AppError;
use axum::{extract::FromRequestParts, http::request::Parts};

/// Caller resolved by the request guard
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user: User,
    pub claims: Claims,
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or(AppError::Auth(AuthError::MissingCredential))
    }
}
