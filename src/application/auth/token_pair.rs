use crate::domain::auth::{AuthError, TokenCodec};
use crate::domain::tokens::{NewToken, Token, TokenKind, TokenRepository};
use crate::domain::users::User;
use crate::shared::error::AppError;
use serde::Serialize;

/// The access and refresh rows of one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access: Token,
    pub refresh: Token,
}

/// Token pair as returned to clients
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
}

impl From<&TokenPair> for TokenResponse {
    fn from(pair: &TokenPair) -> Self {
        Self {
            access_token: pair.access.value.clone(),
            refresh_token: pair.refresh.value.clone(),
        }
    }
}

pub(crate) fn sign(codec: &dyn TokenCodec, user: &User, kind: TokenKind) -> Result<String, AppError> {
    codec
        .generate_token(user, kind)
        .map_err(|e| AppError::InternalServerError(e.into()))
}

/// Sign and store a fresh pair for a user that has no tokens yet
pub async fn issue_token_pair(
    user: &User,
    codec: &dyn TokenCodec,
    tokens: &dyn TokenRepository,
) -> Result<TokenPair, AppError> {
    let access_value = sign(codec, user, TokenKind::Access)?;
    let refresh_value = sign(codec, user, TokenKind::Refresh)?;

    let access = tokens
        .create(NewToken {
            value: access_value,
            kind: TokenKind::Access,
            user_id: user.id,
        })
        .await?;

    let refresh = tokens
        .create(NewToken {
            value: refresh_value,
            kind: TokenKind::Refresh,
            user_id: user.id,
        })
        .await?;

    Ok(TokenPair { access, refresh })
}

/// Re-sign both tokens of an existing pair and overwrite the stored values.
///
/// Both rows must exist before anything is written. The two updates are not
/// atomic: if the second one fails the pair is left mixed until the next
/// rotation overwrites it.
pub async fn rotate_token_pair(
    user: &User,
    codec: &dyn TokenCodec,
    tokens: &dyn TokenRepository,
) -> Result<TokenPair, AppError> {
    let existing = tokens.find_by_user(user.id).await?;
    let access_row = existing.iter().find(|t| t.kind == TokenKind::Access);
    let refresh_row = existing.iter().find(|t| t.kind == TokenKind::Refresh);

    let (Some(access_row), Some(refresh_row)) = (access_row, refresh_row) else {
        return Err(AuthError::TokenPairInconsistency.into());
    };

    let access_value = sign(codec, user, TokenKind::Access)?;
    let refresh_value = sign(codec, user, TokenKind::Refresh)?;

    let access = tokens
        .update_value(access_row.id, &access_value)
        .await?
        .ok_or(AuthError::TokenPairInconsistency)?;

    let refresh = match tokens.update_value(refresh_row.id, &refresh_value).await {
        Ok(Some(refresh)) => refresh,
        Ok(None) => {
            tracing::warn!(user_id = user.id, "refresh row vanished during rotation");
            return Err(AuthError::TokenPairInconsistency.into());
        }
        Err(e) => {
            tracing::warn!(user_id = user.id, "access token rotated but refresh update failed");
            return Err(e.into());
        }
    };

    Ok(TokenPair { access, refresh })
}
