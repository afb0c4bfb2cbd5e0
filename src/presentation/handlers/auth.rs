use crate::application::auth::authenticate::{AuthenticateRequest, AuthenticateUseCase};
use crate::application::auth::refresh::{
    RefreshTokenRequest, RefreshTokenResponse, RefreshTokenUseCase,
};
use crate::application::auth::token_pair::TokenResponse;
use crate::infrastructure::state::AppState;
use crate::shared::error::{AppError, ErrorResponse};
use crate::shared::validation::ValidatedJson;
use axum::{
    Json,
    extract::State,
    http::{HeaderValue, StatusCode, header::SET_COOKIE},
    response::IntoResponse,
};
use time::{OffsetDateTime, macros::format_description};

/// Cookie carrying the refresh token, expiring with it
fn refresh_cookie(value: &str, expires_at: i64) -> Result<HeaderValue, AppError> {
    let format = format_description!(
        "[weekday repr:short], [day] [month repr:short] [year] [hour]:[minute]:[second] GMT"
    );
    let expires = OffsetDateTime::from_unix_timestamp(expires_at)
        .map_err(|e| AppError::InternalServerError(e.into()))?
        .format(format)
        .map_err(|e| AppError::InternalServerError(e.into()))?;

    HeaderValue::from_str(&format!(
        "refreshToken={}; Expires={}; HttpOnly",
        value, expires
    ))
    .map_err(|e| AppError::InternalServerError(e.into()))
}

/// Authenticate with an external identity
#[utoipa::path(
    post,
    path = "/api/v1/auth/authenticate",
    request_body = AuthenticateRequest,
    responses(
        (status = 200, description = "Token pair issued, refresh token also set as cookie", body = TokenResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "External identity could not be verified", body = ErrorResponse),
        (status = 500, description = "Stored token pair is inconsistent", body = ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn authenticate(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<AuthenticateRequest>,
) -> Result<impl IntoResponse, AppError> {
    let repos = state.repositories.clone();
    let use_case = AuthenticateUseCase::new(
        repos.users,
        repos.tokens,
        repos.external_logins,
        state.token_codec.clone(),
        state.identity_verifier.clone(),
    );

    let pair = use_case.execute(req).await?;

    let claims = state
        .token_codec
        .get_claims(&pair.refresh.value)
        .map_err(|e| AppError::InternalServerError(e.into()))?;
    let cookie = refresh_cookie(&pair.refresh.value, claims.exp)?;

    Ok((
        StatusCode::OK,
        [(SET_COOKIE, cookie)],
        Json(TokenResponse::from(&pair)),
    ))
}

/// Exchange a refresh token for a new access token
#[utoipa::path(
    post,
    path = "/api/v1/auth/refreshToken",
    request_body = RefreshTokenRequest,
    responses(
        (status = 200, description = "New access token", body = RefreshTokenResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Refresh token expired, invalid or revoked", body = ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn refresh_token(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RefreshTokenRequest>,
) -> Result<impl IntoResponse, AppError> {
    let use_case = RefreshTokenUseCase::new(
        state.repositories.users.clone(),
        state.repositories.tokens.clone(),
        state.token_codec.clone(),
    );

    let response = use_case.execute(req).await?;

    Ok((StatusCode::OK, Json(response)))
}
