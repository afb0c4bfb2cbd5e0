use crate::domain::auth::{AuthError, TokenError};
use crate::domain::tokens::TokenKind;
use crate::infrastructure::state::AppState;
use crate::presentation::extractors::AuthUser;
use crate::shared::error::AppError;
use axum::{
    extract::{Request, State},
    http::{HeaderMap, Method, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};

/// Paths reachable without a bearer token
pub const PUBLIC_PREFIXES: [&str; 4] = ["/api/v1/auth", "/swagger-ui", "/api-docs", "/health"];

/// Paths where standard users may create, replace or delete their own data
const USER_MUTABLE_PREFIXES: [&str; 2] = ["/api/v1/diaryEntries", "/api/v1/activityRegistrations"];

/// Paths whose resources belong to a single user
const OWNED_RESOURCE_PREFIXES: [&str; 3] = [
    "/api/v1/diaryEntries",
    "/api/v1/activityRegistrations/books",
    "/api/v1/activityRegistrations/games",
];

const DIARY_ENTRIES_PREFIX: &str = "/api/v1/diaryEntries";

/// Resource whose owner must match the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnershipTarget {
    /// `…/user/{id}`: the user itself
    User(i64),
    /// `/api/v1/diaryEntries/{id}`: owner of the entry's registration
    DiaryEntry(i64),
}

/// Guard applied to every route: bearer token, revocation, role gating and
/// ownership. On success the caller is made available as [`AuthUser`].
pub async fn authorize_request(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = request.uri().path().to_owned();
    if is_public(&path) {
        return Ok(next.run(request).await);
    }

    let method = request.method().clone();
    let token = bearer_token(request.headers()).map(str::to_owned);
    let auth_user = async {
        let token = token?;
        let auth_user = check_auth(&state, &method, &path, &token).await?;
        check_ownership(&state, &method, &path, &auth_user).await?;
        Ok::<_, AppError>(auth_user)
    }
    .await
    .inspect_err(|e| tracing::debug!(%method, %path, "request rejected: {}", e))?;

    request.extensions_mut().insert(auth_user);
    Ok(next.run(request).await)
}

pub fn is_public(path: &str) -> bool {
    PUBLIC_PREFIXES.iter().any(|prefix| under_prefix(path, prefix))
}

/// `path` is `prefix` itself or lies below it, segment-wise
fn under_prefix(path: &str, prefix: &str) -> bool {
    path.strip_prefix(prefix)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

fn is_mutating(method: &Method) -> bool {
    matches!(
        *method,
        Method::POST | Method::PUT | Method::PATCH | Method::DELETE
    )
}

fn is_user_mutable(path: &str) -> bool {
    USER_MUTABLE_PREFIXES
        .iter()
        .any(|prefix| under_prefix(path, prefix))
}

/// Token from an `Authorization: Bearer <token>` header
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(AuthError::MissingCredential)
}

/// Validate the token, make sure it is still stored, resolve its user and
/// apply role gating.
pub async fn check_auth(
    state: &AppState,
    method: &Method,
    path: &str,
    token: &str,
) -> Result<AuthUser, AppError> {
    state.token_codec.validate_token(token).map_err(|e| match e {
        TokenError::Expired => AuthError::CredentialExpired,
        _ => AuthError::CredentialInvalid,
    })?;

    let stored = state
        .repositories
        .tokens
        .find_by_value(token)
        .await?
        .ok_or(AuthError::CredentialRevoked)?;

    if stored.kind != TokenKind::Access {
        return Err(AuthError::CredentialInvalid.into());
    }

    let claims = state
        .token_codec
        .get_claims(token)
        .map_err(|_| AuthError::CredentialInvalid)?;

    let user = state
        .repositories
        .users
        .find_by_email(&claims.email)
        .await?
        .filter(|user| user.id == stored.user_id)
        .ok_or(AuthError::CredentialInvalid)?;

    if is_mutating(method) && !user.is_admin() && !is_user_mutable(path) {
        return Err(AuthError::MethodNotAllowed.into());
    }

    Ok(AuthUser { user, claims })
}

/// Work out which resource, if any, must be owned by the caller.
///
/// Handlers see percent-decoded path parameters while the guard sees the raw
/// path, so escapes below an owned prefix are rejected outright.
pub fn ownership_target(
    method: &Method,
    path: &str,
) -> Result<Option<OwnershipTarget>, AppError> {
    let path = path.trim_end_matches('/');
    let Some(prefix) = OWNED_RESOURCE_PREFIXES
        .iter()
        .find(|prefix| under_prefix(path, prefix))
    else {
        return Ok(None);
    };

    if path.contains('%') {
        return Err(AppError::ValidationError(
            "path parameters must not be percent-encoded".to_string(),
        ));
    }

    let Some((parent, last)) = path.rsplit_once('/') else {
        return Ok(None);
    };
    let Ok(id) = last.parse::<i64>() else {
        return Ok(None);
    };

    if *method == Method::GET && parent.ends_with("/user") {
        return Ok(Some(OwnershipTarget::User(id)));
    }

    if *prefix == DIARY_ENTRIES_PREFIX
        && parent == DIARY_ENTRIES_PREFIX
        && (*method == Method::GET || *method == Method::PUT)
    {
        return Ok(Some(OwnershipTarget::DiaryEntry(id)));
    }

    Ok(None)
}

/// Compare the owner of the targeted resource with the caller. Missing
/// resources surface as not found.
pub async fn check_ownership(
    state: &AppState,
    method: &Method,
    path: &str,
    auth_user: &AuthUser,
) -> Result<(), AppError> {
    let Some(target) = ownership_target(method, path)? else {
        return Ok(());
    };

    let owner_id = match target {
        OwnershipTarget::User(id) => id,
        OwnershipTarget::DiaryEntry(id) => state
            .repositories
            .diary_entries
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound("diary entry"))?
            .owner_id(),
    };

    let owner = state
        .repositories
        .users
        .find_by_id(owner_id)
        .await?
        .ok_or(AppError::NotFound("user"))?;

    if owner.email != auth_user.claims.email {
        return Err(AuthError::Unauthorized.into());
    }

    Ok(())
}
