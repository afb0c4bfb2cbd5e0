use crate::domain::users::{User, UserRole};
use crate::infrastructure::state::AppState;
use crate::presentation::extractors::AuthUser;
use crate::shared::error::{AppError, ErrorResponse};
use crate::shared::validation::ValidatedPath;
use axum::{Json, extract::State};
use serde::Serialize;

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResource {
    pub id: i64,
    pub email: String,
    pub user_name: String,
    pub role: UserRole,
}

impl From<User> for UserResource {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            user_name: user.user_name,
            role: user.role,
        }
    }
}

/// Get a user by id
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "User found", body = UserResource),
        (status = 400, description = "Id is not a number", body = ErrorResponse),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub async fn get_user(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<i64>,
) -> Result<Json<UserResource>, AppError> {
    let user = state
        .repositories
        .users
        .find_by_id(id)
        .await?
        .ok_or(AppError::NotFound("user"))?;

    Ok(Json(user.into()))
}

/// Get a user by email
#[utoipa::path(
    get,
    path = "/api/v1/users/email/{email}",
    params(("email" = String, Path, description = "User email")),
    responses(
        (status = 200, description = "User found", body = UserResource),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub async fn get_user_by_email(
    State(state): State<AppState>,
    ValidatedPath(email): ValidatedPath<String>,
) -> Result<Json<UserResource>, AppError> {
    let user = state
        .repositories
        .users
        .find_by_email(&email)
        .await?
        .ok_or(AppError::NotFound("user"))?;

    Ok(Json(user.into()))
}

/// The user behind the bearer token
#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    responses(
        (status = 200, description = "Current user", body = UserResource),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub async fn get_current_user(auth_user: AuthUser) -> Json<UserResource> {
    Json(auth_user.user.into())
}
