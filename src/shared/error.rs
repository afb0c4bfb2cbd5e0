use crate::domain::auth::AuthError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
    #[error("Internal server error: {0}")]
    InternalServerError(#[from] anyhow::Error),
}

/// Error payload returned on every failed request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = 401)]
    pub status: u16,
    #[schema(example = "token not valid")]
    pub description: String,
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::Auth(err) => match err {
                AuthError::MissingCredential
                | AuthError::CredentialExpired
                | AuthError::CredentialInvalid
                | AuthError::CredentialRevoked
                | AuthError::IdentityVerificationFailed(_) => StatusCode::UNAUTHORIZED,
                AuthError::MethodNotAllowed | AuthError::Unauthorized => StatusCode::FORBIDDEN,
                AuthError::TokenPairInconsistency | AuthError::AccessTokenRowMissing => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::DatabaseError(_) | AppError::InternalServerError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let description = match &self {
            AppError::DatabaseError(e) => {
                tracing::error!("Database error: {:?}", e);
                "Database error".to_string()
            }
            AppError::InternalServerError(e) => {
                tracing::error!("Internal server error: {:?}", e);
                "Internal server error".to_string()
            }
            AppError::Auth(e) if status.is_server_error() => {
                tracing::error!("Token store inconsistency: {}", e);
                e.to_string()
            }
            AppError::Auth(AuthError::IdentityVerificationFailed(reason)) => {
                tracing::warn!("Identity verification failed: {}", reason);
                "external identity could not be verified".to_string()
            }
            AppError::ValidationError(msg) => msg.clone(),
            other => other.to_string(),
        };

        let body = ErrorResponse {
            status: status.as_u16(),
            description,
        };

        (status, Json(body)).into_response()
    }
}
