use crate::infrastructure::state::AppState;
use crate::presentation::handlers::auth;
use axum::{Router, routing::post};

/// Public authentication endpoints
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/authenticate", post(auth::authenticate))
        .route("/refreshToken", post(auth::refresh_token))
}
