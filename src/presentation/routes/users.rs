use crate::infrastructure::state::AppState;
use crate::presentation::handlers::users;
use axum::{Router, routing::get};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(users::get_current_user))
        .route("/email/{email}", get(users::get_user_by_email))
        .route("/{id}", get(users::get_user))
}
