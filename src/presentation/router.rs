use crate::infrastructure::config::HttpConfig;
use crate::infrastructure::state::AppState;
use crate::presentation::middleware::{cors::cors_layer, guard::authorize_request};
use crate::presentation::openapi::ApiDoc;
use crate::presentation::{handlers, routes};
use axum::{Router, middleware, routing::get};
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Full application router. Every route sits behind the request guard,
/// which lets allow-listed paths through untouched.
pub fn app(state: AppState, http: &HttpConfig) -> anyhow::Result<Router> {
    let router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(handlers::health::health_check))
        .nest("/api/v1/auth", routes::auth::routes())
        .nest("/api/v1/users", routes::users::routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            authorize_request,
        ))
        .layer(cors_layer(&http.cors_allowed_origins)?)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(router)
}
