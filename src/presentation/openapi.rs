use crate::application::auth::authenticate::AuthenticateRequest;
use crate::application::auth::refresh::{RefreshTokenRequest, RefreshTokenResponse};
use crate::application::auth::token_pair::TokenResponse;
use crate::domain::users::UserRole;
use crate::presentation::handlers::users::UserResource;
use crate::shared::error::ErrorResponse;
use utoipa::Modify;
use utoipa::OpenApi;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Tokenguard API",
        version = "0.1.0",
        description = "Token issuance, rotation and request authorization"
    ),
    paths(
        crate::presentation::handlers::auth::authenticate,
        crate::presentation::handlers::auth::refresh_token,
        crate::presentation::handlers::users::get_user,
        crate::presentation::handlers::users::get_user_by_email,
        crate::presentation::handlers::users::get_current_user,
    ),
    components(
        schemas(
            AuthenticateRequest,
            TokenResponse,
            RefreshTokenRequest,
            RefreshTokenResponse,
            UserResource,
            UserRole,
            ErrorResponse,
        )
    ),
    tags(
        (name = "auth", description = "Authentication endpoints"),
        (name = "users", description = "User lookup endpoints")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
