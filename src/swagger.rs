use utoipa::{
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
    Modify, OpenApi,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::ping::ping_handler,
        crate::handlers::default::default_route_handler,
        crate::handlers::user::signup::signup_handler,
        crate::handlers::user::login::login_handler,
        crate::handlers::user::send_code::send_code_handler,
        crate::handlers::user::verify_code::verify_code_handler,
        crate::handlers::user::resend_code::resend_code_handler,
        crate::handlers::user::profile::profile_handler,
    ),
    components(
        schemas(
            crate::handlers::user::signup::SignupRequest,
            crate::handlers::user::login::LoginRequest,
            crate::handlers::user::send_code::SendCodeRequest,
            crate::handlers::user::verify_code::VerifyCodeRequest,
            crate::handlers::user::resend_code::ResendCodeRequest,

            crate::handlers::user::login::LoginResponse,
            crate::handlers::user::verify_code::VerifyCodeResponse,
            crate::handlers::user::profile::ProfileResponse,

            crate::models::GenericResponse,
            crate::models::ErrorResponse,
            crate::models::UserData,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth API", description = "Account signup, login and email verification endpoints"),
        (name = "Debugging API", description = "Server liveness endpoints")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "api_key",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new("Authorization"))),
            );
        }
    }
}
