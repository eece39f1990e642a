use axum::error_handling::HandleErrorLayer;
use axum::http::StatusCode;
use axum::routing::{get, post, IntoMakeService};
use axum::{BoxError, Json, Router};
use mockall_double::double;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::constants::*;
use crate::handlers::*;
use crate::swagger::ApiDoc;

#[double]
use crate::database::AppDatabase;

#[double]
use crate::mailer::EmailClient;

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<AppDatabase>,
    pub mailer: Arc<EmailClient>,
}

pub fn build_app(db: Arc<AppDatabase>, mailer: Arc<EmailClient>) -> IntoMakeService<Router> {
    tracing::debug!("Initializing the app");
    let state = AppState { db, mailer };
    let app = Router::new()
        .route("/", get(default_route_handler))
        .route("/ping", get(ping_handler))
        .route("/signup", post(signup_handler))
        .route("/login", post(login_handler))
        .route("/send-code", post(send_code_handler))
        .route("/verify-code", post(verify_code_handler))
        .route("/resend-code", post(resend_code_handler))
        .route("/profile", get(profile_handler))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .fallback(global_404_handler)
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_middleware_error))
                .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS)),
        )
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);
    app.into_make_service()
}

async fn handle_middleware_error(err: BoxError) -> (StatusCode, Json<Value>) {
    if err.is::<tower::timeout::error::Elapsed>() {
        let msg = format!("Request timed out after {REQUEST_TIMEOUT_SECS}s");
        tracing::debug!(msg);
        let res = json!({"success": false, "error": "timeout", "message": msg});
        (StatusCode::REQUEST_TIMEOUT, Json(res))
    } else {
        let msg = format!("Unhandled internal error: {err}");
        tracing::error!(msg);
        let res = json!({"success": false, "error": "internal_error", "message": msg});
        (StatusCode::INTERNAL_SERVER_ERROR, Json(res))
    }
}
