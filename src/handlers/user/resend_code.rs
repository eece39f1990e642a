use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::helper::find_active_user_by_email;
use super::otp::generate_send_otp;
use crate::app::AppState;
use crate::models::{ErrorResponse, GenericResponse};
use crate::utils::{AppError, ValidatedBody};

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct ResendCodeRequest {
    #[validate(email)]
    pub email: String,
}

/// Resend verification code
///
/// Issue a fresh verification code superseding any pending one
#[utoipa::path(
    post,
    path = "/resend-code",
    request_body = ResendCodeRequest,
    responses(
        (status = 200, description = "Verification code resent", body = GenericResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 502, description = "Mail delivery failed", body = ErrorResponse)
    ),
    tag = "Auth API"
)]
pub async fn resend_code_handler(
    State(state): State<AppState>,
    ValidatedBody(body): ValidatedBody<ResendCodeRequest>,
) -> Result<Json<GenericResponse>, AppError> {
    let user = find_active_user_by_email(&state.db, &body.email).await?;
    // a resend is just a fresh issue, the overwrite makes the old code moot
    generate_send_otp(&state.db, &state.mailer, &user).await?;
    let res = GenericResponse {
        success: true,
        message: "Verification code resent successfully".to_owned(),
    };
    Ok(Json(res))
}
