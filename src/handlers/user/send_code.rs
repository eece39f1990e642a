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
pub struct SendCodeRequest {
    #[validate(email)]
    pub email: String,
}

/// Send verification code
///
/// Issue a fresh verification code for the account and mail it
#[utoipa::path(
    post,
    path = "/send-code",
    request_body = SendCodeRequest,
    responses(
        (status = 200, description = "Verification code sent", body = GenericResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 502, description = "Mail delivery failed", body = ErrorResponse)
    ),
    tag = "Auth API"
)]
pub async fn send_code_handler(
    State(state): State<AppState>,
    ValidatedBody(body): ValidatedBody<SendCodeRequest>,
) -> Result<Json<GenericResponse>, AppError> {
    let user = find_active_user_by_email(&state.db, &body.email).await?;
    generate_send_otp(&state.db, &state.mailer, &user).await?;
    let res = GenericResponse {
        success: true,
        message: "Verification code sent successfully".to_owned(),
    };
    Ok(Json(res))
}
