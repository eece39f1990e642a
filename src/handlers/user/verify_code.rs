use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::helper::find_active_user_by_email;
use super::login::update_user_login;
use super::otp::check_and_consume_otp;
use crate::app::AppState;
use crate::{
    jwt::JWT_KEYS,
    models::{ErrorResponse, LoginScheme},
    utils::{AppError, ValidatedBody},
};

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct VerifyCodeRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(equal = 4))]
    pub code: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VerifyCodeResponse {
    pub success: bool,
    pub token: String,
}

/// Verify code
///
/// Check the submitted verification code, consume it and return a
/// signed token. A code can be used at most once.
#[utoipa::path(
    post,
    path = "/verify-code",
    request_body = VerifyCodeRequest,
    responses(
        (status = 200, description = "Code verified, token issued", body = VerifyCodeResponse),
        (status = 400, description = "Code mismatch or expired", body = ErrorResponse),
        (status = 404, description = "User not found or no pending code", body = ErrorResponse)
    ),
    tag = "Auth API"
)]
pub async fn verify_code_handler(
    State(state): State<AppState>,
    ValidatedBody(body): ValidatedBody<VerifyCodeRequest>,
) -> Result<Json<VerifyCodeResponse>, AppError> {
    let user = find_active_user_by_email(&state.db, &body.email).await?;
    check_and_consume_otp(&state.db, &user, &body.code).await?;
    update_user_login(&state.db, user.id, LoginScheme::OTP_BASED).await?;
    let token = JWT_KEYS.generate_token(user.id)?;
    let res = VerifyCodeResponse {
        success: true,
        token,
    };
    Ok(Json(res))
}
