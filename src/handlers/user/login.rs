use axum::{extract::State, Json};
use mockall_double::double;
use mongodb::bson::doc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use validator::Validate;

use super::helper::find_active_user_by_email;
use crate::app::AppState;
use crate::{
    constants::*,
    jwt::JWT_KEYS,
    models::{ErrorResponse, LoginScheme, UserData},
    utils::{get_epoch_ts, verify_password, AppError, ValidatedBody},
};

#[double]
use crate::database::AppDatabase;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email)]
    email: String,

    #[validate(length(min = 1))]
    password: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub success: bool,
    pub token: String,
    pub user: UserData,
}

/// User login
///
/// Password based login, returns a signed token valid for one day
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid password", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    tag = "Auth API"
)]
pub async fn login_handler(
    State(state): State<AppState>,
    ValidatedBody(body): ValidatedBody<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let user = find_active_user_by_email(&state.db, &body.email).await?;
    let valid = verify_password(&body.password, &user.password_hash)?;
    if !valid {
        return Err(AppError::Auth("Invalid password".into()));
    }
    update_user_login(&state.db, user.id, LoginScheme::PASSWORD_BASED).await?;
    let token = JWT_KEYS.generate_token(user.id)?;
    let res = LoginResponse {
        success: true,
        token,
        user: UserData::from(&user),
    };
    Ok(Json(res))
}

/// Stamp the login bookkeeping fields. Both the password path and the
/// verification code path converge here.
pub async fn update_user_login(
    db: &Arc<AppDatabase>,
    user_id: u32,
    login_scheme: LoginScheme,
) -> Result<(), AppError> {
    let ts = get_epoch_ts() as i64;
    let filter = doc! {"id": user_id};
    let update =
        doc! {"$set": {"lastLoginTime": ts, "loginScheme": login_scheme.to_bson()?}};
    let result = db
        .update_one(DB_NAME, COLL_USERS, filter, update, None)
        .await?;
    if result.matched_count == 0 {
        let err = anyhow::anyhow!("Not able to update login info for user {user_id}");
        return Err(AppError::AnyError(err));
    }
    Ok(())
}
