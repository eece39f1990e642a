use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::jwt::JwtClaims;
use crate::models::ErrorResponse;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub success: bool,
    pub user_id: u32,
}

/// Profile
///
/// Return the account id carried by the bearer token
#[utoipa::path(
    get,
    path = "/profile",
    responses(
        (status = 200, description = "Token accepted", body = ProfileResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("api_key" = [])),
    tag = "Auth API"
)]
pub async fn profile_handler(claims: JwtClaims) -> Json<ProfileResponse> {
    let res = ProfileResponse {
        success: true,
        user_id: claims.id,
    };
    Json(res)
}
