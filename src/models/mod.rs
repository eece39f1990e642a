use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub mod user;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GenericResponse {
    pub success: bool,
    pub message: String,
}

/// Error body returned by every failing endpoint: `error` is a stable
/// machine readable reason, `message` is for humans
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub message: String,
}

pub use user::*;
