use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::models::ErrorResponse;

#[derive(Debug)]
pub enum AppError {
    BadRequestErr(String),
    Conflict(String),
    NotFound(String),
    Auth(String),
    Mismatch(String),
    Expired(String),
    Dispatch(String),
    AnyError(anyhow::Error),
}

impl AppError {
    /// (status, stable reason, human message)
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            Self::BadRequestErr(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.to_owned()),
            Self::Conflict(msg) => (StatusCode::BAD_REQUEST, "conflict", msg.to_owned()),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.to_owned()),
            Self::Auth(msg) => (StatusCode::UNAUTHORIZED, "unauthorized", msg.to_owned()),
            Self::Mismatch(msg) => (StatusCode::BAD_REQUEST, "code_mismatch", msg.to_owned()),
            Self::Expired(msg) => (StatusCode::BAD_REQUEST, "code_expired", msg.to_owned()),
            Self::Dispatch(msg) => (StatusCode::BAD_GATEWAY, "dispatch_failed", msg.to_owned()),
            Self::AnyError(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                format!("Something went wrong: {err}"),
            ),
        }
    }
}

impl<E: Into<anyhow::Error>> From<E> for AppError {
    fn from(err: E) -> Self {
        Self::AnyError(err.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, message) = self.parts();
        match &self {
            Self::AnyError(_) | Self::Dispatch(_) => tracing::error!("{error}: {message}"),
            _ => tracing::debug!("{error}: {message}"),
        }
        let response = ErrorResponse {
            success: false,
            error: error.to_owned(),
            message,
        };
        (status, Json(response)).into_response()
    }
}
