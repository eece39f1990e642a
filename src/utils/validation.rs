use axum::{async_trait, extract::FromRequest, http::Request, Json, RequestExt};
use validator::{Validate, ValidationError};

use super::AppError;

/// Custom validator function to check password strength:
/// at least 8 chars containing one letter and one digit
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.len() < 8 {
        let mut err = ValidationError::new("password");
        err.message = Some("Password must be at least 8 characters long".into());
        return Err(err);
    }
    if !password.chars().any(|ch| ch.is_ascii_alphabetic()) {
        let mut err = ValidationError::new("password");
        err.message = Some("Password must contain at least one letter".into());
        return Err(err);
    }
    if !password.chars().any(|ch| ch.is_ascii_digit()) {
        let mut err = ValidationError::new("password");
        err.message = Some("Password must contain at least one digit".into());
        return Err(err);
    }

    Ok(())
}

pub struct ValidatedBody<T>(pub T);

#[async_trait]
impl<S, B, T> FromRequest<S, B> for ValidatedBody<T>
where
    B: Send + 'static,
    S: Send + Sync,
    T: Validate + 'static,
    Json<T>: FromRequest<(), B>,
{
    type Rejection = AppError;

    async fn from_request(req: Request<B>, _state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = req
            .extract::<Json<T>, _>()
            .await
            .map_err(|_| AppError::BadRequestErr("Invalid JSON body".into()))?;
        data.validate()
            .map_err(|err| AppError::BadRequestErr(err.to_string()))?;
        Ok(Self(data))
    }
}
