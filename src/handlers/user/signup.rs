use axum::{extract::State, http::StatusCode, Json};
use mockall_double::double;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use utoipa::ToSchema;
use validator::Validate;

use super::helper::check_uniq_email;
use crate::app::AppState;
use crate::{
    constants::*,
    models::{ErrorResponse, GenericResponse, User},
    utils::{
        get_epoch_ts, get_seq_nxt_val, hash_password, validate_password, AppError, ValidatedBody,
    },
};

#[double]
use crate::database::AppDatabase;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct SignupRequest {
    #[validate(length(min = 1, max = 50))]
    firstname: String,

    #[validate(length(min = 1, max = 50))]
    lastname: String,

    #[validate(email)]
    email: String,

    #[validate(custom(function = "validate_password"))]
    password: String,
}

impl SignupRequest {
    async fn create_user(&self, db: &Arc<AppDatabase>) -> Result<User, AppError> {
        let id = get_seq_nxt_val(USER_ID_SEQ, db).await?;
        let password_hash = hash_password(&self.password)?;
        let mut user = User::default();
        user.id = id;
        user.firstname = self.firstname.to_owned();
        user.lastname = self.lastname.to_owned();
        user.email = self.email.to_owned();
        user.password_hash = password_hash;
        user.is_active = true;
        user.created_ts = Some(get_epoch_ts());
        Ok(user)
    }
}

/// User signup
///
/// Register a new account with a hashed password
#[utoipa::path(
    post,
    path = "/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "User registered", body = GenericResponse),
        (status = 400, description = "Invalid field or duplicate email", body = ErrorResponse)
    ),
    tag = "Auth API"
)]
pub async fn signup_handler(
    State(state): State<AppState>,
    ValidatedBody(body): ValidatedBody<SignupRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    // check if email already exists in the DB
    check_uniq_email(&state.db, body.email.as_str()).await?;
    let user = body.create_user(&state.db).await?;
    state
        .db
        .insert_one::<User>(DB_NAME, COLL_USERS, &user, None)
        .await?;
    // return successful response
    let response = (
        StatusCode::CREATED,
        Json(
            json!({"success": true, "userId": user.id, "message": "User registered successfully"}),
        ),
    );
    Ok(response)
}

#[cfg(test)]
mod tests {
    use axum::{body::Body, http::Request, routing::post, Router};
    use mongodb::bson::{doc, Document};
    use tower::ServiceExt; // for `oneshot` and `ready`

    use super::*;
    use crate::mailer::MockEmailClient;
    use crate::models::ErrorResponse;

    fn test_app(mock_db: AppDatabase) -> Router {
        let state = AppState {
            db: Arc::new(mock_db),
            mailer: Arc::new(MockEmailClient::default()),
        };
        Router::new()
            .route("/signup", post(signup_handler))
            .with_state(state)
    }

    fn signup_req(body: &str) -> Request<Body> {
        Request::builder()
            .uri("/signup")
            .method("POST")
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_owned()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_signup_handler_empty_body() {
        let app = test_app(AppDatabase::default());
        let res = app.oneshot(signup_req(r#"{}"#)).await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_signup_handler_invalid_email() {
        let app = test_app(AppDatabase::default());
        let body = r#"{"firstname": "Asha", "lastname": "Rao", "email": "not-an-email", "password": "goodpass1"}"#;
        let res = app.oneshot(signup_req(body)).await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_signup_handler_weak_password() {
        let app = test_app(AppDatabase::default());
        let body = r#"{"firstname": "Asha", "lastname": "Rao", "email": "asha@example.com", "password": "short1"}"#;
        let res = app.oneshot(signup_req(body)).await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body = hyper::body::to_bytes(res.into_body()).await.unwrap();
        let response: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(response.success, false);
        assert_eq!(response.error, "bad_request");
    }

    #[tokio::test]
    async fn test_signup_handler_duplicate_email() {
        let mut mock_db = AppDatabase::default();
        mock_db
            .expect_find_one::<Document>()
            .times(1)
            .returning(|_, _, _, _| Ok(Some(doc! {"id": 1})));
        let app = test_app(mock_db);
        let body = r#"{"firstname": "Asha", "lastname": "Rao", "email": "asha@example.com", "password": "goodpass1"}"#;
        let res = app.oneshot(signup_req(body)).await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body = hyper::body::to_bytes(res.into_body()).await.unwrap();
        let response: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(response.success, false);
        assert_eq!(response.error, "conflict");
        assert_eq!(
            response.message.contains("already exists with same email"),
            true
        );
    }

    #[tokio::test]
    async fn test_signup_handler_success() {
        let mut mock_db = AppDatabase::default();
        mock_db
            .expect_find_one::<Document>()
            .times(1)
            .returning(|_, _, _, _| Ok(None));
        mock_db
            .expect_find_one_and_update::<Document>()
            .times(1)
            .returning(|_, _, _, _, _| Ok(Some(doc! {"val": 3})));
        mock_db
            .expect_insert_one::<User>()
            .withf(|db, coll, user, _| {
                db == DB_NAME
                    && coll == COLL_USERS
                    && user.id == 3
                    && user.is_active
                    && user.otp.is_none()
                    && user.password_hash != "goodpass1"
            })
            .times(1)
            .returning(|_, _, _, _| Ok(()));
        let app = test_app(mock_db);
        let body = r#"{"firstname": "Asha", "lastname": "Rao", "email": "asha@example.com", "password": "goodpass1"}"#;
        let res = app.oneshot(signup_req(body)).await.unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);
        let body = hyper::body::to_bytes(res.into_body()).await.unwrap();
        let response: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(response["success"], true);
        assert_eq!(response["userId"], 3);
    }
}
