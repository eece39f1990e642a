use mockall_double::double;
use mongodb::bson::{doc, Document};
use std::sync::Arc;

use crate::{constants::*, models::User, utils::AppError};

#[double]
use crate::database::AppDatabase;

/// check if the given email already exists in the users collection
pub async fn check_uniq_email(db: &Arc<AppDatabase>, email: &str) -> Result<(), AppError> {
    let filter = Some(doc! {"email": email});
    let result = db
        .find_one::<Document>(DB_NAME, COLL_USERS, filter, None)
        .await?;
    if result.is_some() {
        let err = format!("User already exists with same email: {}", email);
        let err = AppError::Conflict(err);
        return Err(err);
    }

    Ok(())
}

/// fetch the active user for the given email
pub async fn find_active_user_by_email(
    db: &Arc<AppDatabase>,
    email: &str,
) -> Result<User, AppError> {
    let filter = Some(doc! {"email": email, "isActive": true});
    let not_found = format!("User not found with email: {}", email);
    let not_found = AppError::NotFound(not_found);
    let user = db
        .find_one::<User>(DB_NAME, COLL_USERS, filter, None)
        .await?
        .ok_or(not_found)?;
    Ok(user)
}
