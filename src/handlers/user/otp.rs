use mockall_double::double;
use mongodb::bson::doc;
use std::sync::Arc;

use crate::{
    constants::*,
    models::{Otp, User},
    utils::{generate_otp, get_epoch_ts, AppError},
};

#[double]
use crate::database::AppDatabase;

#[double]
use crate::mailer::EmailClient;

/// Issue a fresh verification code for the user and deliver it by mail.
/// Any previously pending code is overwritten. When delivery fails the
/// freshly stored pair is rolled back before the error surfaces, so no
/// valid-but-undelivered code is left behind.
pub async fn generate_send_otp(
    db: &Arc<AppDatabase>,
    mailer: &Arc<EmailClient>,
    user: &User,
) -> Result<(), AppError> {
    let ts = get_epoch_ts();
    if let Some(pending) = &user.otp {
        if pending.in_cooldown_at(ts) {
            let err = format!(
                "Please wait {} seconds before requesting a new verification code",
                OTP_RESEND_COOLDOWN_SECS
            );
            return Err(AppError::BadRequestErr(err));
        }
    }
    let code = generate_otp();
    let otp = Otp::new(&code);
    let filter = doc! {"id": user.id};
    let update = doc! {"$set": {"otp": otp.to_bson()?, "updatedTs": ts as i64}};
    let result = db
        .update_one(DB_NAME, COLL_USERS, filter, update, None)
        .await?;
    if result.matched_count == 0 {
        let err = anyhow::anyhow!("user {} not found while storing the code", user.id);
        return Err(AppError::AnyError(err));
    }
    let body = format!(
        "Your verification code is {}. It is valid for {} seconds.",
        code, OTP_VALIDITY_SECS
    );
    if let Err(err) = mailer
        .send(&user.email, "Your Verification Code", &body)
        .await
    {
        tracing::error!(
            "could not deliver verification code to user {}: {:?}",
            user.id,
            err
        );
        clear_otp_if_current(db, user.id, &code).await?;
        let err = "Not able to deliver the verification code".to_string();
        return Err(AppError::Dispatch(err));
    }
    tracing::debug!("verification code sent to user {}", user.id);
    Ok(())
}

/// Validate the submitted code against the pending pair and consume it.
/// The consume is a conditional update keyed on the exact stored code, so
/// out of N concurrent attempts only the first one can succeed.
pub async fn check_and_consume_otp(
    db: &Arc<AppDatabase>,
    user: &User,
    submitted: &str,
) -> Result<(), AppError> {
    let Some(pending) = &user.otp else {
        let err = "No verification code is pending for this account".to_string();
        return Err(AppError::NotFound(err));
    };
    if !pending.matches(submitted) {
        return Err(AppError::Mismatch("Invalid verification code".into()));
    }
    let ts = get_epoch_ts();
    if pending.is_expired_at(ts) {
        // stale pair is cleared here so the next issue starts clean
        clear_otp_if_current(db, user.id, &pending.code).await?;
        return Err(AppError::Expired("Verification code expired".into()));
    }
    let filter = doc! {"id": user.id, "otp.code": &pending.code};
    let update = doc! {"$set": {"otp": null, "updatedTs": ts as i64}};
    let result = db
        .update_one(DB_NAME, COLL_USERS, filter, update, None)
        .await?;
    if result.matched_count == 0 {
        let err = "Verification code already used".to_string();
        return Err(AppError::NotFound(err));
    }
    Ok(())
}

/// Clear the stored pair only while it still holds the given code.
/// A pair replaced by a newer issue in the meantime is left untouched.
pub async fn clear_otp_if_current(
    db: &Arc<AppDatabase>,
    user_id: u32,
    code: &str,
) -> Result<(), AppError> {
    let filter = doc! {"id": user_id, "otp.code": code};
    let update = doc! {"$set": {"otp": null}};
    db.update_one(DB_NAME, COLL_USERS, filter, update, None)
        .await?;
    Ok(())
}
