use mongodb::bson::Bson;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{constants::*, utils::get_epoch_ts};

#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq)]
#[allow(non_camel_case_types)]
pub enum LoginScheme {
    #[default]
    PASSWORD_BASED,
    OTP_BASED,
}
impl LoginScheme {
    pub fn to_bson(&self) -> anyhow::Result<Bson> {
        let bson = mongodb::bson::to_bson(self)?;
        Ok(bson)
    }
}

/// Verification code pair stored on the user document.
/// `code` and `valid_till` live and die together: the whole object is
/// written on issue and replaced with null on consume, expiry or rollback.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Otp {
    pub code: String,
    pub valid_till: u64,
    pub update_ts: u64,
}

impl Otp {
    pub fn new(code: &str) -> Self {
        let ts = get_epoch_ts();
        Self {
            code: code.to_string(),
            valid_till: ts + OTP_VALIDITY_SECS,
            update_ts: ts,
        }
    }

    /// Exact string equality, no trimming or normalization
    pub fn matches(&self, submitted: &str) -> bool {
        self.code == submitted
    }

    pub fn is_expired_at(&self, ts: u64) -> bool {
        ts > self.valid_till
    }

    /// A fresh code cannot be requested before the cooldown window
    /// from the previous issue has passed
    pub fn in_cooldown_at(&self, ts: u64) -> bool {
        ts < self.update_ts + OTP_RESEND_COOLDOWN_SECS
    }

    pub fn to_bson(&self) -> anyhow::Result<Bson> {
        let bson = mongodb::bson::to_bson(self)?;
        Ok(bson)
    }
}

#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u32,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub password_hash: String,
    pub login_scheme: LoginScheme,
    pub is_active: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub otp: Option<Otp>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login_time: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_ts: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_ts: Option<u64>,
}

/// Public projection of an user returned from the login endpoint
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserData {
    pub id: u32,
    pub firstname: String,
    pub email: String,
}

impl From<&User> for UserData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            firstname: user.firstname.to_owned(),
            email: user.email.to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_otp_pair_set_together() {
        let ts = get_epoch_ts();
        let otp = Otp::new("4821");
        assert_eq!(otp.code, "4821");
        assert_eq!(otp.valid_till, otp.update_ts + OTP_VALIDITY_SECS);
        assert_eq!(otp.update_ts >= ts, true);
    }

    #[test]
    fn test_otp_matches_is_exact() {
        let otp = Otp::new("4821");
        assert_eq!(otp.matches("4821"), true);
        assert_eq!(otp.matches("4821 "), false);
        assert_eq!(otp.matches(" 4821"), false);
        assert_eq!(otp.matches("04821"), false);
        assert_eq!(otp.matches("1234"), false);
    }

    #[test]
    fn test_otp_expiry_boundary() {
        let otp = Otp::new("4821");
        // valid exactly until valid_till, expired strictly after
        assert_eq!(otp.is_expired_at(otp.update_ts + 30), false);
        assert_eq!(otp.is_expired_at(otp.valid_till), false);
        assert_eq!(otp.is_expired_at(otp.valid_till + 1), true);
    }

    #[test]
    fn test_otp_cooldown_window() {
        let otp = Otp::new("4821");
        assert_eq!(otp.in_cooldown_at(otp.update_ts), true);
        assert_eq!(
            otp.in_cooldown_at(otp.update_ts + OTP_RESEND_COOLDOWN_SECS - 1),
            true
        );
        assert_eq!(
            otp.in_cooldown_at(otp.update_ts + OTP_RESEND_COOLDOWN_SECS),
            false
        );
    }

    #[test]
    fn test_otp_bson_uses_camel_case_keys() {
        let otp = Otp::new("4821");
        let bson = otp.to_bson().unwrap();
        let doc = bson.as_document().unwrap();
        assert_eq!(doc.get_str("code").unwrap(), "4821");
        assert_eq!(doc.contains_key("validTill"), true);
        assert_eq!(doc.contains_key("updateTs"), true);
    }

    #[test]
    fn test_user_data_projection() {
        let mut user = User::default();
        user.id = 7;
        user.firstname = "Asha".to_string();
        user.lastname = "Rao".to_string();
        user.email = "asha@example.com".to_string();
        user.password_hash = "$2b$10$abcdefghijklmnopqrstuv".to_string();
        let data = UserData::from(&user);
        assert_eq!(data.id, 7);
        assert_eq!(data.firstname, "Asha");
        assert_eq!(data.email, "asha@example.com");
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json.get("passwordHash"), None);
        assert_eq!(json.get("lastname"), None);
    }
}
