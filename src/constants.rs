pub const REQUEST_TIMEOUT_SECS: u64 = 30;
pub const MONGO_MIN_POOL_SIZE: u32 = 5;
pub const MONGO_MAX_POOL_SIZE: u32 = 10;
pub const MONGO_CONN_TIMEOUT: u64 = 10;

// verification codes are 4 digit numbers, no leading zero
pub const OTP_MIN_VALUE: u32 = 1000;
pub const OTP_MAX_VALUE: u32 = 9999;
pub const OTP_VALIDITY_SECS: u64 = 60;
pub const OTP_RESEND_COOLDOWN_SECS: u64 = 15;

pub const MAIL_SEND_TIMEOUT_SECS: u64 = 10;
pub const SMTP_DEFAULT_HOST: &str = "smtp.gmail.com";

pub const JWT_DEFAULT_EXPIRY_SECS: usize = 24 * 3600;

pub const DB_NAME: &str = "authflow";

pub const COLL_SEQUENCES: &str = "sequences";
pub const COLL_USERS: &str = "users";

pub const USER_ID_SEQ: &str = "USER_ID_SEQ";
