pub mod helper;
pub mod login;
pub mod otp;
pub mod profile;
pub mod resend_code;
pub mod send_code;
pub mod signup;
pub mod verify_code;
