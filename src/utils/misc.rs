use rand::{distributions::uniform::SampleUniform, thread_rng, Rng};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::constants::*;

/// Get EPOCH timestamp in seconds
pub fn get_epoch_ts() -> u64 {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(n) => n.as_secs(),
        Err(_) => panic!("SystemTime before UNIX EPOCH!"),
    }
}

/// Generate a verification code, drawn uniformly from the 4 digit range
pub fn generate_otp() -> String {
    get_random_num(OTP_MIN_VALUE, OTP_MAX_VALUE + 1).to_string()
}

/// Generate a random number in a given range
/// panics if the lower bound is greater than the higher bound
pub fn get_random_num<T>(low: T, high: T) -> T
where
    T: PartialEq + PartialOrd + SampleUniform,
{
    assert!(low < high);
    let mut rng = thread_rng();
    rng.gen_range(low..high)
}

pub fn hash_password(password: &str) -> anyhow::Result<String> {
    let hashed = bcrypt::hash(password, bcrypt::DEFAULT_COST)?;
    Ok(hashed)
}

pub fn verify_password(password: &str, hashed: &str) -> anyhow::Result<bool> {
    let valid = bcrypt::verify(password, hashed)?;
    Ok(valid)
}

#[cfg(test)]
mod tests {
    use std::{thread, time::Duration};

    use super::*;

    #[test]
    fn test_get_epoch_ts() {
        let d = Duration::from_secs(1);
        let t1 = get_epoch_ts();
        thread::sleep(d);
        let t2 = get_epoch_ts();
        assert_eq!(t1 > 0, true);
        assert_eq!(t2 > 0, true);
        assert_eq!(t1 + 1 <= t2, true);
    }

    #[test]
    fn test_generate_otp_range() {
        for _ in 0..100 {
            let otp = generate_otp();
            assert_eq!(otp.len(), 4);
            let val = otp.parse::<u32>().unwrap();
            assert_eq!(val >= OTP_MIN_VALUE, true);
            assert_eq!(val <= OTP_MAX_VALUE, true);
        }
    }

    #[test]
    fn test_generate_otp_no_leading_zero() {
        for _ in 0..100 {
            let otp = generate_otp();
            assert_ne!(otp.chars().next(), Some('0'));
        }
    }

    #[test]
    fn test_password_hash_roundtrip() {
        let hashed = hash_password("s3cret-Pass1").unwrap();
        assert_ne!(hashed, "s3cret-Pass1");
        assert_eq!(verify_password("s3cret-Pass1", &hashed).unwrap(), true);
        assert_eq!(verify_password("wrong-Pass1", &hashed).unwrap(), false);
    }

    #[test]
    fn test_verify_password_bad_hash() {
        let result = verify_password("whatever", "not-a-bcrypt-hash");
        assert_eq!(result.is_err(), true);
    }
}
