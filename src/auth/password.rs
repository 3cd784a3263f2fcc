//! Password hashing
//!
//! PBKDF2-HMAC-SHA512 with fixed parameters. Stored form is
//! `<salt hex>:<derived key hex>`.

use crate::error::{SukhanError, SukhanResult};
use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use sha2::Sha512;
use subtle::ConstantTimeEq;

const ITERATIONS: u32 = 100_000;
const SALT_LEN: usize = 16;
const KEY_LEN: usize = 64;

fn derive(password: &str, salt: &[u8]) -> [u8; KEY_LEN] {
    let mut key = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha512>(password.as_bytes(), salt, ITERATIONS, &mut key);
    key
}

/// Hash a password with a fresh random salt
pub fn hash_password(password: &str) -> SukhanResult<String> {
    if password.is_empty() {
        return Err(SukhanError::BadRequest("password must not be empty".to_string()));
    }

    let mut salt = [0u8; SALT_LEN];
    rand::thread_rng().fill_bytes(&mut salt);
    let key = derive(password, &salt);

    Ok(format!("{}:{}", hex::encode(salt), hex::encode(key)))
}

/// Check a password against a stored hash in constant time.
///
/// Malformed stored values never verify.
pub fn verify_password(password: &str, stored: &str) -> bool {
    let Some((salt_hex, key_hex)) = stored.split_once(':') else {
        return false;
    };
    let (Ok(salt), Ok(expected)) = (hex::decode(salt_hex), hex::decode(key_hex)) else {
        return false;
    };
    if salt.is_empty() || expected.len() != KEY_LEN {
        return false;
    }

    let actual = derive(password, &salt);
    actual.as_slice().ct_eq(expected.as_slice()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let stored = hash_password("bhit-shah").unwrap();
        assert!(verify_password("bhit-shah", &stored));
        assert!(!verify_password("bhit-sha", &stored));
    }

    #[test]
    fn test_stored_format() {
        let stored = hash_password("secret").unwrap();
        let (salt, key) = stored.split_once(':').unwrap();
        assert_eq!(salt.len(), SALT_LEN * 2);
        assert_eq!(key.len(), KEY_LEN * 2);
    }

    #[test]
    fn test_salts_differ() {
        let a = hash_password("same").unwrap();
        let b = hash_password("same").unwrap();
        assert_ne!(a, b);
        assert!(verify_password("same", &a));
        assert!(verify_password("same", &b));
    }

    #[test]
    fn test_empty_password_rejected() {
        let err = hash_password("").unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_malformed_stored_hash() {
        assert!(!verify_password("x", ""));
        assert!(!verify_password("x", "no-separator"));
        assert!(!verify_password("x", "zz:zz"));
        assert!(!verify_password("x", "abcd:abcd"));
        assert!(!verify_password("x", ":00"));
    }
}
