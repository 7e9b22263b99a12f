//! Password hashing
//!
//! Argon2id with per-hash random salt. Verification failure and a missing
//! hash both read as "no match" to the caller.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use rand::Rng;
use rand::distributions::Alphanumeric;

pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed = PasswordHash::new(hash)?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// Random password handed to newly created back-office accounts; the
/// recipient is expected to change it on first login.
pub fn generate_temp_password() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(12)
        .map(char::from)
        .collect()
}

/// Hex token for password-reset and newsletter-unsubscribe links.
pub fn generate_token() -> String {
    let bytes: [u8; 20] = rand::thread_rng().r#gen();
    hex::encode(bytes)
}
