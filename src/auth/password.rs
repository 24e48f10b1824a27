use crate::error::AppError;
use bcrypt::{hash, verify};

pub use bcrypt::DEFAULT_COST;

/// Lowest work factor bcrypt accepts. Only sensible for tests.
pub const MIN_COST: u32 = 4;

/// bcrypt ignores everything past this many bytes of input.
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Hashes with a fresh random salt. `cost` is the bcrypt work factor (4..=31).
pub fn hash_password(password: &str, cost: u32) -> Result<String, AppError> {
    Ok(hash(password, cost)?)
}

/// Passwords longer than [`MAX_PASSWORD_BYTES`] never match, since bcrypt
/// would compare only their prefix.
pub fn verify_password(password: &str, hashed_password: &str) -> Result<bool, AppError> {
    if password.len() > MAX_PASSWORD_BYTES {
        return Ok(false);
    }
    Ok(verify(password, hashed_password)?)
}
