use bcrypt::{DEFAULT_COST, hash, verify};

use crate::errors::AppError;

/// Hash a password with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash_password_with_cost(password, DEFAULT_COST)
}

pub fn hash_password_with_cost(password: &str, cost: u32) -> Result<String, AppError> {
    hash(password, cost)
        .map_err(|e| AppError::internal_error(format!("failed to hash password: {e}")))
}

/// Compare a candidate password against a stored bcrypt hash.
///
/// A malformed stored hash is reported as an error, not as a mismatch.
pub fn verify_password(password: &str, hashed: &str) -> Result<bool, AppError> {
    verify(password, hashed)
        .map_err(|e| AppError::internal_error(format!("failed to verify password: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashes_are_salted() {
        let a = hash_password_with_cost("secret", 4).unwrap();
        let b = hash_password_with_cost("secret", 4).unwrap();
        assert_ne!(a, b);
        assert!(verify_password("secret", &a).unwrap());
        assert!(verify_password("secret", &b).unwrap());
    }

    #[test]
    fn wrong_password_does_not_verify() {
        let hashed = hash_password_with_cost("secret", 4).unwrap();
        assert!(!verify_password("Secret", &hashed).unwrap());
    }

    #[test]
    fn malformed_hash_is_an_error() {
        assert!(verify_password("secret", "not-a-bcrypt-hash").is_err());
    }
}
