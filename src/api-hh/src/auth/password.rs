use bcrypt;

#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("Bcrypt operation failed: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),
}

/// Hash a plaintext password. Bcrypt salts every hash, so equal passwords
/// produce distinct stored values.
pub fn hash_password(plaintext: &str) -> Result<String, PasswordError> {
    bcrypt::hash(plaintext, bcrypt::DEFAULT_COST).map_err(PasswordError::from)
}

/// Verify a password against a bcrypt hash
/// Uses constant-time comparison to prevent timing attacks
pub fn verify_password(plaintext: &str, hash: &str) -> Result<bool, PasswordError> {
    bcrypt::verify(plaintext, hash).map_err(PasswordError::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify() {
        let hash = hash_password("test_password").unwrap();
        assert!(verify_password("test_password", &hash).unwrap());
    }

    #[test]
    fn test_verify_password_incorrect() {
        let hash = hash_password("test_password").unwrap();
        assert!(!verify_password("wrong_password", &hash).unwrap());
    }

    #[test]
    fn test_hash_is_not_plaintext() {
        let hash = hash_password("test_password").unwrap();
        assert_ne!(hash, "test_password");
        assert!(!hash.contains("test_password"));
    }

    #[test]
    fn test_hashes_are_salted() {
        let first = hash_password("test_password").unwrap();
        let second = hash_password("test_password").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_verify_password_invalid_hash() {
        let result = verify_password("test_password", "invalid_hash");
        assert!(result.is_err());
    }
}
