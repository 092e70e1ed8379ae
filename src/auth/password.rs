//! Password hashing

use crate::error::Result;

/// One-way hash a plaintext password with a randomized salt
pub fn hash_password(plaintext: &str) -> Result<String> {
    Ok(bcrypt::hash(plaintext, bcrypt::DEFAULT_COST)?)
}

/// Check a plaintext password against a stored hash.
///
/// Goes through bcrypt's own verify routine, never direct equality on hashes.
pub fn verify_password(plaintext: &str, hash: &str) -> Result<bool> {
    Ok(bcrypt::verify(plaintext, hash)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("pw1").unwrap();
        assert!(verify_password("pw1", &hash).unwrap());
    }

    #[test]
    fn test_wrong_password_fails() {
        let hash = hash_password("pw1").unwrap();
        assert!(!verify_password("pw2", &hash).unwrap());
    }

    #[test]
    fn test_plaintext_never_stored() {
        let hash = hash_password("pw1").unwrap();
        assert_ne!(hash, "pw1");
        assert!(!hash.contains("pw1"));
    }

    #[test]
    fn test_hashes_are_salted() {
        let a = hash_password("pw1").unwrap();
        let b = hash_password("pw1").unwrap();
        assert_ne!(a, b);
    }
}
