//! Credential primitives: login-token generation and password hashing.
//!
//! Login tokens are opaque random strings persisted on the user row and
//! presented as bearer tokens. Passwords are hashed with Argon2id and
//! stored in PHC string format.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use rand::RngCore;

/// Generates a cryptographically secure login token with `tb_` prefix.
///
/// The token format is `tb_<43 base64url characters>`: 32 bytes of
/// cryptographically secure random data, encoded with URL-safe base64
/// without padding.
///
/// # Example
///
/// ```
/// use teambase::services::token::generate_login_token;
///
/// let token = generate_login_token();
/// assert!(token.starts_with("tb_"));
/// assert_eq!(token.len(), 46); // 3 (prefix) + 43 (base64)
/// ```
pub fn generate_login_token() -> String {
    let mut random_bytes = [0u8; 32];
    OsRng.fill_bytes(&mut random_bytes);
    let encoded = URL_SAFE_NO_PAD.encode(random_bytes);
    format!("tb_{}", encoded)
}

/// Hashes a password using Argon2id with secure defaults.
///
/// # Example
///
/// ```
/// use teambase::services::token::hash_password;
///
/// let hash = hash_password("hunter2").expect("Failed to hash password");
/// assert!(hash.starts_with("$argon2id$"));
/// ```
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2.hash_password(password.as_bytes(), &salt)?;
    Ok(password_hash.to_string())
}

/// Verifies a password against a stored hash.
///
/// Returns `true` if the password matches the hash, `false` otherwise
/// (including when the stored hash is malformed).
///
/// # Example
///
/// ```
/// use teambase::services::token::{hash_password, verify_password};
///
/// let hash = hash_password("hunter2").expect("Failed to hash password");
/// assert!(verify_password("hunter2", &hash));
/// assert!(!verify_password("wrong", &hash));
/// ```
pub fn verify_password(password: &str, hash: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_login_token_format() {
        let token = generate_login_token();
        assert!(token.starts_with("tb_"));
        assert_eq!(token.len(), 46);
        // URL-safe alphabet only after the prefix
        assert!(token[3..]
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn test_login_tokens_are_unique() {
        let tokens: HashSet<String> = (0..100).map(|_| generate_login_token()).collect();
        assert_eq!(tokens.len(), 100);
    }

    #[test]
    fn test_password_roundtrip() {
        let hash = hash_password("correct horse battery staple").expect("Failed to hash");
        assert!(verify_password("correct horse battery staple", &hash));
        assert!(!verify_password("incorrect horse", &hash));
    }

    #[test]
    fn test_verify_rejects_malformed_hash() {
        assert!(!verify_password("anything", "not-a-phc-string"));
    }

    #[test]
    fn test_hashes_are_salted() {
        let a = hash_password("same password").expect("Failed to hash");
        let b = hash_password("same password").expect("Failed to hash");
        assert_ne!(a, b);
    }
}
