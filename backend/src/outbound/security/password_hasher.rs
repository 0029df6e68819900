//! Argon2id password hashing and verification.
//!
//! Stored credentials are PHC strings (`$argon2id$v=19$...`). Verification
//! distinguishes a wrong password from a stored value that cannot be parsed
//! or carries no digest.

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{self, PasswordHash, PasswordHasher, SaltString};

use crate::domain::ports::{PasswordVerifier, PasswordVerifierError};

/// Raised when a password cannot be hashed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("password hashing failed: {message}")]
pub struct PasswordHashingError {
    message: String,
}

/// Argon2id with the crate's default parameters.
#[derive(Debug, Default, Clone)]
pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
    /// Create a hasher with default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hash `password` with a fresh random salt.
    pub fn hash(&self, password: &str) -> Result<String, PasswordHashingError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|err| PasswordHashingError {
                message: err.to_string(),
            })
    }
}

impl PasswordVerifier for Argon2PasswordHasher {
    fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordVerifierError> {
        let parsed = PasswordHash::new(hash)
            .map_err(|err| PasswordVerifierError::malformed_hash(err.to_string()))?;
        if parsed.hash.is_none() {
            return Err(PasswordVerifierError::malformed_hash(
                "stored hash has no digest",
            ));
        }
        match password_hash::PasswordVerifier::verify_password(
            &self.argon2,
            password.as_bytes(),
            &parsed,
        ) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(err) => Err(PasswordVerifierError::malformed_hash(err.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn hasher() -> Argon2PasswordHasher {
        Argon2PasswordHasher::new()
    }

    #[rstest]
    fn hashes_verify_only_the_original_password(hasher: Argon2PasswordHasher) {
        let hash = hasher.hash("password").expect("hash");

        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher.verify("password", &hash).expect("verify"));
        assert!(!hasher.verify("Password", &hash).expect("verify"));
    }

    #[rstest]
    fn salts_differ_between_hashes(hasher: Argon2PasswordHasher) {
        let first = hasher.hash("password").expect("hash");
        let second = hasher.hash("password").expect("hash");
        assert_ne!(first, second);
    }

    #[rstest]
    #[case("")]
    #[case("plaintext")]
    #[case("$argon2id$garbage")]
    #[case("$argon2id$v=19$m=bad")]
    fn unparseable_hashes_are_malformed(hasher: Argon2PasswordHasher, #[case] stored: &str) {
        let err = hasher.verify("password", stored).expect_err("malformed");
        assert!(matches!(err, PasswordVerifierError::MalformedHash { .. }));
    }
}
