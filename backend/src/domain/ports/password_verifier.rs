//! Port for checking passwords against stored credentials.

use super::define_port_error;

define_port_error! {
    /// Errors raised by password verification adapters.
    pub enum PasswordVerifierError {
        /// The stored credential is not in a recognised format.
        MalformedHash { message: String } => "stored password hash is malformed: {message}",
    }
}

/// Compares a candidate password with a stored hash.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordVerifier: Send + Sync {
    /// Whether `password` matches `hash`.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordVerifierError>;
}
