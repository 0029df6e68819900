//! Built-in demo accounts for development deployments.

use crate::domain::{Role, User, UserAccount, UserId};

use super::password_hasher::{Argon2PasswordHasher, PasswordHashingError};

/// Password shared by every fixture account.
pub const FIXTURE_PASSWORD: &str = "password";

const FIXTURES: [(&str, &str, Role); 2] = [
    ("admin", "admin@example.com", Role::Admin),
    ("employee", "employee@example.com", Role::Employee),
];

/// The `admin` and `employee` accounts, hashed with `hasher`.
pub fn fixture_accounts(
    hasher: &Argon2PasswordHasher,
) -> Result<Vec<UserAccount>, PasswordHashingError> {
    FIXTURES
        .into_iter()
        .map(|(username, email, role)| {
            let hash = hasher.hash(FIXTURE_PASSWORD)?;
            Ok(UserAccount::new(
                User::new(UserId::random(), username, email, role),
                hash,
            ))
        })
        .collect()
}
