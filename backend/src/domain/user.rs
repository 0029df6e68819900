//! User accounts.
//!
//! [`User`] is the caller-facing view and never carries the password
//! credential. [`UserAccount`] pairs it with the stored hash for the login
//! path only.

use std::fmt;

use uuid::Uuid;

use super::Role;

/// Stable user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(Uuid);

impl UserId {
    /// Wrap an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Application user without credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    username: String,
    email: String,
    role: Role,
}

impl User {
    /// Build a user view.
    pub fn new(id: UserId, username: impl Into<String>, email: impl Into<String>, role: Role) -> Self {
        Self {
            id,
            username: username.into(),
            email: email.into(),
            role,
        }
    }

    /// Stable identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Unique login name.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Unique contact address.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Permission level.
    pub fn role(&self) -> &Role {
        &self.role
    }
}

/// A stored account: the user plus its password hash (PHC string).
#[derive(Clone, PartialEq, Eq)]
pub struct UserAccount {
    user: User,
    password_hash: String,
}

impl UserAccount {
    /// Pair a user with its stored password hash.
    pub fn new(user: User, password_hash: impl Into<String>) -> Self {
        Self {
            user,
            password_hash: password_hash.into(),
        }
    }

    /// The caller-facing view.
    pub fn user(&self) -> &User {
        &self.user
    }

    /// Stored password hash.
    pub fn password_hash(&self) -> &str {
        self.password_hash.as_str()
    }

    /// Drop the credential, keeping the caller-facing view.
    pub fn into_user(self) -> User {
        self.user
    }
}

impl fmt::Debug for UserAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserAccount")
            .field("user", &self.user)
            .field("password_hash", &"<redacted>")
            .finish()
    }
}
