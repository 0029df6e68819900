//! Authentication primitives: login credentials, roles, token claims and the
//! authenticated principal.
//!
//! Inbound adapters turn raw strings into these types before calling a
//! service, so services never see blank usernames or untyped role names.

use std::fmt;

use chrono::{DateTime, Utc};
use zeroize::Zeroizing;

/// Error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    /// Username was missing or blank once trimmed.
    #[error("username must not be empty")]
    EmptyUsername,
    /// Password was blank.
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Validated login credentials.
///
/// ## Invariants
/// - `username` is trimmed and non-empty.
/// - `password` is non-empty; surrounding whitespace is kept verbatim.
///
/// # Examples
/// ```
/// use tracking_backend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" admin ", "password").expect("valid");
/// assert_eq!(creds.username(), "admin");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = username.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }
        if password.trim().is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            username: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username used for the account lookup.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password supplied by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Named permission level attached to an account.
///
/// Role names other than `ADMIN` and `EMPLOYEE` are preserved as
/// [`Role::Other`] and grant no operation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Role {
    /// Full access, including deletion.
    Admin,
    /// Read and write access without deletion.
    Employee,
    /// Any other role name carried by the store.
    Other(String),
}

impl Role {
    /// Canonical role name as stored and signed into tokens.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Admin => "ADMIN",
            Self::Employee => "EMPLOYEE",
            Self::Other(name) => name.as_str(),
        }
    }
}

impl From<&str> for Role {
    fn from(value: &str) -> Self {
        match value {
            "ADMIN" => Self::Admin,
            "EMPLOYEE" => Self::Employee,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        match value.as_str() {
            "ADMIN" => Self::Admin,
            "EMPLOYEE" => Self::Employee,
            _ => Self::Other(value),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An authenticated caller as established from a verified token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    username: String,
    role: Role,
}

impl Principal {
    /// Pair a username with its role.
    pub fn new(username: impl Into<String>, role: Role) -> Self {
        Self {
            username: username.into(),
            role,
        }
    }

    /// Username the token was issued for.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Role carried by the token.
    pub fn role(&self) -> &Role {
        &self.role
    }
}

/// Claims signed into an access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessClaims {
    /// Username the token identifies.
    pub subject: String,
    /// Role granted at issue time.
    pub role: Role,
    /// Issue instant.
    pub issued_at: DateTime<Utc>,
    /// Expiry instant.
    pub expires_at: DateTime<Utc>,
}

impl AccessClaims {
    /// The principal these claims describe.
    pub fn principal(&self) -> Principal {
        Principal::new(self.subject.clone(), self.role.clone())
    }
}

/// Opaque signed bearer token.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wrap an encoded token.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Encoded token text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(..)")
    }
}

#[cfg(test)]
mod tests {
    //! Credential normalisation and role parsing.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", LoginValidationError::EmptyUsername)]
    #[case("   ", "pw", LoginValidationError::EmptyUsername)]
    #[case("user", "", LoginValidationError::EmptyPassword)]
    #[case("user", "   ", LoginValidationError::EmptyPassword)]
    fn invalid_credentials(
        #[case] username: &str,
        #[case] password: &str,
        #[case] expected: LoginValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(username, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn password_whitespace_is_preserved() {
        let creds = LoginCredentials::try_from_parts("employee", " secret ").expect("valid");
        assert_eq!(creds.password(), " secret ");
    }

    #[rstest]
    #[case("ADMIN", Role::Admin)]
    #[case("EMPLOYEE", Role::Employee)]
    #[case("admin", Role::Other("admin".to_owned()))]
    #[case("AUDITOR", Role::Other("AUDITOR".to_owned()))]
    fn parses_roles(#[case] raw: &str, #[case] expected: Role) {
        assert_eq!(Role::from(raw), expected);
        assert_eq!(Role::from(raw.to_owned()), expected);
        assert_eq!(expected.as_str(), raw);
    }

    #[rstest]
    fn access_token_debug_hides_value() {
        let token = AccessToken::new("secret.jwt.value");
        assert_eq!(format!("{token:?}"), "AccessToken(..)");
    }
}
