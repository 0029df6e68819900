//! Login and current-user services.
//!
//! [`AuthService`] checks credentials against the user store, signs access
//! tokens and resolves the account behind an authenticated principal.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::TimeDelta;
use mockable::Clock;
use tracing::{error, info};

use crate::domain::ports::{
    LoginService, LoginSession, PasswordVerifier, TokenIssuer, UserProfileQuery, UserRepository,
    UserRepositoryError,
};
use crate::domain::{AccessClaims, Error, LoginCredentials, Principal, User};

/// Default access token lifetime: 24 hours.
pub const DEFAULT_TOKEN_TTL: TimeDelta = TimeDelta::seconds(86_400);

const INVALID_CREDENTIALS: &str = "invalid username or password";

fn map_user_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::Connection { message } => {
            Error::internal(format!("user repository unavailable: {message}"))
        }
        UserRepositoryError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
    }
}

/// Authentication service implementing [`LoginService`] and
/// [`UserProfileQuery`].
#[derive(Clone)]
pub struct AuthService<U> {
    users: Arc<U>,
    passwords: Arc<dyn PasswordVerifier>,
    tokens: Arc<dyn TokenIssuer>,
    clock: Arc<dyn Clock>,
    token_ttl: TimeDelta,
}

impl<U> AuthService<U> {
    /// Create a service issuing tokens valid for [`DEFAULT_TOKEN_TTL`].
    pub fn new(
        users: Arc<U>,
        passwords: Arc<dyn PasswordVerifier>,
        tokens: Arc<dyn TokenIssuer>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            users,
            passwords,
            tokens,
            clock,
            token_ttl: DEFAULT_TOKEN_TTL,
        }
    }

    /// Override the token lifetime.
    #[must_use]
    pub fn with_token_ttl(mut self, token_ttl: TimeDelta) -> Self {
        self.token_ttl = token_ttl;
        self
    }
}

#[async_trait]
impl<U> LoginService for AuthService<U>
where
    U: UserRepository,
{
    async fn login(&self, credentials: &LoginCredentials) -> Result<LoginSession, Error> {
        info!(username = credentials.username(), "login attempt");
        let account = self
            .users
            .find_by_username(credentials.username())
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::unauthorized(INVALID_CREDENTIALS))?;

        let matches = self
            .passwords
            .verify(credentials.password(), account.password_hash())
            .map_err(|err| {
                error!(username = credentials.username(), error = %err, "stored credential unusable");
                Error::internal(err.to_string())
            })?;
        if !matches {
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }

        let user = account.into_user();
        let issued_at = self.clock.utc();
        let claims = AccessClaims {
            subject: user.username().to_owned(),
            role: user.role().clone(),
            issued_at,
            expires_at: issued_at + self.token_ttl,
        };
        let token = self
            .tokens
            .issue(&claims)
            .map_err(|err| Error::internal(err.to_string()))?;

        Ok(LoginSession {
            token,
            expires_at: claims.expires_at,
            user,
        })
    }
}

#[async_trait]
impl<U> UserProfileQuery for AuthService<U>
where
    U: UserRepository,
{
    async fn me(&self, principal: &Principal) -> Result<User, Error> {
        self.users
            .find_by_username(principal.username())
            .await
            .map_err(map_user_error)?
            .map(|account| account.into_user())
            .ok_or_else(|| Error::not_found(format!("user not found: {}", principal.username())))
    }
}

#[cfg(test)]
mod tests {
    //! Credential checks, token claims and profile lookups.
    use super::*;
    use crate::domain::ports::{
        MockPasswordVerifier, MockTokenIssuer, MockUserRepository, PasswordVerifierError,
    };
    use crate::domain::{AccessToken, ErrorCode, Role, UserAccount, UserId};
    use chrono::{DateTime, Local, TimeZone, Utc};
    use rstest::rstest;

    struct FixtureClock(DateTime<Utc>);

    impl Clock for FixtureClock {
        fn local(&self) -> DateTime<Local> {
            self.0.with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            self.0
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 4, 10, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    fn account(username: &str, role: Role) -> UserAccount {
        let email = format!("{username}@example.com");
        UserAccount::new(
            User::new(UserId::random(), username, email, role),
            "$argon2id$stored",
        )
    }

    fn service(
        users: MockUserRepository,
        passwords: MockPasswordVerifier,
        tokens: MockTokenIssuer,
    ) -> AuthService<MockUserRepository> {
        AuthService::new(
            Arc::new(users),
            Arc::new(passwords),
            Arc::new(tokens),
            Arc::new(FixtureClock(now())),
        )
    }

    fn credentials(username: &str, password: &str) -> LoginCredentials {
        LoginCredentials::try_from_parts(username, password).expect("credential shape")
    }

    #[rstest]
    #[tokio::test]
    async fn login_issues_token_with_role_and_expiry() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_username()
            .withf(|username| username == "employee")
            .times(1)
            .return_once(|_| Ok(Some(account("employee", Role::Employee))));
        let mut passwords = MockPasswordVerifier::new();
        passwords
            .expect_verify()
            .withf(|password, hash| password == "password" && hash == "$argon2id$stored")
            .times(1)
            .return_once(|_, _| Ok(true));
        let mut tokens = MockTokenIssuer::new();
        tokens
            .expect_issue()
            .withf(|claims| {
                claims.subject == "employee"
                    && claims.role == Role::Employee
                    && claims.issued_at == now()
                    && claims.expires_at == now() + DEFAULT_TOKEN_TTL
            })
            .times(1)
            .return_once(|_| Ok(AccessToken::new("signed")));

        let session = service(users, passwords, tokens)
            .login(&credentials("employee", "password"))
            .await
            .expect("login succeeds");

        assert_eq!(session.token.as_str(), "signed");
        assert_eq!(session.user.username(), "employee");
        assert_eq!(session.expires_at, now() + DEFAULT_TOKEN_TTL);
    }

    #[rstest]
    #[tokio::test]
    async fn unknown_user_and_wrong_password_look_identical() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_username()
            .times(1)
            .return_once(|_| Ok(None));
        let unknown = service(users, MockPasswordVerifier::new(), MockTokenIssuer::new())
            .login(&credentials("ghost", "password"))
            .await
            .expect_err("unknown user");

        let mut users = MockUserRepository::new();
        users
            .expect_find_by_username()
            .times(1)
            .return_once(|_| Ok(Some(account("admin", Role::Admin))));
        let mut passwords = MockPasswordVerifier::new();
        passwords
            .expect_verify()
            .times(1)
            .return_once(|_, _| Ok(false));
        let mut tokens = MockTokenIssuer::new();
        tokens.expect_issue().times(0);
        let wrong = service(users, passwords, tokens)
            .login(&credentials("admin", "nope"))
            .await
            .expect_err("wrong password");

        assert_eq!(unknown.code(), ErrorCode::Unauthorized);
        assert_eq!(wrong.code(), ErrorCode::Unauthorized);
        assert_eq!(unknown.message(), wrong.message());
        assert_eq!(wrong.message(), "invalid username or password");
    }

    #[rstest]
    #[tokio::test]
    async fn malformed_stored_hash_is_internal() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_username()
            .times(1)
            .return_once(|_| Ok(Some(account("admin", Role::Admin))));
        let mut passwords = MockPasswordVerifier::new();
        passwords
            .expect_verify()
            .times(1)
            .return_once(|_, _| Err(PasswordVerifierError::malformed_hash("not phc")));

        let err = service(users, passwords, MockTokenIssuer::new())
            .login(&credentials("admin", "password"))
            .await
            .expect_err("malformed hash");
        assert_eq!(err.code(), ErrorCode::InternalError);
    }

    #[rstest]
    #[tokio::test]
    async fn custom_ttl_is_applied() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_username()
            .times(1)
            .return_once(|_| Ok(Some(account("admin", Role::Admin))));
        let mut passwords = MockPasswordVerifier::new();
        passwords.expect_verify().return_once(|_, _| Ok(true));
        let mut tokens = MockTokenIssuer::new();
        tokens
            .expect_issue()
            .withf(|claims| claims.expires_at == now() + TimeDelta::minutes(5))
            .return_once(|_| Ok(AccessToken::new("short")));

        let session = service(users, passwords, tokens)
            .with_token_ttl(TimeDelta::minutes(5))
            .login(&credentials("admin", "password"))
            .await
            .expect("login succeeds");
        assert_eq!(session.expires_at, now() + TimeDelta::minutes(5));
    }

    #[rstest]
    #[tokio::test]
    async fn me_returns_account_without_credentials() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_username()
            .times(1)
            .return_once(|_| Ok(Some(account("admin", Role::Admin))));

        let user = service(users, MockPasswordVerifier::new(), MockTokenIssuer::new())
            .me(&Principal::new("admin", Role::Admin))
            .await
            .expect("profile");
        assert_eq!(user.email(), "admin@example.com");
        assert_eq!(user.role(), &Role::Admin);
    }

    #[rstest]
    #[tokio::test]
    async fn me_for_vanished_account_is_not_found() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_username()
            .times(1)
            .return_once(|_| Ok(None));

        let err = service(users, MockPasswordVerifier::new(), MockTokenIssuer::new())
            .me(&Principal::new("gone", Role::Employee))
            .await
            .expect_err("missing account");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[rstest]
    #[tokio::test]
    async fn store_errors_are_internal() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_username()
            .times(1)
            .return_once(|_| Err(UserRepositoryError::connection("refused")));

        let err = service(users, MockPasswordVerifier::new(), MockTokenIssuer::new())
            .login(&credentials("admin", "password"))
            .await
            .expect_err("store down");
        assert_eq!(err.code(), ErrorCode::InternalError);
    }
}
