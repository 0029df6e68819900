//! Authentication handlers.
//!
//! ```text
//! POST /api/v1/login {"username":"admin","password":"password"}
//! GET  /api/v1/me    Authorization: Bearer <token>
//! ```

use actix_web::{get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::ports::LoginSession;
use crate::domain::{
    Error, LoginCredentials, LoginValidationError, Operation, User, authorize,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::identity::Caller;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Login request body for `POST /api/v1/login`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(default)]
    #[schema(example = "admin")]
    pub username: String,
    #[serde(default)]
    #[schema(example = "password")]
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.password)
    }
}

/// An account as returned to clients. The credential never leaves the
/// service.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    #[schema(example = "admin")]
    pub username: String,
    #[schema(example = "admin@example.com")]
    pub email: String,
    #[schema(example = "ADMIN")]
    pub role: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id().to_string(),
            username: user.username().to_owned(),
            email: user.email().to_owned(),
            role: user.role().as_str().to_owned(),
        }
    }
}

/// Successful login payload.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Bearer token for the `Authorization` header.
    pub token: String,
    #[schema(example = "Bearer")]
    pub token_type: String,
    pub expires_at: DateTime<Utc>,
    pub user: UserResponse,
}

impl From<LoginSession> for LoginResponse {
    fn from(session: LoginSession) -> Self {
        Self {
            token: session.token.as_str().to_owned(),
            token_type: "Bearer".to_owned(),
            expires_at: session.expires_at,
            user: session.user.into(),
        }
    }
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::EmptyUsername => Error::invalid_request("username must not be empty")
            .with_details(json!({ "field": "username", "code": "empty_username" })),
        LoginValidationError::EmptyPassword => Error::invalid_request("password must not be empty")
            .with_details(json!({ "field": "password", "code": "empty_password" })),
    }
}

/// Exchange credentials for a bearer token.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = LoginResponse),
        (status = 400, description = "Blank username or password", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    caller: Caller,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<LoginResponse>> {
    authorize(Operation::Login, caller.principal())?;
    let credentials =
        LoginCredentials::try_from(payload.into_inner()).map_err(map_login_validation_error)?;
    let session = state.login.login(&credentials).await?;
    Ok(web::Json(session.into()))
}

/// The authenticated caller's account.
#[utoipa::path(
    get,
    path = "/api/v1/me",
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Account no longer exists", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "me",
    security(("BearerAuth" = []))
)]
#[get("/me")]
pub async fn me(state: web::Data<HttpState>, caller: Caller) -> ApiResult<web::Json<UserResponse>> {
    let authorized = authorize(Operation::Me, caller.principal())?;
    let principal = authorized
        .principal()
        .ok_or_else(|| Error::unauthorized("authentication required"))?;
    let user = state.profile.me(principal).await?;
    Ok(web::Json(user.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{MockLoginService, MockUserProfileQuery};
    use crate::domain::{AccessToken, Role, UserId};
    use crate::inbound::http::configure_api;
    use crate::inbound::http::test_utils::{MockPorts, bearer_for};
    use actix_web::dev::ServiceResponse;
    use actix_web::http::StatusCode;
    use actix_web::http::header::AUTHORIZATION;
    use actix_web::{App, test as actix_test};
    use chrono::TimeZone;
    use rstest::rstest;
    use serde_json::Value;

    async fn call(ports: MockPorts, request: actix_test::TestRequest) -> ServiceResponse {
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(ports.into_state()))
                .service(web::scope("/api/v1").configure(configure_api)),
        )
        .await;
        actix_test::call_service(&app, request.to_request()).await
    }

    fn admin() -> User {
        User::new(UserId::random(), "admin", "admin@example.com", Role::Admin)
    }

    #[rstest]
    #[actix_web::test]
    async fn login_returns_token_and_user_without_credential() {
        let expires_at = Utc
            .with_ymd_and_hms(2026, 6, 1, 0, 0, 0)
            .single()
            .expect("valid timestamp");
        let mut login_port = MockLoginService::new();
        login_port
            .expect_login()
            .withf(|credentials| {
                credentials.username() == "admin" && credentials.password() == "password"
            })
            .times(1)
            .return_once(move |_| {
                Ok(LoginSession {
                    token: AccessToken::new("signed.token"),
                    expires_at,
                    user: admin(),
                })
            });
        let ports = MockPorts {
            login: login_port,
            ..MockPorts::default()
        };

        let response = call(
            ports,
            actix_test::TestRequest::post()
                .uri("/api/v1/login")
                .set_json(LoginRequest {
                    username: "admin".into(),
                    password: "password".into(),
                }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["token"], "signed.token");
        assert_eq!(body["tokenType"], "Bearer");
        assert_eq!(body["user"]["role"], "ADMIN");
        assert!(body["user"].get("passwordHash").is_none());
        assert!(body["user"].get("password").is_none());
    }

    #[rstest]
    #[case("", "password", "username")]
    #[case("admin", "   ", "password")]
    #[actix_web::test]
    async fn blank_credentials_are_validation_errors(
        #[case] username: &str,
        #[case] password: &str,
        #[case] field: &str,
    ) {
        let mut login_port = MockLoginService::new();
        login_port.expect_login().times(0);
        let ports = MockPorts {
            login: login_port,
            ..MockPorts::default()
        };

        let response = call(
            ports,
            actix_test::TestRequest::post()
                .uri("/api/v1/login")
                .set_json(LoginRequest {
                    username: username.into(),
                    password: password.into(),
                }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["details"]["field"], field);
    }

    #[rstest]
    #[actix_web::test]
    async fn rejected_credentials_are_unauthorized() {
        let mut login_port = MockLoginService::new();
        login_port
            .expect_login()
            .times(1)
            .return_once(|_| Err(Error::unauthorized("invalid username or password")));
        let ports = MockPorts {
            login: login_port,
            ..MockPorts::default()
        };

        let response = call(
            ports,
            actix_test::TestRequest::post()
                .uri("/api/v1/login")
                .set_json(LoginRequest {
                    username: "ghost".into(),
                    password: "password".into(),
                }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["message"], "invalid username or password");
    }

    #[rstest]
    #[actix_web::test]
    async fn me_resolves_the_token_subject() {
        let mut profile = MockUserProfileQuery::new();
        profile
            .expect_me()
            .withf(|principal| principal.username() == "admin")
            .times(1)
            .return_once(|_| Ok(admin()));
        let ports = MockPorts {
            profile,
            ..MockPorts::default()
        };

        let response = call(
            ports,
            actix_test::TestRequest::get().uri("/api/v1/me").insert_header((
                AUTHORIZATION,
                format!("Bearer {}", bearer_for("admin", Role::Admin)),
            )),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["username"], "admin");
        assert_eq!(body["email"], "admin@example.com");
    }

    #[rstest]
    #[actix_web::test]
    async fn me_requires_a_token() {
        let mut profile = MockUserProfileQuery::new();
        profile.expect_me().times(0);
        let ports = MockPorts {
            profile,
            ..MockPorts::default()
        };

        let response = call(ports, actix_test::TestRequest::get().uri("/api/v1/me")).await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[rstest]
    #[actix_web::test]
    async fn unrecognised_roles_are_forbidden() {
        let response = call(
            MockPorts::default(),
            actix_test::TestRequest::get().uri("/api/v1/me").insert_header((
                AUTHORIZATION,
                format!(
                    "Bearer {}",
                    bearer_for("auditor", Role::Other("AUDITOR".into()))
                ),
            )),
        )
        .await;

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}
