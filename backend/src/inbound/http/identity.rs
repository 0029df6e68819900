//! Bearer token identity extraction.
//!
//! [`Caller`] resolves the `Authorization: Bearer <token>` header into a
//! [`Principal`]. A missing, malformed, expired or forged token yields an
//! anonymous caller; the authorization gate then rejects it for any
//! operation that needs an identity.

use actix_web::dev::Payload;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, web};
use futures_util::future::{Ready, ready};
use tracing::debug;

use crate::domain::{Error, Principal};

use super::state::HttpState;

const BEARER: &str = "bearer ";

/// Identity established for the current request, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Caller(Option<Principal>);

impl Caller {
    /// A caller without identity.
    pub fn anonymous() -> Self {
        Self(None)
    }

    /// A caller authenticated as `principal`.
    pub fn authenticated(principal: Principal) -> Self {
        Self(Some(principal))
    }

    /// The authenticated principal, if a valid token was presented.
    pub fn principal(&self) -> Option<&Principal> {
        self.0.as_ref()
    }
}

fn bearer_token(req: &HttpRequest) -> Option<&str> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_at_checked(BEARER.len())?;
    scheme
        .eq_ignore_ascii_case(BEARER)
        .then_some(token.trim())
        .filter(|token| !token.is_empty())
}

fn resolve(req: &HttpRequest) -> Result<Caller, Error> {
    let Some(token) = bearer_token(req) else {
        return Ok(Caller::anonymous());
    };
    let state = req
        .app_data::<web::Data<HttpState>>()
        .ok_or_else(|| Error::internal("HTTP state is not configured"))?;
    match state.tokens.verify(token) {
        Ok(claims) => Ok(Caller::authenticated(claims.principal())),
        Err(error) => {
            debug!(%error, "ignoring invalid bearer token");
            Ok(Caller::anonymous())
        }
    }
}

impl FromRequest for Caller {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(resolve(req))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;
    use crate::inbound::http::test_utils::{TEST_TOKEN_SECRET, bearer_for, state_with_mocks};
    use actix_web::test::TestRequest;
    use rstest::rstest;

    fn request(authorization: Option<&str>) -> HttpRequest {
        let mut builder = TestRequest::default().app_data(web::Data::new(state_with_mocks()));
        if let Some(value) = authorization {
            builder = builder.insert_header((AUTHORIZATION, value));
        }
        builder.to_http_request()
    }

    #[rstest]
    #[case(Role::Admin)]
    #[case(Role::Employee)]
    fn valid_tokens_resolve_to_their_principal(#[case] role: Role) {
        let header = format!("Bearer {}", bearer_for("casey", role.clone()));

        let caller = resolve(&request(Some(&header))).expect("resolve");

        assert_eq!(caller.principal(), Some(&Principal::new("casey", role)));
    }

    #[rstest]
    fn scheme_is_case_insensitive() {
        let header = format!("bearer {}", bearer_for("casey", Role::Admin));
        let caller = resolve(&request(Some(&header))).expect("resolve");
        assert!(caller.principal().is_some());
    }

    #[rstest]
    #[case(None)]
    #[case(Some("Bearer"))]
    #[case(Some("Bearer "))]
    #[case(Some("Basic YWRtaW46cGFzc3dvcmQ="))]
    #[case(Some("Bearer not.a.token"))]
    fn anything_else_is_anonymous(#[case] header: Option<&str>) {
        let caller = resolve(&request(header)).expect("resolve");
        assert_eq!(caller, Caller::anonymous());
    }

    #[rstest]
    fn missing_state_is_internal_only_when_a_token_is_presented() {
        let bare = TestRequest::default()
            .insert_header((AUTHORIZATION, format!("Bearer {TEST_TOKEN_SECRET}")))
            .to_http_request();
        let err = resolve(&bare).expect_err("no state");
        assert_eq!(err.code(), crate::domain::ErrorCode::InternalError);

        let anonymous = TestRequest::default().to_http_request();
        assert_eq!(resolve(&anonymous).expect("resolve"), Caller::anonymous());
    }
}
