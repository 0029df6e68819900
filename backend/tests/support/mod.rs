//! Shared wiring for the tracking API integration tests.
//!
//! Integration tests compile as separate crates under `backend/tests/`. This
//! module assembles the real services over the process-local adapters so each
//! test file can drive them through the ports or over HTTP.
#![allow(dead_code, reason = "each test crate uses a different subset")]

use std::sync::Arc;

use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use chrono::{TimeDelta, Utc};
use mockable::DefaultClock;
use serde_json::{Value, json};

use tracking_backend::Trace;
use tracking_backend::domain::ports::TokenIssuer;
use tracking_backend::domain::{AccessClaims, AuthService, Role, ShipmentService, UserAccount};
use tracking_backend::inbound::http::configure_api;
use tracking_backend::inbound::http::state::HttpState;
use tracking_backend::outbound::cache::InMemoryShipmentPageCache;
use tracking_backend::outbound::memory::{InMemoryShipmentRepository, InMemoryUserRepository};
use tracking_backend::outbound::security::{Argon2PasswordHasher, JwtTokenIssuer};

pub const TOKEN_SECRET: &[u8] = b"integration-test-secret";

/// Real services over in-memory stores, with handles on the stores for
/// assertions.
pub struct TestStack {
    pub state: HttpState,
    pub shipments: Arc<InMemoryShipmentRepository>,
    pub cache: Arc<InMemoryShipmentPageCache>,
    issuer: JwtTokenIssuer,
}

impl TestStack {
    /// A stack without any user accounts.
    pub fn new() -> Self {
        Self::with_accounts(Vec::new())
    }

    /// A stack whose user store holds `accounts`.
    pub fn with_accounts(accounts: Vec<UserAccount>) -> Self {
        let shipments = Arc::new(InMemoryShipmentRepository::new());
        let cache = Arc::new(InMemoryShipmentPageCache::new());
        let tokens = Arc::new(JwtTokenIssuer::new(TOKEN_SECRET));
        let clock = Arc::new(DefaultClock);

        let shipment_service = Arc::new(ShipmentService::new(
            shipments.clone(),
            cache.clone(),
            clock.clone(),
        ));
        let auth_service = Arc::new(AuthService::new(
            Arc::new(InMemoryUserRepository::with_accounts(accounts)),
            Arc::new(Argon2PasswordHasher::new()),
            tokens.clone(),
            clock,
        ));

        Self {
            state: HttpState {
                shipments: shipment_service.clone(),
                shipment_commands: shipment_service,
                login: auth_service.clone(),
                profile: auth_service,
                tokens,
            },
            shipments,
            cache,
            issuer: JwtTokenIssuer::new(TOKEN_SECRET),
        }
    }

    /// `Authorization` header value for `username` holding `role`.
    pub fn bearer(&self, username: &str, role: Role) -> String {
        let issued_at = Utc::now();
        let claims = AccessClaims {
            subject: username.to_owned(),
            role,
            issued_at,
            expires_at: issued_at + TimeDelta::hours(1),
        };
        let token = self.issuer.issue(&claims).expect("sign test token");
        format!("Bearer {}", token.as_str())
    }

    pub fn admin(&self) -> String {
        self.bearer("admin", Role::Admin)
    }

    pub fn employee(&self) -> String {
        self.bearer("employee", Role::Employee)
    }

    /// The application as mounted by the server binary, minus health probes.
    pub fn app(
        &self,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        > + use<>,
    > {
        App::new()
            .app_data(web::Data::new(self.state.clone()))
            .wrap(Trace)
            .service(web::scope("/api/v1").configure(configure_api))
    }
}

/// Send `request` and decode the JSON response body.
pub async fn send<S>(app: &S, request: test::TestRequest) -> (StatusCode, Value)
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let response = test::call_service(app, request.to_request()).await;
    let status = response.status();
    let bytes = test::read_body(response).await;
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

/// Minimal valid create body.
pub fn shipment_body(number: &str, shipper: &str) -> Value {
    json!({
        "shipmentNumber": number,
        "shipperName": shipper,
        "carrierName": "FastFreight",
        "pickupLocation": "NYC",
        "deliveryLocation": "LA",
    })
}
