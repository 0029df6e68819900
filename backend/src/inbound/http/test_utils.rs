//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use chrono::{TimeDelta, Utc};

use crate::domain::ports::{
    MockLoginService, MockShipmentCommand, MockShipmentQuery, MockUserProfileQuery, TokenIssuer,
};
use crate::domain::{AccessClaims, Role};
use crate::outbound::security::JwtTokenIssuer;

use super::state::HttpState;

/// HMAC secret shared by test states and [`bearer_for`].
pub const TEST_TOKEN_SECRET: &str = "http-test-secret";

/// Mocked driving ports for one handler test.
///
/// Unconfigured mocks panic when called, which doubles as an assertion that
/// a rejected request never reached the service.
#[derive(Default)]
pub struct MockPorts {
    pub shipments: MockShipmentQuery,
    pub shipment_commands: MockShipmentCommand,
    pub login: MockLoginService,
    pub profile: MockUserProfileQuery,
}

impl MockPorts {
    /// Assemble handler state over these mocks.
    pub fn into_state(self) -> HttpState {
        HttpState {
            shipments: Arc::new(self.shipments),
            shipment_commands: Arc::new(self.shipment_commands),
            login: Arc::new(self.login),
            profile: Arc::new(self.profile),
            tokens: Arc::new(JwtTokenIssuer::new(TEST_TOKEN_SECRET.as_bytes())),
        }
    }
}

/// State whose ports all panic when called.
pub fn state_with_mocks() -> HttpState {
    MockPorts::default().into_state()
}

/// A valid bearer token for `username` with `role`.
pub fn bearer_for(username: &str, role: Role) -> String {
    let issued_at = Utc::now();
    let claims = AccessClaims {
        subject: username.to_owned(),
        role,
        issued_at,
        expires_at: issued_at + TimeDelta::hours(1),
    };
    JwtTokenIssuer::new(TEST_TOKEN_SECRET.as_bytes())
        .issue(&claims)
        .expect("sign test token")
        .as_str()
        .to_owned()
}
