//! HS256 JSON Web Token adapter for the `TokenIssuer` port.
//!
//! Tokens carry the username as `sub`, the role name as `role`, and `iat` /
//! `exp` as Unix seconds. Expiry is checked without leeway.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::domain::ports::{TokenIssuer, TokenIssuerError};
use crate::domain::{AccessClaims, AccessToken, Role};

#[derive(Debug, Serialize, Deserialize)]
struct WireClaims {
    sub: String,
    role: String,
    iat: i64,
    exp: i64,
}

/// Signs and verifies tokens with a shared HMAC secret.
#[derive(Clone)]
pub struct JwtTokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl JwtTokenIssuer {
    /// Build an issuer keyed by `secret`.
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
        }
    }
}

fn timestamp(seconds: i64) -> Result<DateTime<Utc>, TokenIssuerError> {
    DateTime::from_timestamp(seconds, 0)
        .ok_or_else(|| TokenIssuerError::rejected(format!("timestamp out of range: {seconds}")))
}

impl TokenIssuer for JwtTokenIssuer {
    fn issue(&self, claims: &AccessClaims) -> Result<AccessToken, TokenIssuerError> {
        let wire = WireClaims {
            sub: claims.subject.clone(),
            role: claims.role.as_str().to_owned(),
            iat: claims.issued_at.timestamp(),
            exp: claims.expires_at.timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &wire, &self.encoding)
            .map(AccessToken::new)
            .map_err(|err| TokenIssuerError::signing(err.to_string()))
    }

    fn verify(&self, token: &str) -> Result<AccessClaims, TokenIssuerError> {
        let data = decode::<WireClaims>(token, &self.decoding, &self.validation)
            .map_err(|err| TokenIssuerError::rejected(err.to_string()))?;
        let WireClaims {
            sub,
            role,
            iat,
            exp,
        } = data.claims;
        Ok(AccessClaims {
            subject: sub,
            role: Role::from(role),
            issued_at: timestamp(iat)?,
            expires_at: timestamp(exp)?,
        })
    }
}
