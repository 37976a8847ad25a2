//! Access tokens.
//!
//! Tokens are HS256 JWTs carrying the principal's email (and optionally their display name), plus the registered
//! `iat` and `exp` claims. Validity is purely cryptographic and time based, so verifying a token never touches the
//! database.
use std::future::{ready, Ready};

use actix_web::{dev::Payload, FromRequest, HttpMessage, HttpRequest};
use jwt_compact::{
    alg::{Hs256, Hs256Key},
    AlgorithmExt,
    Claims,
    Header,
    TimeOptions,
    UntrustedToken,
};
use log::*;
use serde::{Deserialize, Serialize};

use crate::{
    config::AuthConfig,
    errors::{AuthError, ServerError},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtClaims {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl JwtClaims {
    pub fn new<S: Into<String>>(email: S) -> Self {
        Self { email: email.into(), name: None }
    }
}

/// Handlers behind the authentication middleware can take `JwtClaims` as an argument. The middleware stores the
/// verified claims in the request extensions; if they are missing the request is rejected as unauthenticated.
impl FromRequest for JwtClaims {
    type Error = ServerError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let claims = req.extensions().get::<JwtClaims>().cloned().ok_or_else(|| {
            warn!("🔐️ A handler asked for JWT claims, but none were attached to the request");
            ServerError::AuthenticationError(AuthError::MissingToken)
        });
        ready(claims)
    }
}

/// Issues and verifies access tokens with a single shared HMAC secret.
pub struct TokenIssuer {
    key: Hs256Key,
    lifetime: chrono::Duration,
}

impl TokenIssuer {
    pub fn new(config: &AuthConfig) -> Self {
        let key = Hs256Key::new(config.jwt_secret.reveal().as_bytes());
        // Expiry timestamps must stay representable, otherwise signing would overflow
        let lifetime = chrono::Duration::from_std(config.token_lifetime)
            .ok()
            .filter(|d| chrono::Utc::now().checked_add_signed(*d).is_some())
            .unwrap_or_else(|| {
                warn!("🪛️ Token lifetime {:?} is out of range. Falling back to one hour.", config.token_lifetime);
                chrono::Duration::hours(1)
            });
        Self { key, lifetime }
    }

    /// Signs `claims` into a token that expires after the configured lifetime.
    pub fn issue_token(&self, claims: JwtClaims) -> Result<String, ServerError> {
        let header = Header::empty().with_token_type("JWT");
        let claims = Claims::new(claims).set_duration_and_issuance(&TimeOptions::default(), self.lifetime);
        let token = Hs256
            .token(&header, &claims, &self.key)
            .map_err(|e| ServerError::CouldNotSerializeAccessToken(e.to_string()))?;
        trace!("🔐️ Issued access token for {}", claims.custom.email);
        Ok(token)
    }

    /// Checks the signature and expiry of `token` and returns the claims it carries. Malformed, badly signed and
    /// expired tokens are all reported as [`AuthError::InvalidToken`].
    pub fn verify(&self, token: &str) -> Result<JwtClaims, AuthError> {
        let untrusted = UntrustedToken::new(token).map_err(|e| AuthError::InvalidToken(e.to_string()))?;
        let token = Hs256
            .validator::<JwtClaims>(&self.key)
            .validate(&untrusted)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;
        let claims = token
            .claims()
            .validate_expiration(&TimeOptions::default())
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;
        Ok(claims.custom.clone())
    }
}
