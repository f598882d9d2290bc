//! JWT token utilities for authentication and authorization.
//!
//! Access and refresh tokens are HS256 JWTs signed with two distinct secrets.
//! Nothing is persisted: a token is valid exactly when its signature checks
//! out against the matching secret and the current time is before `exp`.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::TokenConfig;
use crate::database::models::UserRole;

/// Identity facts embedded in every token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenIdentity {
    pub user_id: String,
    pub role: UserRole,
}

/// JWT Claims structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// User ID
    pub sub: String,
    /// User role
    pub role: UserRole,
    /// Token issued at timestamp
    pub iat: i64,
    /// Token expiration timestamp
    pub exp: i64,
}

impl Claims {
    pub fn user_id(&self) -> &str {
        &self.sub
    }

    pub fn identity(&self) -> TokenIdentity {
        TokenIdentity {
            user_id: self.sub.clone(),
            role: self.role,
        }
    }

    /// Check if token has expired at `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    /// Bad signature, expired, or not a token at all.
    #[error("token is invalid")]
    Invalid,
    #[error("token encoding failed: {0}")]
    Encoding(String),
}

struct SigningKey {
    encoding: EncodingKey,
    decoding: DecodingKey,
    lifetime: Duration,
}

impl SigningKey {
    fn new(secret: &str, lifetime_seconds: u64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            lifetime: Duration::seconds(lifetime_seconds as i64),
        }
    }
}

/// Mints and checks access and refresh tokens.
pub struct TokenIssuer {
    access: SigningKey,
    refresh: SigningKey,
    validation: Validation,
}

impl TokenIssuer {
    /// Builds an issuer from explicit token configuration.
    pub fn new(config: &TokenConfig) -> anyhow::Result<Self> {
        config.validate()?;

        // Expiry is compared against the caller's clock after decoding.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;

        Ok(TokenIssuer {
            access: SigningKey::new(&config.access_secret, config.access_lifetime_seconds),
            refresh: SigningKey::new(&config.refresh_secret, config.refresh_lifetime_seconds),
            validation,
        })
    }

    pub fn access_lifetime(&self) -> Duration {
        self.access.lifetime
    }

    pub fn refresh_lifetime(&self) -> Duration {
        self.refresh.lifetime
    }

    pub fn issue_access(&self, identity: &TokenIdentity) -> Result<String, TokenError> {
        self.issue_access_at(identity, Utc::now())
    }

    pub fn issue_refresh(&self, identity: &TokenIdentity) -> Result<String, TokenError> {
        self.issue_refresh_at(identity, Utc::now())
    }

    pub fn verify_access(&self, token: &str) -> Result<Claims, TokenError> {
        self.verify_access_at(token, Utc::now())
    }

    pub fn verify_refresh(&self, token: &str) -> Result<Claims, TokenError> {
        self.verify_refresh_at(token, Utc::now())
    }

    pub fn issue_access_at(
        &self,
        identity: &TokenIdentity,
        now: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        Self::sign(&self.access, identity, now)
    }

    pub fn issue_refresh_at(
        &self,
        identity: &TokenIdentity,
        now: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        Self::sign(&self.refresh, identity, now)
    }

    pub fn verify_access_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        self.check(&self.access, token, now)
    }

    pub fn verify_refresh_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        self.check(&self.refresh, token, now)
    }

    fn sign(
        key: &SigningKey,
        identity: &TokenIdentity,
        now: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let exp = now + key.lifetime;

        let claims = Claims {
            sub: identity.user_id.clone(),
            role: identity.role,
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &key.encoding)
            .map_err(|e| TokenError::Encoding(e.to_string()))
    }

    fn check(&self, key: &SigningKey, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        let claims = decode::<Claims>(token, &key.decoding, &self.validation)
            .map(|token_data| token_data.claims)
            .map_err(|_| TokenError::Invalid)?;

        if claims.is_expired_at(now) {
            return Err(TokenError::Invalid);
        }
        Ok(claims)
    }
}
