//! Access token issuance and verification.
//!
//! Tokens are HS256-signed JWTs. Verification only accepts the HMAC family,
//! so a token that claims an asymmetric or `none` algorithm is rejected before
//! its signature is even considered, and expiry is re-checked against the
//! clock after the library's own validation.
//!
//! # Example
//!
//! ```ignore
//! use tutorhub_auth::TokenService;
//! use tutorhub_config::JwtConfig;
//!
//! let tokens = TokenService::new(&JwtConfig::from_env());
//! let issued = tokens.issue(user.id, user.role, &user.email)?;
//! let identity = tokens.verify(&issued.token)?;
//! ```

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use thiserror::Error;

use tutorhub_config::JwtConfig;
use tutorhub_config::jwt::DEFAULT_EXPIRY_HOURS;
use tutorhub_core::{AppError, UserRole};

use crate::claims::{Claims, Identity};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("invalid token signature")]
    InvalidSignature,

    #[error("malformed token")]
    Malformed,

    #[error("token expired")]
    Expired,

    #[error("failed to sign token: {0}")]
    Signing(String),
}

impl TokenError {
    /// Verification failures are the caller's fault, signing failures are ours.
    pub fn into_app_error(self) -> AppError {
        match self {
            TokenError::Signing(_) => AppError::internal(self),
            _ => AppError::unauthorized(self),
        }
    }
}

#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Signs and verifies access tokens with one immutable secret.
///
/// Built once from [`JwtConfig`] at startup; cloning is cheap.
#[derive(Clone)]
pub struct TokenService {
    keys: Arc<Keys>,
    ttl: Duration,
}

struct Keys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("ttl_hours", &self.ttl.num_hours())
            .finish_non_exhaustive()
    }
}

impl TokenService {
    pub fn new(config: &JwtConfig) -> Self {
        Self::with_secret(config.secret.as_bytes(), config.expiry_hours)
    }

    /// A lifetime too large to represent falls back to the default one.
    pub fn with_secret(secret: &[u8], ttl_hours: i64) -> Self {
        let ttl = Duration::try_hours(ttl_hours).unwrap_or_else(|| {
            tracing::warn!(ttl_hours, "token lifetime out of range, using the default");
            Duration::hours(DEFAULT_EXPIRY_HOURS)
        });

        Self {
            keys: Arc::new(Keys {
                encoding: EncodingKey::from_secret(secret),
                decoding: DecodingKey::from_secret(secret),
            }),
            ttl,
        }
    }

    /// Issue a token with the configured lifetime.
    pub fn issue(
        &self,
        user_id: i64,
        role: UserRole,
        email: &str,
    ) -> Result<IssuedToken, TokenError> {
        self.issue_for(user_id, role, email, self.ttl)
    }

    pub fn issue_for(
        &self,
        user_id: i64,
        role: UserRole,
        email: &str,
        ttl: Duration,
    ) -> Result<IssuedToken, TokenError> {
        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(ttl)
            .ok_or_else(|| TokenError::Signing("token expiry out of range".to_string()))?;

        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            role,
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.keys.encoding)
            .map_err(|e| TokenError::Signing(e.to_string()))?;

        Ok(IssuedToken { token, expires_at })
    }

    pub fn verify(&self, token: &str) -> Result<Identity, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
        validation.leeway = 0;

        let claims = decode::<Claims>(token, &self.keys.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                    TokenError::InvalidSignature
                }
                _ => TokenError::Malformed,
            })?;

        if claims.exp <= Utc::now().timestamp() {
            return Err(TokenError::Expired);
        }

        let user_id = claims.sub.parse().map_err(|_| TokenError::Malformed)?;

        Ok(Identity {
            user_id,
            email: claims.email,
            role: claims.role,
            expires_at: claims.exp,
        })
    }
}
