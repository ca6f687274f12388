//! The access control gate.
//!
//! [`authenticate`] runs in front of every protected route: a request without
//! a bearer token, or with one that fails verification, ends here with a 401
//! and no handler runs. A verified request carries its [`Identity`] in the
//! request extensions, where the [`AuthUser`] extractor picks it up.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header, request::Parts},
    middleware::Next,
    response::Response,
};

use tutorhub_auth::{Identity, TokenService};
use tutorhub_core::{AppError, DomainError};

use crate::state::AppState;

/// The bearer token from the `Authorization` header.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| unauthenticated("missing authorization header"))?;

    value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| unauthenticated("invalid authorization header format"))
}

fn unauthenticated(message: &str) -> AppError {
    DomainError::Unauthenticated(message.to_string()).into()
}

/// Resolve the caller for a set of request headers.
pub fn identify(headers: &HeaderMap, tokens: &TokenService) -> Result<Identity, AppError> {
    let token = bearer_token(headers)?;
    tokens.verify(token).map_err(|err| {
        tracing::debug!(error = %err, "rejected bearer token");
        unauthenticated(&format!("unauthorized: {err}"))
    })
}

pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let identity = identify(req.headers(), &state.tokens)?;
    req.extensions_mut().insert(identity);
    Ok(next.run(req).await)
}

/// The caller verified by [`authenticate`].
#[derive(Debug, Clone)]
pub struct AuthUser(pub Identity);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| unauthenticated("missing authentication"))
    }
}
