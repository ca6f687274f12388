//! Token payload and the identity it resolves to.

use serde::{Deserialize, Serialize};
use tutorhub_core::UserRole;
use utoipa::ToSchema;

/// JWT claims for access tokens.
///
/// - `sub`: user id
/// - `role`: account role at issue time
/// - `exp` / `iat`: Unix timestamps
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub role: UserRole,
    pub exp: i64,
    pub iat: i64,
}

/// The authenticated caller, produced by a successful token verification and
/// handed explicitly to every usecase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: i64,
    pub email: String,
    pub role: UserRole,
    pub expires_at: i64,
}
