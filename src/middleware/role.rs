//! Role checks used by the usecases.

use tutorhub_auth::Identity;
use tutorhub_core::{DomainError, UserRole};

/// Fails with `Forbidden` unless the caller holds one of `allowed`.
pub fn require_role(caller: &Identity, allowed: &[UserRole]) -> Result<(), DomainError> {
    if allowed.contains(&caller.role) {
        return Ok(());
    }

    let names: Vec<&str> = allowed.iter().map(UserRole::as_str).collect();
    Err(DomainError::Forbidden(format!(
        "access denied, required role: {}",
        names.join(" or ")
    )))
}

pub fn require_admin(caller: &Identity) -> Result<(), DomainError> {
    require_role(caller, &[UserRole::Admin])
}
