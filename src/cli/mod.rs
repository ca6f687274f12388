//! Administrative commands run outside the HTTP API.

use validator::ValidateEmail;

use tutorhub_core::{AppError, DomainError, UserRole, hash_password};
use tutorhub_models::{NewUser, User};

use crate::modules::users::repository::UserRepository;

const MIN_ADMIN_PASSWORD_CHARS: usize = 8;

/// Create an admin account. Self-registration never grants this role.
pub async fn create_admin<R: UserRepository>(
    repo: &R,
    name: &str,
    email: &str,
    password: &str,
) -> Result<User, AppError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(DomainError::validation("name is required").into());
    }

    let email = email.trim();
    if !email.validate_email() {
        return Err(DomainError::validation("email is invalid").into());
    }

    if password.chars().count() < MIN_ADMIN_PASSWORD_CHARS {
        return Err(DomainError::validation(format!(
            "password must be at least {MIN_ADMIN_PASSWORD_CHARS} characters"
        ))
        .into());
    }

    let user = repo
        .create_user(NewUser {
            name: name.to_string(),
            email: email.to_string(),
            password_hash: hash_password(password)?,
            role: UserRole::Admin,
        })
        .await?;

    tracing::info!(user_id = user.id, "admin account created");
    Ok(user)
}
