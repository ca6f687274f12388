//! User accounts.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tutorhub_core::UserRole;
use utoipa::ToSchema;

/// A stored account. The password hash never leaves the process.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub role: UserRole,
    pub tutor_id: Option<i64>,
    pub participant_id: Option<i64>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn public(&self) -> PublicUser {
        PublicUser {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role,
        }
    }
}

/// Registration candidate, with the password already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct PublicUser {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: UserRole,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_hash_is_never_serialized() {
        let user = User {
            id: 1,
            name: "A".into(),
            email: "a@x.com".into(),
            password: "$2b$12$hash".into(),
            role: UserRole::Tutor,
            tutor_id: Some(3),
            participant_id: None,
            is_active: true,
            created_at: Utc::now(),
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("hash"));
        assert!(!json.contains("password"));
        assert_eq!(user.public().role, UserRole::Tutor);
    }
}
