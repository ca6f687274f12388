use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tutorhub_core::RoleSet;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Feature {
    pub id: i64,
    pub name: String,
    /// Roles allowed to see this feature, comma-joined.
    #[schema(value_type = String, example = "admin,tutor")]
    pub roles: RoleSet,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateFeatureDto {
    #[validate(length(max = 255))]
    pub name: String,
    #[schema(value_type = String, example = "admin,tutor")]
    pub roles: RoleSet,
    /// Defaults to active.
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateFeatureDto {
    #[validate(length(max = 255))]
    pub name: String,
    #[schema(value_type = String, example = "admin,tutor")]
    pub roles: RoleSet,
    /// Keeps the stored value when omitted.
    pub is_active: Option<bool>,
}
