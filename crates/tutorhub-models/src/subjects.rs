use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
pub struct Subject {
    pub id: i64,
    pub feature_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateSubjectDto {
    pub feature_id: i64,
    #[validate(length(max = 255))]
    pub name: String,
    #[serde(alias = "deskripsi")]
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateSubjectDto {
    pub feature_id: i64,
    #[validate(length(max = 255))]
    pub name: String,
    #[serde(alias = "deskripsi")]
    pub description: Option<String>,
    pub is_active: Option<bool>,
}
