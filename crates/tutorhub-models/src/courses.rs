//! Tutoring courses ("bimbel") and the multipart form used to write them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
pub struct Course {
    pub id: i64,
    pub tutor_id: i64,
    pub feature_id: i64,
    pub subject_id: i64,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub capacity: i32,
    /// Storage key of the thumbnail image.
    pub thumbnail: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing)]
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CourseResponse {
    #[serde(flatten)]
    pub course: Course,
    pub thumbnail_url: String,
}

/// An uploaded image as received from the client.
#[derive(Debug, Clone, Default)]
pub struct ThumbnailUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Fields of the course create/update form after multipart decoding.
///
/// Numeric fields left out of the form stay at zero and are rejected by the
/// usecase's required-field checks.
#[derive(Debug, Clone, Default)]
pub struct CourseForm {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub feature_id: i64,
    pub subject_id: i64,
    pub capacity: Option<i32>,
    /// Only honoured for admins; tutors always own what they create.
    pub tutor_id: Option<i64>,
    pub is_active: Option<bool>,
    pub thumbnail: Option<ThumbnailUpload>,
}

/// Row to insert, after validation and ownership resolution.
#[derive(Debug, Clone)]
pub struct NewCourse {
    pub tutor_id: i64,
    pub feature_id: i64,
    pub subject_id: i64,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub capacity: i32,
    pub thumbnail: String,
    pub is_active: bool,
}

/// Full replacement of a course's mutable columns.
#[derive(Debug, Clone)]
pub struct CourseChanges {
    pub feature_id: i64,
    pub subject_id: i64,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub capacity: i32,
    pub thumbnail: String,
    pub is_active: bool,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CourseListQuery {
    /// Admin only: list another tutor's courses.
    pub tutor_id: Option<i64>,
}

/// Documentation shape of the multipart body accepted by `POST /bimbels` and
/// `PUT /bimbels/{id}`.
#[derive(ToSchema)]
pub struct CourseUploadForm {
    pub name: String,
    pub deskripsi: String,
    pub harga: f64,
    pub feature_id: i64,
    pub subject_id: i64,
    pub limit_peserta: Option<i32>,
    /// Required for admins, ignored for tutors.
    pub tutor_id: Option<i64>,
    pub is_active: Option<bool>,
    /// jpg, jpeg or png. Required on create, optional on update.
    #[schema(value_type = String, format = Binary)]
    pub thumbnail: Vec<u8>,
}
