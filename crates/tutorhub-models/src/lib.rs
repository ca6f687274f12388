//! # TutorHub Models
//!
//! Entities and request/response DTOs for the TutorHub API.
//!
//! - [`users`]: accounts and their public projection
//! - [`auth`]: register/login payloads
//! - [`features`]: role-gated feature flags
//! - [`subjects`]: subjects ("matpel") within a feature
//! - [`courses`]: tutoring courses ("bimbel")

pub mod auth;
pub mod courses;
pub mod features;
pub mod subjects;
pub mod users;

pub use auth::{AuthResponse, LoginRequest, RegisterRequest};
pub use courses::{
    Course, CourseChanges, CourseForm, CourseListQuery, CourseResponse, CourseUploadForm,
    NewCourse, ThumbnailUpload,
};
pub use features::{CreateFeatureDto, Feature, UpdateFeatureDto};
pub use subjects::{CreateSubjectDto, Subject, UpdateSubjectDto};
pub use users::{NewUser, PublicUser, User};
