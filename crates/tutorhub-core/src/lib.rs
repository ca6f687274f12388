//! # TutorHub Core
//!
//! Foundational types shared by every TutorHub crate:
//!
//! - [`errors`]: `AppError` with HTTP conversion and the `DomainError` taxonomy
//! - [`response`]: the `{status_code, status, message, data}` success envelope
//! - [`roles`]: `UserRole` and `RoleSet`
//! - [`password`]: bcrypt hashing and verification
//! - [`file_storage`]: thumbnail storage abstraction

pub mod errors;
pub mod file_storage;
pub mod password;
pub mod response;
pub mod roles;

pub use errors::{AppError, DomainError};
pub use file_storage::{FileStorage, LocalFileStorage, StorageError};
pub use password::{hash_password, verify_password};
pub use response::ApiResponse;
pub use roles::{RoleSet, UserRole};
