//! Shared helpers.
//!
//! - [`auth_helpers`]: tutor identity resolution and course ownership checks
//! - [`validation`]: name and free-text normalisation

pub mod auth_helpers;
pub mod validation;
