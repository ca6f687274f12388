use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::file_storage::StorageError;

/// Business-rule failures raised by the usecases.
///
/// Each variant carries its own HTTP status so handlers never have to
/// translate by hand; `?` on a `DomainError` yields an [`AppError`] with the
/// right status attached.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("{0}")]
    Validation(String),

    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("email is already registered")]
    DuplicateEmail,

    #[error("{0}")]
    Conflict(String),

    #[error("feature not found or inactive")]
    InvalidFeatureReference,

    #[error("subject not found for this feature")]
    InvalidSubjectReference,

    #[error("user has no linked tutor record")]
    NotATutor,

    #[error("{0}")]
    Forbidden(String),

    /// Ownership violation: the caller is a tutor acting on another tutor's course.
    #[error("course belongs to another tutor")]
    NotOwner,

    #[error("{0}")]
    Unauthenticated(String),

    #[error("{0} not found")]
    NotFound(&'static str),
}

impl DomainError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_)
            | Self::DuplicateEmail
            | Self::InvalidFeatureReference
            | Self::InvalidSubjectReference
            | Self::NotATutor => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials | Self::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) | Self::NotOwner => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub error: Error,
}

impl AppError {
    pub fn new<E>(status: StatusCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            error: err.into(),
        }
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::BAD_REQUEST, err)
    }

    pub fn unauthorized<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::UNAUTHORIZED, err)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::internal(anyhow::anyhow!(message.into()))
    }

    /// The domain failure behind this error, if there is one.
    pub fn kind(&self) -> Option<&DomainError> {
        self.error.downcast_ref::<DomainError>()
    }

    /// Message safe to send to the client. Server-side failures never leak
    /// their cause.
    pub fn public_message(&self) -> String {
        if self.status.is_server_error() {
            "internal server error".to_string()
        } else {
            self.error.to_string()
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(error = ?self.error, status = %self.status, "request failed");
        }

        let body = Json(json!({
            "status_code": self.status.as_u16(),
            "status": "error",
            "message": self.public_message(),
        }));

        (self.status, body).into_response()
    }
}

fn infer_status(error: &Error) -> StatusCode {
    if let Some(domain) = error.downcast_ref::<DomainError>() {
        return domain.status_code();
    }
    if let Some(storage) = error.downcast_ref::<StorageError>() {
        return storage.status_code();
    }
    if error.downcast_ref::<validator::ValidationErrors>().is_some() {
        return StatusCode::BAD_REQUEST;
    }
    StatusCode::INTERNAL_SERVER_ERROR
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        let error = err.into();
        Self {
            status: infer_status(&error),
            error,
        }
    }
}
