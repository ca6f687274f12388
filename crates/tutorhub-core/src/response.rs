//! The success envelope shared by every endpoint.
//!
//! Errors use the same shape through [`crate::errors::AppError`].

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub status_code: u16,
    pub status: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn new(status: StatusCode, message: impl Into<String>, data: T) -> Self {
        Self {
            status_code: status.as_u16(),
            status: "success",
            message: message.into(),
            data: Some(data),
        }
    }

    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self::new(StatusCode::OK, message, data)
    }

    pub fn created(message: impl Into<String>, data: T) -> Self {
        Self::new(StatusCode::CREATED, message, data)
    }
}

impl ApiResponse<()> {
    /// A success body without `data`.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            status_code: StatusCode::OK.as_u16(),
            status: "success",
            message: message.into(),
            data: None,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::OK);
        (status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn created_envelope_shape() {
        let body = serde_json::to_value(ApiResponse::created("feature created", json!({"id": 1})))
            .unwrap();
        assert_eq!(
            body,
            json!({
                "status_code": 201,
                "status": "success",
                "message": "feature created",
                "data": {"id": 1}
            })
        );
    }

    #[test]
    fn message_only_envelope_omits_data() {
        let body = serde_json::to_value(ApiResponse::message("deleted")).unwrap();
        assert!(body.get("data").is_none());
        assert_eq!(body["status_code"], 200);
    }
}
