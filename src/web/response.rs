// src/web/response.rs
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Uniform JSON envelope: `{"message", "status_code", "data"?}`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub message: String,
    pub status_code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn with_data(status: StatusCode, message: impl Into<String>, data: T) -> Self {
        ApiResponse {
            message: message.into(),
            status_code: status.as_u16(),
            data: Some(data),
        }
    }

    pub fn message(status: StatusCode, message: impl Into<String>) -> Self {
        ApiResponse {
            message: message.into(),
            status_code: status.as_u16(),
            data: None,
        }
    }

    pub fn ok(data: T) -> Self {
        Self::with_data(StatusCode::OK, "ok", data)
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}
