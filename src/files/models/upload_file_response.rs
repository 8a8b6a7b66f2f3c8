use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;

use crate::app::models::api_error::ApiError;

#[derive(Debug, Serialize)]
pub struct UploadFileResponse {
    pub success: bool,
    pub size: u64,
}

/// Same as `ApiError`, reported under the `error` key the upload client reads.
#[derive(Debug)]
pub struct UploadApiError {
    pub code: StatusCode,
    pub message: String,
}

impl From<ApiError> for UploadApiError {
    fn from(e: ApiError) -> Self {
        Self {
            code: e.code,
            message: e.message,
        }
    }
}

impl IntoResponse for UploadApiError {
    fn into_response(self) -> Response {
        (
            self.code,
            Json(json!({
                "success": false,
                "error": self.message,
            })),
        )
            .into_response()
    }
}
