use axum::Json;
use axum_macros::FromRequest;

use crate::app::models::api_error::ApiError;

/// `Json` extractor whose rejections render as `{ "success": false, "message" }`.
#[derive(FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
pub struct JsonFromRequest<T>(pub T);
