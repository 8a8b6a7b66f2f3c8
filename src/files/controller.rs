use axum::{
    body::{Body, Bytes},
    extract::{multipart::MultipartRejection, FromRequest, Multipart, State},
    http::{header::CONTENT_TYPE, HeaderMap, Request, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use mime::Mime;
use validator::Validate;

use crate::{
    app::{models::api_error::ApiError, structs::json_from_request::JsonFromRequest},
    AppState,
};

use super::{
    dtos::delete_file_dto::DeleteFileDto,
    models::{
        delete_file_response::DeleteFileResponse,
        stored_file::StoredFile,
        upload_file_response::{UploadApiError, UploadFileResponse},
    },
    service,
};

/// Multipart bodies are uploads. Anything else is read as a `{ "delete" }`
/// request, whatever its declared content type.
pub async fn post_files(State(state): State<AppState>, request: Request<Body>) -> Response {
    if is_multipart(request.headers()) {
        let multipart = Multipart::from_request(request, &state).await;
        return upload_file(&state, multipart).await.into_response();
    }

    let body = match Bytes::from_request(request, &state).await {
        Ok(body) => body,
        Err(e) => {
            return ApiError {
                code: e.status(),
                message: e.body_text(),
            }
            .into_response()
        }
    };

    match serde_json::from_slice::<DeleteFileDto>(&body) {
        Ok(dto) => remove_file(&state, dto).await.into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

pub async fn get_files(State(state): State<AppState>) -> Result<Json<Vec<StoredFile>>, ApiError> {
    match service::get_files(&state.storage_dir).await {
        Ok(files) => Ok(Json(files)),
        Err(e) => Err(e),
    }
}

pub async fn delete_file(
    State(state): State<AppState>,
    JsonFromRequest(dto): JsonFromRequest<DeleteFileDto>,
) -> Result<Json<DeleteFileResponse>, ApiError> {
    remove_file(&state, dto).await
}

async fn upload_file(
    state: &AppState,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadFileResponse>, UploadApiError> {
    let multipart = match multipart {
        Ok(multipart) => multipart,
        Err(e) => {
            return Err(UploadApiError {
                code: e.status(),
                message: e.body_text(),
            })
        }
    };

    match service::upload_file(multipart, &state.storage_dir, &state.upload_policy).await {
        Ok(stored) => Ok(Json(UploadFileResponse {
            success: true,
            size: stored.size,
        })),
        Err(e) => Err(e.into()),
    }
}

async fn remove_file(
    state: &AppState,
    dto: DeleteFileDto,
) -> Result<Json<DeleteFileResponse>, ApiError> {
    if let Err(e) = dto.validate() {
        return Err(ApiError {
            code: StatusCode::BAD_REQUEST,
            message: e.to_string(),
        });
    }

    match service::delete_file(&dto, &state.storage_dir).await {
        Ok(_) => Ok(Json(DeleteFileResponse { success: true })),
        Err(e) => Err(e),
    }
}

fn is_multipart(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<Mime>().ok())
        .map(|mime_type| mime_type.type_() == mime::MULTIPART)
        .unwrap_or(false)
}
