use axum::http::StatusCode;

use crate::app::models::api_error::ApiError;

#[derive(Debug)]
pub enum FilesApiError {
    AlreadyExists(String),
    FileNotFound,
    InvalidFileName,
    MissingFile,
    FileTooLarge(u64),
    UnsupportedMimeType(String),
    MalformedUpload,
    WriteFailure,
    StorageUnavailable,
}

impl FilesApiError {
    pub fn value(&self) -> ApiError {
        match self {
            Self::AlreadyExists(file_name) => ApiError {
                code: StatusCode::CONFLICT,
                message: format!("File {} already exists.", file_name),
            },
            Self::FileNotFound => ApiError {
                code: StatusCode::NOT_FOUND,
                message: "File not found.".to_string(),
            },
            Self::InvalidFileName => ApiError {
                code: StatusCode::BAD_REQUEST,
                message: "Invalid file name.".to_string(),
            },
            Self::MissingFile => ApiError {
                code: StatusCode::BAD_REQUEST,
                message: "Received nothing to upload.".to_string(),
            },
            Self::FileTooLarge(limit) => ApiError {
                code: StatusCode::PAYLOAD_TOO_LARGE,
                message: format!("File must not exceed {} bytes.", limit),
            },
            Self::UnsupportedMimeType(mime_type) => ApiError {
                code: StatusCode::UNSUPPORTED_MEDIA_TYPE,
                message: format!("Files of type {} are not allowed.", mime_type),
            },
            Self::MalformedUpload => ApiError {
                code: StatusCode::BAD_REQUEST,
                message: "Failed to read upload payload.".to_string(),
            },
            Self::WriteFailure => ApiError {
                code: StatusCode::INTERNAL_SERVER_ERROR,
                message: "Failed to write file.".to_string(),
            },
            Self::StorageUnavailable => ApiError {
                code: StatusCode::SERVICE_UNAVAILABLE,
                message: "Storage directory is unavailable.".to_string(),
            },
        }
    }
}
