use std::{fmt::Display, path::Path};

use axum::extract::Multipart;
use bytes::Bytes;
use futures::Stream;

use crate::app::{
    models::api_error::ApiError,
    util::multipart::{models::file_properties::FileProperties, multipart::get_file_properties},
};

use super::{
    disk,
    dtos::delete_file_dto::DeleteFileDto,
    errors::FilesApiError,
    models::{stored_file::StoredFile, upload_policy::UploadPolicy},
    util::file_name,
};

pub const FILE_FIELD_NAME: &str = "file";

pub async fn upload_file(
    mut multipart: Multipart,
    dir: &Path,
    policy: &UploadPolicy,
) -> Result<StoredFile, ApiError> {
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => return Err(FilesApiError::MissingFile.value()),
            Err(e) => {
                tracing::warn!(%e, "failed to read multipart field");
                return Err(FilesApiError::MalformedUpload.value());
            }
        };

        let properties = get_file_properties(&field);
        if properties.field_name.as_deref() != Some(FILE_FIELD_NAME) {
            continue;
        }

        return save_file(&properties, field, dir, policy).await;
    }
}

pub async fn save_file<S, E>(
    properties: &FileProperties,
    chunks: S,
    dir: &Path,
    policy: &UploadPolicy,
) -> Result<StoredFile, ApiError>
where
    S: Stream<Item = Result<Bytes, E>>,
    E: Display,
{
    let name = file_name::sanitized(&properties.file_name)?;
    policy.check_mime_type(&properties.mime_type)?;

    match disk::service::create_file(
        dir,
        &name,
        &properties.file_name,
        chunks,
        policy.max_upload_size,
    )
    .await
    {
        Ok(size) => {
            tracing::info!(name, size, mime_type = %properties.mime_type, "file uploaded");
            Ok(StoredFile { name, size })
        }
        Err(e) => {
            tracing::info!(name, code = %e.code, "upload rejected: {}", e.message);
            Err(e)
        }
    }
}

pub async fn get_files(dir: &Path) -> Result<Vec<StoredFile>, ApiError> {
    disk::service::list_files(dir).await
}

/// The name goes through the same normalization as uploads, so a file sent
/// as `a  b.txt` is deleted by either spelling.
pub async fn delete_file(dto: &DeleteFileDto, dir: &Path) -> Result<(), ApiError> {
    let name = file_name::sanitized(&dto.delete)?;

    disk::service::remove_file(dir, &name).await?;
    tracing::info!(name, "file deleted");

    Ok(())
}
