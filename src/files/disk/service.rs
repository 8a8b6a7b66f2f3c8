use std::{
    fmt::Display,
    io::ErrorKind,
    path::{Path, PathBuf},
    time::Duration,
};

use bytes::Bytes;
use futures::{pin_mut, Stream, StreamExt};
use tokio::{fs, io::AsyncWriteExt};
use uuid::Uuid;

use crate::{
    app::models::api_error::ApiError,
    files::{errors::FilesApiError, models::stored_file::StoredFile},
};

/// Holds in-flight uploads. Being a directory, it never shows up in listings.
pub const STAGING_DIR_NAME: &str = ".staging";

pub fn staging_dir(dir: &Path) -> PathBuf {
    dir.join(STAGING_DIR_NAME)
}

pub async fn prepare(dir: &Path) -> std::io::Result<()> {
    fs::create_dir_all(staging_dir(dir)).await
}

/// Streams `chunks` into a staged file, then links it under `file_name`.
///
/// The link fails if the name is taken, so two uploads racing for the same
/// name get exactly one winner, and a reader never sees a partial file.
/// `original_name` is only used for the collision message.
pub async fn create_file<S, E>(
    dir: &Path,
    file_name: &str,
    original_name: &str,
    chunks: S,
    max_size: u64,
) -> Result<u64, ApiError>
where
    S: Stream<Item = Result<Bytes, E>>,
    E: Display,
{
    let staging = staging_dir(dir);
    if let Err(e) = fs::create_dir(&staging).await {
        if e.kind() != ErrorKind::AlreadyExists {
            tracing::error!(%e);
            return Err(io_error_to_api_error(e.kind()));
        }
    }

    let staged_path = staging.join([&Uuid::new_v4().to_string(), ".part"].concat());
    let result = stage_and_link(
        &staged_path,
        &dir.join(file_name),
        original_name,
        chunks,
        max_size,
    )
    .await;

    if let Err(e) = fs::remove_file(&staged_path).await {
        if e.kind() != ErrorKind::NotFound {
            tracing::warn!(path = %staged_path.display(), %e, "failed to remove staged file");
        }
    }

    result
}

async fn stage_and_link<S, E>(
    staged_path: &Path,
    target: &Path,
    original_name: &str,
    chunks: S,
    max_size: u64,
) -> Result<u64, ApiError>
where
    S: Stream<Item = Result<Bytes, E>>,
    E: Display,
{
    let mut file = match fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(staged_path)
        .await
    {
        Ok(file) => file,
        Err(e) => {
            tracing::error!(%e);
            return Err(io_error_to_api_error(e.kind()));
        }
    };

    pin_mut!(chunks);

    let mut size: u64 = 0;
    while let Some(chunk) = chunks.next().await {
        let chunk = match chunk {
            Ok(chunk) => chunk,
            Err(e) => {
                tracing::warn!(%e, "upload stream aborted");
                return Err(FilesApiError::MalformedUpload.value());
            }
        };

        size += chunk.len() as u64;
        if size > max_size {
            return Err(FilesApiError::FileTooLarge(max_size).value());
        }

        if let Err(e) = file.write_all(&chunk).await {
            tracing::error!(%e);
            return Err(FilesApiError::WriteFailure.value());
        }
    }

    if let Err(e) = file.sync_all().await {
        tracing::error!(%e);
        return Err(FilesApiError::WriteFailure.value());
    }
    drop(file);

    match fs::hard_link(staged_path, target).await {
        Ok(_) => Ok(size),
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            Err(FilesApiError::AlreadyExists(original_name.to_string()).value())
        }
        Err(e) => {
            tracing::error!(%e);
            Err(io_error_to_api_error(e.kind()))
        }
    }
}

/// Regular files directly inside `dir`, sorted by name.
pub async fn list_files(dir: &Path) -> Result<Vec<StoredFile>, ApiError> {
    let mut entries = match fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) => {
            tracing::error!(path = %dir.display(), %e);
            return Err(FilesApiError::StorageUnavailable.value());
        }
    };

    let mut files = Vec::new();

    loop {
        let entry = match entries.next_entry().await {
            Ok(Some(entry)) => entry,
            Ok(None) => break,
            Err(e) => {
                tracing::error!(path = %dir.display(), %e);
                return Err(FilesApiError::StorageUnavailable.value());
            }
        };

        // does not follow symlinks
        let metadata = match entry.metadata().await {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == ErrorKind::NotFound => continue,
            Err(e) => {
                tracing::warn!(path = %entry.path().display(), %e, "skipping unreadable entry");
                continue;
            }
        };

        if !metadata.is_file() {
            continue;
        }

        let Ok(name) = entry.file_name().into_string() else {
            tracing::warn!(path = %entry.path().display(), "skipping non utf-8 file name");
            continue;
        };

        files.push(StoredFile {
            name,
            size: metadata.len(),
        });
    }

    files.sort_by(|a, b| a.name.cmp(&b.name));

    Ok(files)
}

pub async fn remove_file(dir: &Path, file_name: &str) -> Result<(), ApiError> {
    let target = dir.join(file_name);

    match fs::symlink_metadata(&target).await {
        Ok(metadata) if metadata.is_file() => {}
        Ok(_) => return Err(FilesApiError::FileNotFound.value()),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(FilesApiError::FileNotFound.value())
        }
        Err(e) => {
            tracing::error!(%e);
            return Err(FilesApiError::WriteFailure.value());
        }
    }

    match fs::remove_file(&target).await {
        Ok(_) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(FilesApiError::FileNotFound.value()),
        Err(e) => {
            tracing::error!(%e);
            Err(FilesApiError::WriteFailure.value())
        }
    }
}

/// Removes staged files last modified more than `max_age` ago.
pub async fn sweep_staging(dir: &Path, max_age: Duration) -> std::io::Result<usize> {
    let mut entries = match fs::read_dir(staging_dir(dir)).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(0),
        Err(e) => return Err(e),
    };

    let mut removed = 0;

    while let Some(entry) = entries.next_entry().await? {
        let Ok(metadata) = entry.metadata().await else {
            continue;
        };
        if !metadata.is_file() {
            continue;
        }

        let is_stale = metadata
            .modified()
            .ok()
            .and_then(|modified| modified.elapsed().ok())
            .map(|age| age >= max_age)
            .unwrap_or(false);

        if is_stale && fs::remove_file(entry.path()).await.is_ok() {
            removed += 1;
        }
    }

    Ok(removed)
}

fn io_error_to_api_error(kind: ErrorKind) -> ApiError {
    match kind {
        ErrorKind::NotFound => FilesApiError::StorageUnavailable.value(),
        _ => FilesApiError::WriteFailure.value(),
    }
}
