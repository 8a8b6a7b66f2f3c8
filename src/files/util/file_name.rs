use regex::Regex;

use crate::{
    app::models::api_error::ApiError,
    files::{disk::service::STAGING_DIR_NAME, errors::FilesApiError},
};

pub const MAX_FILE_NAME_BYTES: usize = 255;

lazy_static! {
    // ascii whitespace, vertical tab included
    static ref WHITESPACE_RUN: Regex = Regex::new(r"[ \t\n\r\x0B\x0C]+").unwrap();
}

/// Collapses every run of whitespace into a single space.
pub fn normalize(file_name: &str) -> String {
    WHITESPACE_RUN.replace_all(file_name, " ").into_owned()
}

/// Checks that a normalized name is a single flat path component.
pub fn validate(file_name: &str) -> Result<(), ApiError> {
    if file_name.trim().is_empty()
        || file_name.len() > MAX_FILE_NAME_BYTES
        || file_name == "."
        || file_name == ".."
        || file_name == STAGING_DIR_NAME
        || file_name
            .chars()
            .any(|c| c == '/' || c == '\\' || c.is_control())
    {
        return Err(FilesApiError::InvalidFileName.value());
    }

    Ok(())
}

pub fn sanitized(file_name: &str) -> Result<String, ApiError> {
    let normalized = normalize(file_name);
    validate(&normalized)?;

    Ok(normalized)
}
