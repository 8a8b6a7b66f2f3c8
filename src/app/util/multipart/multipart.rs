use axum::extract::multipart::Field;
use mime::Mime;

use super::models::file_properties::FileProperties;

pub fn get_file_properties(field: &Field<'_>) -> FileProperties {
    let field_name = field.name().map(|name| name.to_string());
    let file_name = field.file_name().unwrap_or_default().to_string();
    let mime_type = parse_mime_type(field.content_type());

    FileProperties {
        field_name,
        file_name,
        mime_type,
    }
}

/// Missing or unparsable content types fall back to `application/octet-stream`.
pub fn parse_mime_type(content_type: Option<&str>) -> Mime {
    content_type
        .and_then(|value| value.parse::<Mime>().ok())
        .unwrap_or(mime::APPLICATION_OCTET_STREAM)
}
