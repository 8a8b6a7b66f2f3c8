use mime::Mime;

use crate::{
    app::{env::Envy, models::api_error::ApiError},
    files::errors::FilesApiError,
};

#[derive(Debug, Clone)]
pub struct UploadPolicy {
    pub max_upload_size: u64,
    /// Lowercase essences such as `image/jpeg`, or `image/*`. Empty allows all.
    pub allowed_mime_types: Vec<String>,
}

impl UploadPolicy {
    pub fn from_envy(envy: &Envy) -> Self {
        Self {
            max_upload_size: envy.max_upload_size(),
            allowed_mime_types: envy.allowed_mime_types(),
        }
    }

    pub fn is_allowed(&self, mime_type: &Mime) -> bool {
        if self.allowed_mime_types.is_empty() {
            return true;
        }

        let essence = mime_type.essence_str().to_lowercase();
        let type_wildcard = [mime_type.type_().as_str(), "/*"].concat().to_lowercase();

        self.allowed_mime_types.iter().any(|allowed| {
            *allowed == essence || *allowed == type_wildcard || allowed.as_str() == "*/*"
        })
    }

    pub fn check_mime_type(&self, mime_type: &Mime) -> Result<(), ApiError> {
        if !self.is_allowed(mime_type) {
            return Err(
                FilesApiError::UnsupportedMimeType(mime_type.essence_str().to_string()).value(),
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(types: &[&str]) -> UploadPolicy {
        UploadPolicy {
            max_upload_size: 1024,
            allowed_mime_types: types.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[test]
    fn test_default_allow_list() {
        let policy = UploadPolicy::from_envy(&Envy::default());

        assert!(policy.is_allowed(&mime::IMAGE_JPEG));
        assert!(policy.is_allowed(&mime::APPLICATION_PDF));
        assert!(!policy.is_allowed(&mime::IMAGE_PNG));
        assert!(!policy.is_allowed(&mime::APPLICATION_OCTET_STREAM));
    }

    #[test]
    fn test_parameters_are_ignored() {
        let policy = policy(&["text/plain"]);
        let mime_type: Mime = "text/plain; charset=utf-8".parse().unwrap();

        assert!(policy.is_allowed(&mime_type));
    }

    #[test]
    fn test_wildcards() {
        let policy = policy(&["image/*"]);

        assert!(policy.is_allowed(&mime::IMAGE_PNG));
        assert!(policy.is_allowed(&mime::IMAGE_JPEG));
        assert!(!policy.is_allowed(&mime::APPLICATION_PDF));

        let any = UploadPolicy {
            allowed_mime_types: vec!["*/*".to_string()],
            ..policy
        };
        assert!(any.is_allowed(&mime::APPLICATION_PDF));
    }

    #[test]
    fn test_empty_list_allows_everything() {
        let policy = policy(&[]);

        assert!(policy.is_allowed(&mime::APPLICATION_OCTET_STREAM));
        assert!(policy.check_mime_type(&mime::TEXT_CSV).is_ok());
    }

    #[test]
    fn test_check_mime_type_error() {
        let err = policy(&["application/pdf"])
            .check_mime_type(&mime::IMAGE_GIF)
            .unwrap_err();

        assert_eq!(err.code, axum::http::StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(err.message, "Files of type image/gif are not allowed.");
    }
}
