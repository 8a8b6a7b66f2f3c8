use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct DeleteFileDto {
    #[validate(length(
        min = 1,
        max = 1024,
        message = "delete must be between 1 and 1024 characters."
    ))]
    pub delete: String,
}
