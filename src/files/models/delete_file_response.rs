use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct DeleteFileResponse {
    pub success: bool,
}
