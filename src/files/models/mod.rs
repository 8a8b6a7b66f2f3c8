pub mod delete_file_response;
pub mod stored_file;
pub mod upload_file_response;
pub mod upload_policy;
