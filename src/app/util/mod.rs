pub mod janitor;
pub mod multipart;
