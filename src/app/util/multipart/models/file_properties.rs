use mime::Mime;

#[derive(Debug, Clone)]
pub struct FileProperties {
    /// `None` for parts sent without a `name` parameter.
    pub field_name: Option<String>,
    pub file_name: String,
    pub mime_type: Mime,
}
