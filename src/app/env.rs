use std::path::PathBuf;

use serde::Deserialize;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_STORAGE_DIR: &str = "uploads";
pub const DEFAULT_MAX_UPLOAD_SIZE: u64 = 100 * 1024 * 1024;
pub const DEFAULT_ALLOWED_MIME_TYPES: [&str; 2] = ["image/jpeg", "application/pdf"];
pub const DEFAULT_RATE_LIMIT_PER_SECOND: u64 = 100;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Envy {
    #[serde(default = "default_app_env")]
    pub app_env: String,
    pub port: Option<u16>,

    pub storage_dir: Option<String>,
    pub max_upload_size: Option<u64>,
    /// Comma separated. Set but empty means every type is accepted.
    pub allowed_mime_types: Option<Vec<String>>,

    pub rate_limit_per_second: Option<u64>,
}

fn default_app_env() -> String {
    "development".to_string()
}

impl Envy {
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    pub fn storage_dir(&self) -> PathBuf {
        PathBuf::from(
            self.storage_dir
                .as_deref()
                .unwrap_or(DEFAULT_STORAGE_DIR),
        )
    }

    pub fn max_upload_size(&self) -> u64 {
        self.max_upload_size.unwrap_or(DEFAULT_MAX_UPLOAD_SIZE)
    }

    pub fn allowed_mime_types(&self) -> Vec<String> {
        match &self.allowed_mime_types {
            Some(types) => types
                .iter()
                .map(|t| t.trim().to_lowercase())
                .filter(|t| !t.is_empty())
                .collect(),
            None => DEFAULT_ALLOWED_MIME_TYPES
                .iter()
                .map(|t| t.to_string())
                .collect(),
        }
    }

    pub fn rate_limit_per_second(&self) -> u64 {
        self.rate_limit_per_second
            .unwrap_or(DEFAULT_RATE_LIMIT_PER_SECOND)
            .max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let envy = Envy::default();

        assert_eq!(envy.port(), 3000);
        assert_eq!(envy.storage_dir(), PathBuf::from("uploads"));
        assert_eq!(envy.max_upload_size(), 104857600);
        assert_eq!(
            envy.allowed_mime_types(),
            vec!["image/jpeg".to_string(), "application/pdf".to_string()]
        );
        assert_eq!(envy.rate_limit_per_second(), 100);
    }

    #[test]
    fn test_from_iter() {
        let vars = vec![
            ("PORT".to_string(), "8080".to_string()),
            ("STORAGE_DIR".to_string(), "/srv/drop".to_string()),
            ("MAX_UPLOAD_SIZE".to_string(), "1024".to_string()),
            (
                "ALLOWED_MIME_TYPES".to_string(),
                "image/*, Text/Plain".to_string(),
            ),
        ];
        let envy = envy::from_iter::<_, Envy>(vars).unwrap();

        assert_eq!(envy.app_env, "development");
        assert_eq!(envy.port(), 8080);
        assert_eq!(envy.storage_dir(), PathBuf::from("/srv/drop"));
        assert_eq!(envy.max_upload_size(), 1024);
        assert_eq!(
            envy.allowed_mime_types(),
            vec!["image/*".to_string(), "text/plain".to_string()]
        );
    }
}
