use std::env;
use std::path::PathBuf;

/// Where uploaded course images are written and how they are addressed
/// publicly.
#[derive(Clone, Debug)]
pub struct StorageConfig {
    pub upload_dir: PathBuf,
    pub public_base_url: String,
}

impl StorageConfig {
    pub fn from_env() -> Self {
        Self {
            upload_dir: env::var("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("storage/uploads")),
            public_base_url: env::var("ASSET_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8080/files".to_string()),
        }
    }
}
