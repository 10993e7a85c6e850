//! Image hosting collaborator.
//!
//! Course cover images go through the [`AssetStore`] trait; handlers never
//! touch the filesystem directly, so the backing host can change without
//! touching the catalog logic. [`LocalAssetStore`] is the shipped backend:
//! it writes under a configured directory and hands out URLs below a
//! configured public base.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;

use crate::config::storage::StorageConfig;

/// Upload cap for a single asset.
const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("File exceeds maximum size of {max_bytes} bytes")]
    FileTooLarge { max_bytes: usize },

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Store `content` under `key`, returning the key on success.
    async fn save(&self, key: &str, content: &[u8]) -> Result<String, AssetError>;

    /// Public URL serving the asset stored under `key`.
    fn url(&self, key: &str) -> Result<String, AssetError>;
}

/// Keys are relative paths like `courses/<id>.png`. Anything empty,
/// absolute, traversing upward, or outside the plain path charset is
/// rejected before it reaches the filesystem.
fn ensure_key(key: &str) -> Result<(), AssetError> {
    let shape_ok = !key.is_empty() && !key.contains("..") && !key.starts_with('/');
    let charset_ok = key
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | '/' | '.'));

    if shape_ok && charset_ok {
        Ok(())
    } else {
        Err(AssetError::InvalidKey(key.to_string()))
    }
}

/// Filesystem-backed asset host.
#[derive(Clone)]
pub struct LocalAssetStore {
    base_dir: PathBuf,
    base_url: String,
    max_file_size: usize,
}

impl LocalAssetStore {
    pub fn new(base_dir: PathBuf, base_url: String) -> Self {
        Self {
            base_dir,
            base_url,
            max_file_size: MAX_UPLOAD_BYTES,
        }
    }

    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(config.upload_dir.clone(), config.public_base_url.clone())
    }
}

#[async_trait]
impl AssetStore for LocalAssetStore {
    async fn save(&self, key: &str, content: &[u8]) -> Result<String, AssetError> {
        ensure_key(key)?;
        if content.len() > self.max_file_size {
            return Err(AssetError::FileTooLarge {
                max_bytes: self.max_file_size,
            });
        }

        let target = self.base_dir.join(key);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&target, content).await?;

        Ok(key.to_string())
    }

    fn url(&self, key: &str) -> Result<String, AssetError> {
        ensure_key(key)?;
        Ok(format!("{}/{}", self.base_url.trim_end_matches('/'), key))
    }
}
