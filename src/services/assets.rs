//! Cover image storage

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::Utc;

use crate::error::{AppError, AppResult};

/// An uploaded file as received from the client
#[derive(Debug, Clone)]
pub struct Upload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Stores uploaded assets and hands back the reference kept on the book
#[async_trait]
pub trait AssetStorage: Send + Sync {
    async fn store(&self, original_name: &str, bytes: &[u8]) -> AppResult<String>;

    /// Delete a previously stored asset
    async fn remove(&self, reference: &str) -> AppResult<()>;
}

/// Writes assets into a directory as `<unix-millis>-<original name>`
#[derive(Debug, Clone)]
pub struct DiskAssetStorage {
    dir: PathBuf,
}

impl DiskAssetStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

/// Keep only the final path component and drop characters unsafe in file names
fn sanitize(original_name: &str) -> String {
    original_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .chars()
        .filter(|c| !c.is_control() && !matches!(c, ':' | '*' | '?' | '"' | '<' | '>' | '|'))
        .collect::<String>()
        .trim_start_matches('.')
        .to_string()
}

#[async_trait]
impl AssetStorage for DiskAssetStorage {
    async fn store(&self, original_name: &str, bytes: &[u8]) -> AppResult<String> {
        let name = sanitize(original_name);
        if name.is_empty() {
            return Err(AppError::Validation("image: Invalid file name".to_string()));
        }

        let stored = format!("{}-{}", Utc::now().timestamp_millis(), name);
        tokio::fs::create_dir_all(&self.dir).await?;
        tokio::fs::write(self.dir.join(&stored), bytes).await?;

        tracing::info!("Stored upload {} ({} bytes)", stored, bytes.len());
        Ok(stored)
    }

    async fn remove(&self, reference: &str) -> AppResult<()> {
        let name = sanitize(reference);
        if name.is_empty() {
            return Ok(());
        }
        tokio::fs::remove_file(self.dir.join(&name)).await?;
        tracing::info!("Removed upload {}", name);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize("cover.png"), "cover.png");
        assert_eq!(sanitize("../../etc/passwd"), "passwd");
        assert_eq!(sanitize("C:\\images\\capa.jpg"), "capa.jpg");
        assert_eq!(sanitize(".hidden"), "hidden");
        assert_eq!(sanitize("dir/"), "");
    }

    #[tokio::test]
    async fn test_store_writes_prefixed_file() {
        let dir = tempfile::tempdir().unwrap();
        let storage = DiskAssetStorage::new(dir.path().join("upload"));

        let stored = storage.store("capa.png", b"png-bytes").await.unwrap();
        let (prefix, name) = stored.split_once('-').unwrap();
        assert!(prefix.parse::<i64>().is_ok());
        assert_eq!(name, "capa.png");
        assert_eq!(
            std::fs::read(dir.path().join("upload").join(&stored)).unwrap(),
            b"png-bytes"
        );
    }

    #[tokio::test]
    async fn test_remove_deletes_stored_file() {
        let dir = tempfile::tempdir().unwrap();
        let storage = DiskAssetStorage::new(dir.path());

        let stored = storage.store("capa.png", b"png").await.unwrap();
        storage.remove(&stored).await.unwrap();
        assert!(!dir.path().join(&stored).exists());
    }

    #[tokio::test]
    async fn test_store_rejects_empty_name() {
        let dir = tempfile::tempdir().unwrap();
        let storage = DiskAssetStorage::new(dir.path());
        assert!(matches!(
            storage.store("", b"x").await,
            Err(AppError::Validation(_))
        ));
    }
}
