//! On-disk JSON document store

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tokio::io::AsyncWriteExt;

use crate::{error::AppResult, models::Document};

/// Reads and rewrites the whole library document.
///
/// Saves go through a sibling `.tmp` file renamed over the target, so readers
/// of the file never see a partially written document.
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the complete document
    pub async fn load(&self) -> AppResult<Document> {
        let bytes = tokio::fs::read(&self.path).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Overwrite the file with the complete document
    pub async fn save(&self, document: &Document) -> AppResult<()> {
        let bytes = encode(document)?;
        let tmp = self.tmp_path();

        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(&bytes).await?;
        // Data must be on disk before the rename makes it visible
        file.sync_all().await?;
        drop(file);

        if let Err(e) = tokio::fs::rename(&tmp, &self.path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e.into());
        }

        tracing::debug!("Saved {} bytes to {}", bytes.len(), self.path.display());
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

/// Tab-indented JSON, matching documents written by earlier versions of the service
fn encode(document: &Document) -> AppResult<Vec<u8>> {
    let mut bytes = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut bytes, PrettyFormatter::with_indent(b"\t"));
    document.serialize(&mut serializer)?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Credential;

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("db.json"));
        let document = Document {
            login: vec![Credential {
                email: "admin@school.org".to_string(),
                password: "secret".to_string(),
            }],
            books: vec![],
        };

        store.save(&document).await.unwrap();
        assert_eq!(store.load().await.unwrap(), document);
        assert!(!dir.path().join("db.json.tmp").exists());

        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("\n\t\"login\""));
    }

    #[tokio::test]
    async fn test_save_replaces_longer_document() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("db.json"));
        let long = Document {
            login: (0..50)
                .map(|i| Credential {
                    email: format!("user{}@school.org", i),
                    password: "secret".to_string(),
                })
                .collect(),
            books: vec![],
        };

        store.save(&long).await.unwrap();
        store.save(&Document::default()).await.unwrap();

        assert_eq!(store.load().await.unwrap(), Document::default());
        assert!(!dir.path().join("db.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("absent.json"));
        assert!(matches!(
            store.load().await,
            Err(crate::error::AppError::Persistence(_))
        ));
    }

    #[tokio::test]
    async fn test_load_malformed_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("db.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            JsonStore::new(path).load().await,
            Err(crate::error::AppError::Serialization(_))
        ));
    }
}
