//! Repository layer over the JSON document

pub mod books;
pub mod credentials;
pub mod store;

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard};

use tokio::sync::Mutex;

use crate::{error::AppResult, models::Document};

pub use store::JsonStore;

/// Authoritative in-memory copy of the library document.
///
/// Reads look at the current snapshot without waiting on writers. Every
/// mutation runs under `write_gate`: it is staged on a copy, persisted, and
/// only then swapped in, so a failed save leaves memory untouched.
#[derive(Clone)]
pub struct Repository {
    store: JsonStore,
    document: Arc<RwLock<Document>>,
    write_gate: Arc<Mutex<()>>,
}

impl Repository {
    /// Create a repository around an already loaded document
    pub fn new(store: JsonStore, document: Document) -> Self {
        Self {
            store,
            document: Arc::new(RwLock::new(document)),
            write_gate: Arc::new(Mutex::new(())),
        }
    }

    /// Load the document from disk and wrap it
    pub async fn open(store: JsonStore) -> AppResult<Self> {
        let document = store.load().await?;
        tracing::info!(
            "Loaded {} books and {} credentials from {}",
            document.books.len(),
            document.login.len(),
            store.path().display()
        );
        Ok(Self::new(store, document))
    }

    fn snapshot(&self) -> RwLockReadGuard<'_, Document> {
        self.document.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Apply `stage` to a copy of the document, persist it, then publish it.
    async fn commit<T, F>(&self, stage: F) -> AppResult<T>
    where
        F: FnOnce(&mut Document) -> AppResult<T>,
    {
        let _guard = self.write_gate.lock().await;

        let mut staged = self.snapshot().clone();
        let output = stage(&mut staged)?;

        if let Err(e) = self.store.save(&staged).await {
            tracing::error!("Failed to save {}: {}", self.store.path().display(), e);
            return Err(e);
        }

        *self.document.write().unwrap_or_else(PoisonError::into_inner) = staged;
        Ok(output)
    }
}
