//! Catalog management service

use std::sync::Arc;

use validator::Validate;

use super::assets::{AssetStorage, Upload};
use crate::{
    collation,
    error::AppResult,
    models::{
        book::{CreateBook, UpdateBook},
        Book,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
    assets: Arc<dyn AssetStorage>,
}

impl CatalogService {
    pub fn new(repository: Repository, assets: Arc<dyn AssetStorage>) -> Self {
        Self { repository, assets }
    }

    /// All books ordered by title
    pub fn list_books(&self) -> Vec<Book> {
        self.repository.books_list()
    }

    pub fn get_book(&self, id: &str) -> AppResult<Book> {
        self.repository.books_get_by_id(id)
    }

    /// Distinct genres in catalog order. Genres differing only by case are distinct.
    pub fn list_genres(&self) -> Vec<String> {
        let mut genres: Vec<String> = self
            .repository
            .books_all()
            .into_iter()
            .map(|b| b.genre)
            .collect();
        genres.sort_by(|a, b| collation::compare(a, b));
        genres.dedup();
        genres
    }

    /// Create a new book. An uploaded image takes the place of `data.image`.
    pub async fn create_book(&self, mut data: CreateBook, upload: Option<Upload>) -> AppResult<Book> {
        if let Some(ref upload) = upload {
            data.image = upload.file_name.clone();
        }
        data.validate()?;

        let stored = self.store_upload(upload).await?;
        if let Some(ref reference) = stored {
            data.image = reference.clone();
        }

        let book = match self.repository.books_insert(Book::new(data)).await {
            Ok(book) => book,
            Err(e) => {
                self.discard_upload(stored).await;
                return Err(e);
            }
        };
        tracing::info!("Created book {} ({})", book.id, book.title);
        Ok(book)
    }

    /// Replace a book's descriptive fields
    pub async fn update_book(
        &self,
        id: &str,
        mut data: UpdateBook,
        upload: Option<Upload>,
    ) -> AppResult<Book> {
        if let Some(ref upload) = upload {
            data.image = upload.file_name.clone();
        }
        data.validate()?;

        // Fail before storing a file for a book that does not exist
        self.repository.books_get_by_id(id)?;

        let stored = self.store_upload(upload).await?;
        if let Some(ref reference) = stored {
            data.image = reference.clone();
        }

        let result = self
            .repository
            .books_update(id, move |book| {
                book.apply_update(data);
                Ok(())
            })
            .await;
        let book = match result {
            Ok(book) => book,
            Err(e) => {
                self.discard_upload(stored).await;
                return Err(e);
            }
        };
        tracing::info!("Updated book {}", book.id);
        Ok(book)
    }

    async fn store_upload(&self, upload: Option<Upload>) -> AppResult<Option<String>> {
        match upload {
            Some(upload) => Ok(Some(
                self.assets.store(&upload.file_name, &upload.bytes).await?,
            )),
            None => Ok(None),
        }
    }

    /// Drop a file stored for a book that was never saved
    async fn discard_upload(&self, stored: Option<String>) {
        if let Some(reference) = stored {
            if let Err(e) = self.assets.remove(&reference).await {
                tracing::warn!("Failed to remove orphaned upload {}: {}", reference, e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::AppError,
        models::Document,
        repository::JsonStore,
        services::assets::DiskAssetStorage,
    };

    fn setup(dir: &tempfile::TempDir) -> CatalogService {
        let repo = Repository::new(JsonStore::new(dir.path().join("db.json")), Document::default());
        let assets = Arc::new(DiskAssetStorage::new(dir.path().join("upload")));
        CatalogService::new(repo, assets)
    }

    fn create_request(title: &str, genre: &str) -> CreateBook {
        CreateBook {
            title: title.to_string(),
            author: "Author".to_string(),
            genre: genre.to_string(),
            image: "cover.png".to_string(),
            system_entry_date: "2024-01-01".to_string(),
            synopsis: "Synopsis".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_book_starts_available() {
        let dir = tempfile::tempdir().unwrap();
        let service = setup(&dir);

        let book = service.create_book(create_request("T1", "Drama"), None).await.unwrap();
        assert!(!book.status.is_rented);
        assert!(book.status.is_active);
        assert!(book.rent_history.is_empty());
        assert_eq!(service.get_book(&book.id).unwrap(), book);
    }

    #[tokio::test]
    async fn test_create_book_requires_fields() {
        let dir = tempfile::tempdir().unwrap();
        let service = setup(&dir);

        let mut data = create_request("T1", "Drama");
        data.image = String::new();
        data.synopsis = String::new();

        let Err(AppError::Validation(msg)) = service.create_book(data, None).await else {
            panic!("expected validation error");
        };
        assert!(msg.contains("Image is required"));
        assert!(msg.contains("Synopsis is required"));
        assert!(service.list_books().is_empty());
    }

    #[tokio::test]
    async fn test_create_book_with_upload() {
        let dir = tempfile::tempdir().unwrap();
        let service = setup(&dir);

        let mut data = create_request("T1", "Drama");
        data.image = String::new();
        let upload = Upload {
            file_name: "capa.jpg".to_string(),
            bytes: b"jpeg".to_vec(),
        };

        let book = service.create_book(data, Some(upload)).await.unwrap();
        assert!(book.image.ends_with("-capa.jpg"));
        assert!(dir.path().join("upload").join(&book.image).exists());
    }

    #[tokio::test]
    async fn test_failed_save_removes_stored_upload() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repository::new(
            JsonStore::new(dir.path().join("missing-dir").join("db.json")),
            Document::default(),
        );
        let upload_dir = dir.path().join("upload");
        let service = CatalogService::new(repo, Arc::new(DiskAssetStorage::new(&upload_dir)));

        let upload = Upload {
            file_name: "capa.jpg".to_string(),
            bytes: b"jpeg".to_vec(),
        };
        let result = service.create_book(create_request("T1", "Drama"), Some(upload)).await;

        assert!(matches!(result, Err(AppError::Persistence(_))));
        assert_eq!(std::fs::read_dir(&upload_dir).unwrap().count(), 0);
        assert!(service.list_books().is_empty());
    }

    #[tokio::test]
    async fn test_list_genres_dedups_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        let service = setup(&dir);

        for (title, genre) in [("A", "Fantasy"), ("B", "fantasy"), ("C", "Drama"), ("D", "Drama")] {
            service.create_book(create_request(title, genre), None).await.unwrap();
        }

        assert_eq!(service.list_genres(), vec!["Drama", "fantasy", "Fantasy"]);
    }

    #[tokio::test]
    async fn test_update_book() {
        let dir = tempfile::tempdir().unwrap();
        let service = setup(&dir);
        let book = service.create_book(create_request("T1", "Drama"), None).await.unwrap();

        let update = UpdateBook {
            title: "T2".to_string(),
            author: "Other".to_string(),
            genre: "Poetry".to_string(),
            image: book.image.clone(),
            system_entry_date: "2024-02-01".to_string(),
            synopsis: "New".to_string(),
        };
        let updated = service.update_book(&book.id, update.clone(), None).await.unwrap();
        assert_eq!(updated.id, book.id);
        assert_eq!(updated.title, "T2");
        assert_eq!(updated.status, book.status);

        assert!(matches!(
            service.update_book("missing", update, None).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_update_book_requires_fields() {
        let dir = tempfile::tempdir().unwrap();
        let service = setup(&dir);
        let book = service.create_book(create_request("T1", "Drama"), None).await.unwrap();

        let update = UpdateBook {
            title: String::new(),
            author: "Other".to_string(),
            genre: "Poetry".to_string(),
            image: String::new(),
            system_entry_date: "2024-02-01".to_string(),
            synopsis: "New".to_string(),
        };

        let Err(AppError::Validation(msg)) = service.update_book(&book.id, update, None).await else {
            panic!("expected validation error");
        };
        assert!(msg.contains("Title is required"));
        assert!(msg.contains("Image is required"));
        assert_eq!(service.get_book(&book.id).unwrap(), book);
    }
}
