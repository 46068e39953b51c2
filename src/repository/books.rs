//! Book domain methods on Repository

use super::Repository;
use crate::{
    collation,
    error::{AppError, AppResult},
    models::Book,
};

impl Repository {
    /// Find a book by identifier
    pub fn books_find_by_id(&self, id: &str) -> Option<Book> {
        self.snapshot().book(id).cloned()
    }

    /// Get a book by identifier or fail with NotFound
    pub fn books_get_by_id(&self, id: &str) -> AppResult<Book> {
        self.books_find_by_id(id)
            .ok_or_else(|| AppError::NotFound(id.to_string()))
    }

    /// All books in storage order
    pub fn books_all(&self) -> Vec<Book> {
        self.snapshot().books.clone()
    }

    /// All books ordered by title
    pub fn books_list(&self) -> Vec<Book> {
        let mut books = self.books_all();
        books.sort_by(|a, b| collation::compare(&a.title, &b.title));
        books
    }

    pub fn books_count(&self) -> usize {
        self.snapshot().books.len()
    }

    /// Append a new book and persist
    pub async fn books_insert(&self, book: Book) -> AppResult<Book> {
        self.commit(move |document| {
            if document.book(&book.id).is_some() {
                return Err(AppError::Internal(format!("Duplicate book id {}", book.id)));
            }
            document.books.push(book.clone());
            Ok(book)
        })
        .await
    }

    /// Mutate one book in place and persist.
    ///
    /// If `mutator` fails nothing is written and the book is left as it was.
    pub async fn books_update<F>(&self, id: &str, mutator: F) -> AppResult<Book>
    where
        F: FnOnce(&mut Book) -> AppResult<()>,
    {
        self.commit(|document| {
            let book = document
                .book_mut(id)
                .ok_or_else(|| AppError::NotFound(id.to_string()))?;
            mutator(book)?;
            Ok(book.clone())
        })
        .await
    }
}
