//! Rental lifecycle service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        book::{BorrowBook, DeactivateBook, DEACTIVATION_REASON_MIN_LEN},
        Book, RentalRecord,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct RentalsService {
    repository: Repository,
}

impl RentalsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Every rental record, book by book in storage order
    pub fn list_all(&self) -> Vec<RentalRecord> {
        self.repository
            .books_all()
            .into_iter()
            .flat_map(|b| b.rent_history)
            .collect()
    }

    /// Rental history of one book
    pub fn list_for_book(&self, id: &str) -> AppResult<Vec<RentalRecord>> {
        Ok(self.repository.books_get_by_id(id)?.rent_history)
    }

    /// Lend a book to a student
    pub async fn borrow(&self, id: &str, data: BorrowBook) -> AppResult<Book> {
        data.validate()?;

        let rental = RentalRecord::from(data);
        let book = self
            .repository
            .books_update(id, move |book| book.borrow(rental))
            .await?;
        tracing::info!("Book {} borrowed", book.id);
        Ok(book)
    }

    /// Take a rented book back
    pub async fn return_book(&self, id: &str) -> AppResult<Book> {
        let book = self.repository.books_update(id, Book::return_book).await?;
        tracing::info!("Book {} returned", book.id);
        Ok(book)
    }

    /// Withdraw a book from circulation
    pub async fn deactivate(&self, id: &str, data: DeactivateBook) -> AppResult<Book> {
        data.validate().map_err(|_| {
            AppError::MissingReason(format!(
                "reason must be at least {} characters",
                DEACTIVATION_REASON_MIN_LEN
            ))
        })?;

        let book = self
            .repository
            .books_update(id, move |book| book.deactivate(data.description))
            .await?;
        tracing::info!("Book {} deactivated", book.id);
        Ok(book)
    }

    /// Put a withdrawn book back into circulation
    pub async fn activate(&self, id: &str) -> AppResult<Book> {
        let book = self.repository.books_update(id, Book::activate).await?;
        tracing::info!("Book {} activated", book.id);
        Ok(book)
    }
}
