//! Book (catalog entry) model and its rental state machine

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};

/// Minimum number of characters in a deactivation reason
pub const DEACTIVATION_REASON_MIN_LEN: u64 = 10;

/// Availability of a book.
///
/// `is_rented` and `is_active` are independent axes: deactivating a rented
/// book does not return it, and reactivating does not make it available.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookStatus {
    pub is_rented: bool,
    pub is_active: bool,
    /// Reason for withdrawal; empty while active
    #[serde(default)]
    pub description: String,
}

impl Default for BookStatus {
    fn default() -> Self {
        Self {
            is_rented: false,
            is_active: true,
            description: String::new(),
        }
    }
}

/// One loan event. Immutable once appended to a book's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RentalRecord {
    pub student_name: String,
    pub class: String,
    pub withdrawal_date: String,
    /// Planned return date
    pub delivery_date: String,
}

/// Catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: String,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub status: BookStatus,
    /// Stored cover image reference
    #[serde(default)]
    pub image: String,
    pub system_entry_date: String,
    pub synopsis: String,
    #[serde(default)]
    pub rent_history: Vec<RentalRecord>,
}

/// Create book request
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateBook {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Author is required"))]
    pub author: String,
    #[validate(length(min = 1, message = "Genre is required"))]
    pub genre: String,
    /// Filled from the uploaded file when one is sent
    #[validate(length(min = 1, message = "Image is required"))]
    pub image: String,
    #[validate(length(min = 1, message = "System entry date is required"))]
    pub system_entry_date: String,
    #[validate(length(min = 1, message = "Synopsis is required"))]
    pub synopsis: String,
}

/// Full edit of a book's descriptive fields
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateBook {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Author is required"))]
    pub author: String,
    #[validate(length(min = 1, message = "Genre is required"))]
    pub genre: String,
    /// Existing reference; replaced when a new file is uploaded
    #[validate(length(min = 1, message = "Image is required"))]
    pub image: String,
    #[validate(length(min = 1, message = "System entry date is required"))]
    pub system_entry_date: String,
    #[validate(length(min = 1, message = "Synopsis is required"))]
    pub synopsis: String,
}

/// Borrow request
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct BorrowBook {
    #[validate(length(min = 1, message = "Student name is required"))]
    pub student_name: String,
    #[validate(length(min = 1, message = "Class is required"))]
    pub class: String,
    #[validate(length(min = 1, message = "Withdrawal date is required"))]
    pub withdrawal_date: String,
    #[validate(length(min = 1, message = "Delivery date is required"))]
    pub delivery_date: String,
}

/// Deactivation request
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct DeactivateBook {
    #[validate(length(min = DEACTIVATION_REASON_MIN_LEN, message = "Reason must be at least 10 characters"))]
    pub description: String,
}

impl From<BorrowBook> for RentalRecord {
    fn from(data: BorrowBook) -> Self {
        Self {
            student_name: data.student_name,
            class: data.class,
            withdrawal_date: data.withdrawal_date,
            delivery_date: data.delivery_date,
        }
    }
}

impl Book {
    /// Build a new, available and active book with a fresh identifier
    pub fn new(data: CreateBook) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: data.title,
            author: data.author,
            genre: data.genre,
            status: BookStatus::default(),
            image: data.image,
            system_entry_date: data.system_entry_date,
            synopsis: data.synopsis,
            rent_history: Vec::new(),
        }
    }

    /// Replace descriptive fields. Identity, status and history are untouched.
    pub fn apply_update(&mut self, data: UpdateBook) {
        self.title = data.title;
        self.author = data.author;
        self.genre = data.genre;
        self.image = data.image;
        self.system_entry_date = data.system_entry_date;
        self.synopsis = data.synopsis;
    }

    /// Lend the book. `AlreadyRented` takes precedence over `Inactive`.
    pub fn borrow(&mut self, rental: RentalRecord) -> AppResult<()> {
        if self.status.is_rented {
            return Err(AppError::AlreadyRented(self.id.clone()));
        }
        if !self.status.is_active {
            return Err(AppError::Inactive(self.id.clone()));
        }

        self.status.is_rented = true;
        self.rent_history.push(rental);
        Ok(())
    }

    /// Mark the book as back on the shelf; history is kept.
    pub fn return_book(&mut self) -> AppResult<()> {
        if !self.status.is_rented {
            return Err(AppError::NotRented(self.id.clone()));
        }

        self.status.is_rented = false;
        Ok(())
    }

    /// Withdraw the book from circulation. Allowed from any state; an
    /// inactive book gets its reason overwritten.
    pub fn deactivate(&mut self, description: String) -> AppResult<()> {
        if (description.chars().count() as u64) < DEACTIVATION_REASON_MIN_LEN {
            return Err(AppError::MissingReason(format!(
                "reason must be at least {} characters",
                DEACTIVATION_REASON_MIN_LEN
            )));
        }

        self.status.is_active = false;
        self.status.description = description;
        Ok(())
    }

    /// Put a withdrawn book back into circulation
    pub fn activate(&mut self) -> AppResult<()> {
        if self.status.is_active {
            return Err(AppError::AlreadyActive(self.id.clone()));
        }

        self.status.is_active = true;
        self.status.description.clear();
        Ok(())
    }
}
