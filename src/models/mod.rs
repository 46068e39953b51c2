//! Data models for Biblioteca

pub mod book;
pub mod credential;
pub mod document;

// Re-export commonly used types
pub use book::{Book, BookStatus, RentalRecord};
pub use credential::{Credential, LoginRequest};
pub use document::Document;
