//! Biblioteca
//!
//! A school library record service: librarian login, a book catalog, and a
//! borrow/return/deactivate/activate lifecycle per book, all persisted to a
//! single JSON document.

use std::sync::Arc;

pub mod api;
pub mod collation;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
