//! Business logic services

pub mod assets;
pub mod auth;
pub mod catalog;
pub mod rentals;

use std::sync::Arc;

use crate::repository::Repository;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub catalog: catalog::CatalogService,
    pub rentals: rentals::RentalsService,
    repository: Repository,
}

impl Services {
    /// Create all services over the given repository
    pub fn new(repository: Repository, assets: Arc<dyn assets::AssetStorage>) -> Self {
        Self {
            auth: auth::AuthService::new(repository.clone()),
            catalog: catalog::CatalogService::new(repository.clone(), assets),
            rentals: rentals::RentalsService::new(repository.clone()),
            repository,
        }
    }

    /// Number of books currently loaded, for readiness reporting
    pub fn loaded_books(&self) -> usize {
        self.repository.books_count()
    }
}
