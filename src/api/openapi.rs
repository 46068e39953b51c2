//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, books, health, rentals};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Biblioteca API",
        version = "0.1.0",
        description = "School library catalog and rental records REST API"
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::login,
        // Books
        books::list_books,
        books::list_genres,
        books::get_book,
        books::create_book,
        books::update_book,
        // Rentals
        rentals::list_rentals,
        rentals::list_book_rentals,
        rentals::borrow_book,
        rentals::return_book,
        rentals::deactivate_book,
        rentals::activate_book,
    ),
    components(
        schemas(
            // Auth
            crate::models::LoginRequest,
            auth::LoginResponse,
            // Books
            crate::models::Book,
            crate::models::BookStatus,
            crate::models::RentalRecord,
            crate::models::book::CreateBook,
            crate::models::book::UpdateBook,
            books::BookForm,
            // Rentals
            crate::models::book::BorrowBook,
            crate::models::book::DeactivateBook,
            // Health
            health::HealthResponse,
            health::ReadinessResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Authentication endpoints"),
        (name = "books", description = "Catalog management"),
        (name = "rentals", description = "Rental lifecycle")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
