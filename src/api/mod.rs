//! API handlers for Biblioteca REST endpoints

pub mod auth;
pub mod books;
pub mod health;
pub mod openapi;
pub mod rentals;

use axum::{
    async_trait,
    body::Bytes,
    extract::{DefaultBodyLimit, FromRequest, Request},
    routing::{get, patch, post},
    Router,
};
use serde::de::DeserializeOwned;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::{error::AppError, AppState};

/// JSON request body whose failures come back as `AppError`.
///
/// An empty body yields `T::default()`, leaving required fields to the
/// validation rules of `T`.
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(JsonBody(T::default()));
        }

        serde_json::from_slice(&bytes).map(JsonBody).map_err(|e| {
            if e.is_data() {
                AppError::Validation(e.to_string())
            } else {
                AppError::BadRequest(format!("Invalid JSON body: {}", e))
            }
        })
    }
}

/// Largest accepted request body, sized for cover images
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Create the application router with all routes
pub fn router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let uploads = ServeDir::new(&state.config.storage.upload_dir);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Authentication
        .route("/auth/login", post(auth::login))
        // Books (catalog)
        .route("/books", get(books::list_books).post(books::create_book))
        .route("/books/genres", get(books::list_genres))
        .route("/books/:id", get(books::get_book).patch(books::update_book))
        // Rental lifecycle
        .route("/books/:id/borrow", patch(rentals::borrow_book))
        .route("/books/:id/return", patch(rentals::return_book))
        .route("/books/:id/deactivate", patch(rentals::deactivate_book))
        .route("/books/:id/activate", patch(rentals::activate_book))
        .route("/rentals", get(rentals::list_rentals))
        .route("/rentals/:id", get(rentals::list_book_rentals))
        // Stored cover images
        .nest_service("/uploads", uploads)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state);

    // OpenAPI documentation
    let openapi = openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
