//! Rental lifecycle endpoints

use axum::{
    extract::{Path, State},
    Json,
};

use super::JsonBody;
use crate::{
    error::{AppError, AppResult},
    models::{
        book::{BorrowBook, DeactivateBook},
        Book, RentalRecord,
    },
};

/// List every rental record
#[utoipa::path(
    get,
    path = "/rentals",
    tag = "rentals",
    responses(
        (status = 200, description = "All rental records, book by book", body = Vec<RentalRecord>)
    )
)]
pub async fn list_rentals(State(state): State<crate::AppState>) -> Json<Vec<RentalRecord>> {
    Json(state.services.rentals.list_all())
}

/// List the rental history of one book
#[utoipa::path(
    get,
    path = "/rentals/{id}",
    tag = "rentals",
    params(("id" = String, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Rental history", body = Vec<RentalRecord>),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_book_rentals(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<RentalRecord>>> {
    Ok(Json(state.services.rentals.list_for_book(&id)?))
}

/// Lend a book
#[utoipa::path(
    patch,
    path = "/books/{id}/borrow",
    tag = "rentals",
    params(("id" = String, Path, description = "Book ID")),
    request_body = BorrowBook,
    responses(
        (status = 200, description = "Book borrowed", body = Book),
        (status = 400, description = "Missing or empty fields", body = crate::error::ErrorResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Book already rented or inactive", body = crate::error::ErrorResponse)
    )
)]
pub async fn borrow_book(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
    JsonBody(data): JsonBody<BorrowBook>,
) -> AppResult<Json<Book>> {
    Ok(Json(state.services.rentals.borrow(&id, data).await?))
}

/// Return a borrowed book
#[utoipa::path(
    patch,
    path = "/books/{id}/return",
    tag = "rentals",
    params(("id" = String, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book returned", body = Book),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Book is not rented", body = crate::error::ErrorResponse)
    )
)]
pub async fn return_book(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Book>> {
    Ok(Json(state.services.rentals.return_book(&id).await?))
}

/// Withdraw a book from circulation
#[utoipa::path(
    patch,
    path = "/books/{id}/deactivate",
    tag = "rentals",
    params(("id" = String, Path, description = "Book ID")),
    request_body = DeactivateBook,
    responses(
        (status = 200, description = "Book deactivated", body = Book),
        (status = 400, description = "Missing or too short reason", body = crate::error::ErrorResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn deactivate_book(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
    body: Result<JsonBody<DeactivateBook>, AppError>,
) -> AppResult<Json<Book>> {
    // An unreadable body carries no reason
    let JsonBody(data) = body.map_err(|e| AppError::MissingReason(e.to_string()))?;
    Ok(Json(state.services.rentals.deactivate(&id, data).await?))
}

/// Put a book back into circulation
#[utoipa::path(
    patch,
    path = "/books/{id}/activate",
    tag = "rentals",
    params(("id" = String, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book activated", body = Book),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Book already active", body = crate::error::ErrorResponse)
    )
)]
pub async fn activate_book(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Book>> {
    Ok(Json(state.services.rentals.activate(&id).await?))
}
