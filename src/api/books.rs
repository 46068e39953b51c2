//! Book (catalog) endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::Multipart;
use serde::de::DeserializeOwned;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::{
        book::{CreateBook, UpdateBook},
        Book,
    },
    services::assets::Upload,
};

/// Multipart form accepted by create and update
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct BookForm {
    /// JSON-encoded book fields
    pub book: String,
    /// Optional cover image file
    #[schema(value_type = Option<String>, format = Binary)]
    pub image: Option<Vec<u8>>,
}

/// Read the `book` JSON field and the optional `image` file from a form
async fn read_book_form<T: DeserializeOwned>(
    mut multipart: Multipart,
) -> AppResult<(T, Option<Upload>)> {
    let mut data = None;
    let mut upload = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("book") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                let parsed = serde_json::from_str(&text)
                    .map_err(|e| AppError::BadRequest(format!("Invalid book field: {}", e)))?;
                data = Some(parsed);
            }
            Some("image") => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                if !bytes.is_empty() {
                    upload = Some(Upload {
                        file_name,
                        bytes: bytes.to_vec(),
                    });
                }
            }
            _ => {}
        }
    }

    let data = data.ok_or_else(|| AppError::Validation("book: Field is required".to_string()))?;
    Ok((data, upload))
}

/// List all books ordered by title
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    responses(
        (status = 200, description = "Books ordered by title", body = Vec<Book>)
    )
)]
pub async fn list_books(State(state): State<crate::AppState>) -> Json<Vec<Book>> {
    Json(state.services.catalog.list_books())
}

/// List distinct genres
#[utoipa::path(
    get,
    path = "/books/genres",
    tag = "books",
    responses(
        (status = 200, description = "Sorted distinct genres", body = Vec<String>)
    )
)]
pub async fn list_genres(State(state): State<crate::AppState>) -> Json<Vec<String>> {
    Json(state.services.catalog.list_genres())
}

/// Get book details by ID
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(("id" = String, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Book>> {
    let book = state.services.catalog.get_book(&id)?;
    Ok(Json(book))
}

/// Create a new book
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body(content = BookForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 400, description = "Missing or empty fields", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<Book>)> {
    let (data, upload) = read_book_form::<CreateBook>(multipart).await?;
    let book = state.services.catalog.create_book(data, upload).await?;
    Ok((StatusCode::CREATED, Json(book)))
}

/// Edit a book's descriptive fields
#[utoipa::path(
    patch,
    path = "/books/{id}",
    tag = "books",
    params(("id" = String, Path, description = "Book ID")),
    request_body(content = BookForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 400, description = "Missing or empty fields", body = crate::error::ErrorResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> AppResult<Json<Book>> {
    let (data, upload) = read_book_form::<UpdateBook>(multipart).await?;
    let book = state.services.catalog.update_book(&id, data, upload).await?;
    Ok(Json(book))
}
