//! Authentication endpoints

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use super::JsonBody;
use crate::{error::AppResult, models::LoginRequest};

/// Login response
#[derive(Serialize, ToSchema)]
pub struct LoginResponse {
    /// Always true on success
    pub auth: bool,
}

/// Check librarian credentials
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Credentials accepted", body = LoginResponse),
        (status = 400, description = "Malformed email or missing password", body = crate::error::ErrorResponse),
        (status = 404, description = "Invalid email or password", body = crate::error::ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<crate::AppState>,
    JsonBody(request): JsonBody<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    state.services.auth.login(&request)?;
    Ok(Json(LoginResponse { auth: true }))
}
