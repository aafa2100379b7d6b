pub mod admin;
pub mod bookings;
pub mod health;
pub mod teams;
pub mod venues;

use axum::http::HeaderMap;

use crate::errors::AppError;

pub const USER_ID_HEADER: &str = "x-user-id";

/// The caller's user id as supplied by the identity layer. Treated as opaque.
#[allow(clippy::result_large_err)]
pub fn user_id(headers: &HeaderMap) -> Result<String, AppError> {
    headers
        .get(USER_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or(AppError::Unauthorized)
}
