//! HTTP request handlers

pub mod chaos;
pub mod health;
pub mod inventory;
pub mod metrics;
pub mod orders;

use axum::http::Uri;

use crate::error::ApiError;

/// Fallback for unknown storefront routes
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("Route {} not found", uri.path()))
}
