//! API handlers for Alexandria REST endpoints

pub mod books;
pub mod health;
pub mod openapi;
pub mod readers;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::IntoParams;

/// Search query parameters
#[derive(Deserialize, IntoParams)]
pub struct SearchQuery {
    /// Substring to match, case-insensitive
    #[serde(rename = "searchText")]
    pub search_text: String,
}

/// Render a list result: 200 with the body, or 204 when the query
/// matched nothing. Distinct from 404, which is reserved for a missing
/// single entity.
pub(crate) fn list_or_no_content<T: Serialize>(items: Vec<T>) -> Response {
    if items.is_empty() {
        StatusCode::NO_CONTENT.into_response()
    } else {
        Json(items).into_response()
    }
}
