//! Alexandria Library Lending Record Keeper
//!
//! Tracks books, readers and which reader currently holds which book,
//! enforcing that a book is never lent beyond its physical exemplar
//! count. Exposes a REST JSON API.

use std::sync::Arc;

pub mod api;
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
