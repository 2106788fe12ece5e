//! LocalLibrary catalog server
//!
//! Books, authors, genres and physical copies stored in PostgreSQL, exposed
//! through a REST JSON API, plus the home page count report.

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
