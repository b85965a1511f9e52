//! Bookshelf
//!
//! An in-memory book catalog served over a REST JSON API, with lookup,
//! filtering, sorting and pagination of the stored books.

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

impl AppState {
    /// Build the state, seeding the catalog unless the config turns it off
    pub fn new(config: AppConfig) -> Self {
        let store = if config.catalog.seed {
            repository::books::BookStore::seeded()
        } else {
            repository::books::BookStore::empty()
        };

        Self {
            config: Arc::new(config),
            services: Arc::new(services::Services::new(repository::Repository::new(store))),
        }
    }
}
