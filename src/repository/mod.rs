//! Repository layer for in-memory storage

pub mod books;

use books::{BookStore, BooksRepository};

/// Main repository struct holding the stores
#[derive(Clone)]
pub struct Repository {
    pub books: BooksRepository,
}

impl Repository {
    /// Create a new repository around the given book store
    pub fn new(store: BookStore) -> Self {
        Self {
            books: BooksRepository::new(store),
        }
    }
}
