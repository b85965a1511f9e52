//! Catalog management service

use crate::{
    error::{AppError, AppResult},
    models::book::{
        AdvancedQuery, Book, CreateBook, PatchBook, PriceRangeQuery, ReplaceBook, SortField,
        SortOrder, SortQuery,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Book {} not found", id))
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list_books(&self) -> Vec<Book> {
        self.repository.books.list().await
    }

    pub async fn count_books(&self) -> usize {
        self.repository.books.count().await
    }

    /// Get a book by ID; `None` when no book carries that ID
    pub async fn get_book(&self, id: i64) -> Option<Book> {
        self.repository.books.get(id).await
    }

    /// Add a book under a server-assigned ID and return the whole catalog
    pub async fn create_book(&self, data: CreateBook) -> Vec<Book> {
        let books = self.repository.books.create(data).await;
        if let Some(created) = books.last() {
            tracing::info!("Catalog create: book id={} \"{}\"", created.id, created.title);
        }
        books
    }

    pub async fn replace_book(&self, id: i64, data: ReplaceBook) -> AppResult<Book> {
        tracing::debug!("Catalog replace: book id={}", id);
        self.repository
            .books
            .replace(id, data.title, data.author, data.price)
            .await
            .ok_or_else(|| not_found(id))
    }

    pub async fn patch_book(&self, id: i64, data: PatchBook) -> AppResult<Book> {
        tracing::debug!("Catalog patch: book id={}", id);
        self.repository
            .books
            .patch(id, data)
            .await
            .ok_or_else(|| not_found(id))
    }

    pub async fn delete_book(&self, id: i64) -> AppResult<()> {
        if !self.repository.books.delete(id).await {
            return Err(not_found(id));
        }
        tracing::info!("Catalog delete: book id={}", id);
        Ok(())
    }

    pub async fn page(&self, offset: i64, limit: i64) -> Vec<Book> {
        self.repository.books.page(offset, limit).await
    }

    /// Price filter, price sort and pagination in one pass
    pub async fn query_advanced(&self, query: &AdvancedQuery) -> Vec<Book> {
        self.repository
            .books
            .query_advanced(
                query.offset,
                query.limit,
                query.price_above,
                query.cutoff_price,
                query.ascending,
            )
            .await
    }

    pub async fn search_by_title(&self, title: &str) -> Vec<Book> {
        self.repository.books.search_by_title(title).await
    }

    pub async fn filter_by_price_range(&self, query: &PriceRangeQuery) -> Vec<Book> {
        self.repository
            .books
            .filter_by_price_range(query.min_price, query.max_price)
            .await
    }

    pub async fn sorted(&self, query: &SortQuery) -> Vec<Book> {
        let field = SortField::from(query.sort_by.as_str());
        let order = SortOrder::from(query.order.as_str());
        self.repository.books.sorted(field, order).await
    }
}
