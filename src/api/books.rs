//! Book catalog endpoints

use axum::{extract::State, http::StatusCode, Json};

use crate::{
    error::AppResult,
    models::book::{
        AdvancedQuery, Book, CreateBook, PageQuery, PatchBook, PriceRangeQuery, ReplaceBook,
        SearchQuery, SortQuery,
    },
};

use super::{ApiJson, ApiPath, ApiQuery};

/// List all books in catalog order
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    responses(
        (status = 200, description = "All books", body = Vec<Book>)
    )
)]
pub async fn list_books(State(state): State<crate::AppState>) -> Json<Vec<Book>> {
    Json(state.services.catalog.list_books().await)
}

/// Get a book by ID (`null` when absent)
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i64, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book details, or null", body = Book),
        (status = 400, description = "Invalid ID", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Json<Option<Book>> {
    Json(state.services.catalog.get_book(id).await)
}

/// Add a book; the server assigns its ID
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = CreateBook,
    responses(
        (status = 200, description = "All books, including the new one", body = Vec<Book>),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    ApiJson(data): ApiJson<CreateBook>,
) -> Json<Vec<Book>> {
    Json(state.services.catalog.create_book(data).await)
}

/// Replace title, author and price of a book
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i64, Path, description = "Book ID"), ReplaceBook),
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 400, description = "Missing or invalid field", body = crate::error::ErrorResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn replace_book(
    State(state): State<crate::AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiQuery(data): ApiQuery<ReplaceBook>,
) -> AppResult<Json<Book>> {
    let book = state.services.catalog.replace_book(id, data).await?;
    Ok(Json(book))
}

/// Update the given fields of a book
#[utoipa::path(
    patch,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i64, Path, description = "Book ID"), PatchBook),
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn patch_book(
    State(state): State<crate::AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiQuery(data): ApiQuery<PatchBook>,
) -> AppResult<Json<Book>> {
    let book = state.services.catalog.patch_book(id, data).await?;
    Ok(Json(book))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i64, Path, description = "Book ID")),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<StatusCode> {
    state.services.catalog.delete_book(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Offset/limit slice of the catalog
#[utoipa::path(
    get,
    path = "/books/paginated",
    tag = "books",
    params(PageQuery),
    responses(
        (status = 200, description = "Page of books", body = Vec<Book>)
    )
)]
pub async fn get_page(
    State(state): State<crate::AppState>,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> Json<Vec<Book>> {
    Json(state.services.catalog.page(query.offset, query.limit).await)
}

/// Filter by price cutoff, sort by price, then paginate
#[utoipa::path(
    get,
    path = "/books/advanced",
    tag = "books",
    params(AdvancedQuery),
    responses(
        (status = 200, description = "Filtered, sorted page of books", body = Vec<Book>)
    )
)]
pub async fn query_advanced(
    State(state): State<crate::AppState>,
    ApiQuery(query): ApiQuery<AdvancedQuery>,
) -> Json<Vec<Book>> {
    Json(state.services.catalog.query_advanced(&query).await)
}

/// Search books by title (case-insensitive)
#[utoipa::path(
    get,
    path = "/books/search",
    tag = "books",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching books", body = Vec<Book>)
    )
)]
pub async fn search_by_title(
    State(state): State<crate::AppState>,
    ApiQuery(query): ApiQuery<SearchQuery>,
) -> Json<Vec<Book>> {
    Json(state.services.catalog.search_by_title(&query.title).await)
}

/// Books within an inclusive price range
#[utoipa::path(
    get,
    path = "/books/price-range",
    tag = "books",
    params(PriceRangeQuery),
    responses(
        (status = 200, description = "Books in range", body = Vec<Book>)
    )
)]
pub async fn filter_by_price_range(
    State(state): State<crate::AppState>,
    ApiQuery(query): ApiQuery<PriceRangeQuery>,
) -> Json<Vec<Book>> {
    Json(state.services.catalog.filter_by_price_range(&query).await)
}

/// All books sorted by title or author
#[utoipa::path(
    get,
    path = "/books/sorted",
    tag = "books",
    params(SortQuery),
    responses(
        (status = 200, description = "Sorted books", body = Vec<Book>)
    )
)]
pub async fn sorted_books(
    State(state): State<crate::AppState>,
    ApiQuery(query): ApiQuery<SortQuery>,
) -> Json<Vec<Book>> {
    Json(state.services.catalog.sorted(&query).await)
}
