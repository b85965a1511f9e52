//! In-memory book storage and query logic

use std::sync::Arc;

use indexmap::IndexMap;
use rust_decimal::Decimal;
use tokio::sync::RwLock;

use crate::models::book::{Book, CreateBook, PatchBook, SortField, SortOrder};

/// Ordered collection of books plus the identifier counter.
///
/// Identifiers are assigned from `next_id` and never handed out twice, even
/// after the book holding one is deleted.
#[derive(Debug, Clone)]
pub struct BookStore {
    books: IndexMap<i64, Book>,
    next_id: i64,
}

const SEED: [(&str, &str, i64); 15] = [
    ("Spring Boot in Action", "Craig Walls", 3999),
    ("Effective Java", "Joshua Bloch", 4500),
    ("Clean Code", "Robert Martin", 4250),
    ("Java Concurrency in Practice", "Brian Goetz", 4999),
    ("Design Patterns", "Gang of Four", 5499),
    ("Head First Java", "Kathy Sierra", 3500),
    ("Spring in Action", "Craig Walls", 4499),
    ("Clean Architecture", "Robert Martin", 3999),
    ("Refactoring", "Martin Fowler", 4750),
    ("The Pragmatic Programmer", "Andrew Hunt", 4199),
    ("You Don't Know JS", "Kyle Simpson", 2999),
    ("JavaScript: The Good Parts", "Douglas Crockford", 3250),
    ("Eloquent JavaScript", "Marijn Haverbeke", 2799),
    ("Python Crash Course", "Eric Matthes", 3800),
    ("Automate the Boring Stuff", "Al Sweigart", 3350),
];

impl BookStore {
    /// Store with no books; the first id handed out is 1
    pub fn empty() -> Self {
        Self {
            books: IndexMap::new(),
            next_id: 1,
        }
    }

    /// Store pre-loaded with the 15 demo books (ids 1 to 15)
    pub fn seeded() -> Self {
        let mut store = Self::empty();
        for (title, author, cents) in SEED {
            store.insert(CreateBook {
                title: title.to_string(),
                author: author.to_string(),
                price: Decimal::new(cents, 2),
            });
        }
        store
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn list(&self) -> Vec<Book> {
        self.books.values().cloned().collect()
    }

    pub fn get(&self, id: i64) -> Option<Book> {
        self.books.get(&id).cloned()
    }

    fn insert(&mut self, data: CreateBook) {
        let id = self.next_id;
        self.next_id += 1;
        self.books.insert(
            id,
            Book {
                id,
                title: data.title,
                author: data.author,
                price: data.price,
            },
        );
    }

    /// Append a book under a fresh id and return the whole collection
    pub fn create(&mut self, data: CreateBook) -> Vec<Book> {
        self.insert(data);
        self.list()
    }

    pub fn replace(&mut self, id: i64, title: String, author: String, price: Decimal) -> Option<Book> {
        let book = self.books.get_mut(&id)?;
        book.title = title;
        book.author = author;
        book.price = price;
        Some(book.clone())
    }

    /// Apply the present fields; blank titles and authors are ignored
    pub fn patch(&mut self, id: i64, data: PatchBook) -> Option<Book> {
        let book = self.books.get_mut(&id)?;

        if let Some(title) = data.title.filter(|t| !t.trim().is_empty()) {
            book.title = title;
        }
        if let Some(author) = data.author.filter(|a| !a.trim().is_empty()) {
            book.author = author;
        }
        if let Some(price) = data.price {
            book.price = price;
        }

        Some(book.clone())
    }

    /// Remove a book, keeping the order of the others. Returns false if absent.
    pub fn delete(&mut self, id: i64) -> bool {
        self.books.shift_remove(&id).is_some()
    }

    pub fn page(&self, offset: i64, limit: i64) -> Vec<Book> {
        paginate(self.books.values(), offset, limit)
    }

    /// Filter by price, sort by price, then paginate, always in that order
    pub fn query_advanced(
        &self,
        offset: i64,
        limit: i64,
        price_above: bool,
        cutoff_price: Decimal,
        ascending: bool,
    ) -> Vec<Book> {
        let mut matching: Vec<&Book> = self
            .books
            .values()
            .filter(|b| {
                if price_above {
                    b.price > cutoff_price
                } else {
                    b.price < cutoff_price
                }
            })
            .collect();

        if ascending {
            matching.sort_by(|a, b| a.price.cmp(&b.price));
        } else {
            matching.sort_by(|a, b| b.price.cmp(&a.price));
        }

        paginate(matching, offset, limit)
    }

    /// Case-insensitive substring match on title. An empty query matches everything.
    pub fn search_by_title(&self, title: &str) -> Vec<Book> {
        if title.is_empty() {
            return self.list();
        }

        let needle = title.to_lowercase();
        self.books
            .values()
            .filter(|b| b.title.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }

    /// Inclusive on both ends; a missing bound is unconstrained
    pub fn filter_by_price_range(&self, min_price: Option<Decimal>, max_price: Option<Decimal>) -> Vec<Book> {
        self.books
            .values()
            .filter(|b| min_price.map_or(true, |min| b.price >= min))
            .filter(|b| max_price.map_or(true, |max| b.price <= max))
            .cloned()
            .collect()
    }

    pub fn sorted(&self, field: SortField, order: SortOrder) -> Vec<Book> {
        let mut books = self.list();
        match order {
            SortOrder::Asc => books.sort_by(|a, b| sort_key(a, field).cmp(sort_key(b, field))),
            // Stable, so equal keys keep their collection order
            SortOrder::Desc => books.sort_by(|a, b| sort_key(b, field).cmp(sort_key(a, field))),
        }
        books
    }
}

fn sort_key(book: &Book, field: SortField) -> &str {
    match field {
        SortField::Author => &book.author,
        SortField::Title => &book.title,
    }
}

/// Skip `offset` then take at most `limit`. Negative offsets start at 0,
/// non-positive limits give nothing.
fn paginate<'a, I>(books: I, offset: i64, limit: i64) -> Vec<Book>
where
    I: IntoIterator<Item = &'a Book>,
{
    if limit <= 0 {
        return Vec::new();
    }

    let skip = usize::try_from(offset.max(0)).unwrap_or(usize::MAX);
    let take = usize::try_from(limit).unwrap_or(usize::MAX);

    books.into_iter().skip(skip).take(take).cloned().collect()
}

/// Shared handle to the book store; one writer at a time
#[derive(Clone)]
pub struct BooksRepository {
    store: Arc<RwLock<BookStore>>,
}

impl BooksRepository {
    pub fn new(store: BookStore) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
        }
    }

    pub async fn list(&self) -> Vec<Book> {
        self.store.read().await.list()
    }

    pub async fn count(&self) -> usize {
        self.store.read().await.len()
    }

    pub async fn get(&self, id: i64) -> Option<Book> {
        self.store.read().await.get(id)
    }

    pub async fn create(&self, data: CreateBook) -> Vec<Book> {
        self.store.write().await.create(data)
    }

    pub async fn replace(&self, id: i64, title: String, author: String, price: Decimal) -> Option<Book> {
        self.store.write().await.replace(id, title, author, price)
    }

    pub async fn patch(&self, id: i64, data: PatchBook) -> Option<Book> {
        self.store.write().await.patch(id, data)
    }

    pub async fn delete(&self, id: i64) -> bool {
        self.store.write().await.delete(id)
    }

    pub async fn page(&self, offset: i64, limit: i64) -> Vec<Book> {
        self.store.read().await.page(offset, limit)
    }

    pub async fn query_advanced(
        &self,
        offset: i64,
        limit: i64,
        price_above: bool,
        cutoff_price: Decimal,
        ascending: bool,
    ) -> Vec<Book> {
        self.store
            .read()
            .await
            .query_advanced(offset, limit, price_above, cutoff_price, ascending)
    }

    pub async fn search_by_title(&self, title: &str) -> Vec<Book> {
        self.store.read().await.search_by_title(title)
    }

    pub async fn filter_by_price_range(&self, min_price: Option<Decimal>, max_price: Option<Decimal>) -> Vec<Book> {
        self.store.read().await.filter_by_price_range(min_price, max_price)
    }

    pub async fn sorted(&self, field: SortField, order: SortOrder) -> Vec<Book> {
        self.store.read().await.sorted(field, order)
    }
}
