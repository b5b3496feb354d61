//! Driven port for the catalogue store.
//!
//! The circulation engine only reads titles and moves `stock`; the wider
//! catalogue surface also inserts, merges, and deletes records. Identity
//! assignment (`max(existing) + 1`, `1` when empty) is owned by the adapter.

use async_trait::async_trait;

use crate::domain::{Book, NewBook};

use super::define_port_error;

define_port_error! {
    /// Errors raised by catalogue store adapters.
    pub enum CatalogRepositoryError {
        /// Store could not be reached or opened.
        Connection { message: String } =>
            "catalogue store connection failed: {message}",
        /// Read or write failed during execution.
        Query { message: String } =>
            "catalogue store query failed: {message}",
    }
}

/// Port for reading and mutating catalogue records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Fetch a book by identity.
    async fn find_by_id(&self, id: i64) -> Result<Option<Book>, CatalogRepositoryError>;

    /// Fetch a book by its unique ISBN.
    async fn find_by_isbn(&self, isbn: &str) -> Result<Option<Book>, CatalogRepositoryError>;

    /// All catalogue records in identity order.
    async fn list(&self) -> Result<Vec<Book>, CatalogRepositoryError>;

    /// Insert a new record, assigning the next identity.
    async fn insert(&self, draft: NewBook) -> Result<Book, CatalogRepositoryError>;

    /// Replace the record matching `book.id`; `false` when it is gone.
    async fn update(&self, book: &Book) -> Result<bool, CatalogRepositoryError>;

    /// Write a new shelf count; `false` when the book is gone.
    async fn set_stock(&self, id: i64, stock: u32) -> Result<bool, CatalogRepositoryError>;

    /// Delete a record; `false` when it was already gone.
    async fn delete(&self, id: i64) -> Result<bool, CatalogRepositoryError>;
}

/// Fixture implementation for tests that do not exercise catalogue access.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCatalogRepository;

#[async_trait]
impl CatalogRepository for FixtureCatalogRepository {
    async fn find_by_id(&self, _id: i64) -> Result<Option<Book>, CatalogRepositoryError> {
        Ok(None)
    }

    async fn find_by_isbn(&self, _isbn: &str) -> Result<Option<Book>, CatalogRepositoryError> {
        Ok(None)
    }

    async fn list(&self) -> Result<Vec<Book>, CatalogRepositoryError> {
        Ok(Vec::new())
    }

    async fn insert(&self, draft: NewBook) -> Result<Book, CatalogRepositoryError> {
        Ok(draft.into_book(1))
    }

    async fn update(&self, _book: &Book) -> Result<bool, CatalogRepositoryError> {
        Ok(false)
    }

    async fn set_stock(&self, _id: i64, _stock: u32) -> Result<bool, CatalogRepositoryError> {
        Ok(false)
    }

    async fn delete(&self, _id: i64) -> Result<bool, CatalogRepositoryError> {
        Ok(false)
    }
}
