//! Driving port for catalogue reads.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{Book, Error};

/// Substring and category filters for book listings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BookFilter {
    /// Substring match on the title.
    pub title: Option<String>,
    /// Substring match on the author.
    pub author: Option<String>,
    /// Exact match on the category.
    pub category: Option<String>,
}

/// Filtered, paged book listing request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListBooksRequest {
    /// Listing filters; empty filters match everything.
    pub filter: BookFilter,
    /// Page selection.
    pub page: PageRequest,
}

/// Port reading the catalogue.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogueQuery: Send + Sync {
    /// List books in identity order.
    async fn list_books(&self, request: ListBooksRequest) -> Result<Page<Book>, Error>;

    /// Fetch one book.
    async fn get_book(&self, id: i64) -> Result<Book, Error>;

    /// Distinct non-empty categories, sorted.
    async fn list_categories(&self) -> Result<Vec<String>, Error>;
}

/// Fixture implementation for tests that do not exercise catalogue reads.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCatalogueQuery;

#[async_trait]
impl CatalogueQuery for FixtureCatalogueQuery {
    async fn list_books(&self, request: ListBooksRequest) -> Result<Page<Book>, Error> {
        Ok(Page::from_items(Vec::new(), request.page))
    }

    async fn get_book(&self, id: i64) -> Result<Book, Error> {
        Err(Error::not_found(format!("book {id} not found")))
    }

    async fn list_categories(&self) -> Result<Vec<String>, Error> {
        Ok(Vec::new())
    }
}
