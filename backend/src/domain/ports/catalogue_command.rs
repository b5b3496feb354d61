//! Driving port for catalogue mutations.

use async_trait::async_trait;

use crate::domain::{Book, Error, NewBook};

/// Field-level merge payload for a catalogue update.
///
/// Absent fields keep their stored value. A changed `total` re-derives
/// `stock` so copies currently on loan stay accounted for.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BookPatch {
    /// New title.
    pub title: Option<String>,
    /// New author.
    pub author: Option<String>,
    /// New publisher.
    pub publisher: Option<String>,
    /// New category.
    pub category: Option<String>,
    /// New list price.
    pub price: Option<f64>,
    /// New copy count owned by the library.
    pub total: Option<u32>,
    /// New publication date.
    pub publish_date: Option<String>,
    /// New description.
    pub description: Option<String>,
}

/// Port executing catalogue mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogueCommand: Send + Sync {
    /// Catalogue a new title; ISBNs are unique.
    async fn create_book(&self, draft: NewBook) -> Result<Book, Error>;

    /// Merge a patch into an existing record.
    async fn update_book(&self, id: i64, patch: BookPatch) -> Result<Book, Error>;

    /// Remove a title. Outstanding loans survive; their return skips the
    /// stock increment.
    async fn delete_book(&self, id: i64) -> Result<(), Error>;
}

/// Fixture implementation for tests that do not exercise catalogue writes.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCatalogueCommand;

#[async_trait]
impl CatalogueCommand for FixtureCatalogueCommand {
    async fn create_book(&self, draft: NewBook) -> Result<Book, Error> {
        Ok(draft.into_book(1))
    }

    async fn update_book(&self, id: i64, _patch: BookPatch) -> Result<Book, Error> {
        Err(Error::not_found(format!("book {id} not found")))
    }

    async fn delete_book(&self, id: i64) -> Result<(), Error> {
        Err(Error::not_found(format!("book {id} not found")))
    }
}
