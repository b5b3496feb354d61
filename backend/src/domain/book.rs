//! Catalogue book entity.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Validation failures raised when constructing or mutating a [`Book`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookValidationError {
    /// The ISBN is empty after trimming.
    #[error("isbn must not be empty")]
    EmptyIsbn,
    /// The title is empty after trimming.
    #[error("title must not be empty")]
    EmptyTitle,
    /// A copy count below the number of copies currently on loan.
    #[error("total of {total} is below the {borrowed} copies currently on loan")]
    TotalBelowBorrowed {
        /// Requested total copy count.
        total: u32,
        /// Copies currently on loan.
        borrowed: u32,
    },
}

/// A catalogue title with fungible copies.
///
/// ## Invariants
/// - `stock <= total` at all times.
/// - `total − stock` equals the number of active loans for this book;
///   circulation moves `stock` by exactly one per borrow/return and nothing
///   else moves it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Store-assigned identity, monotonic from 1.
    pub id: i64,
    /// Unique ISBN.
    pub isbn: String,
    /// Title shown in listings and snapshotted onto loans.
    pub title: String,
    /// Primary author.
    pub author: String,
    /// Publishing house.
    pub publisher: String,
    /// Shelving category; empty when uncatalogued.
    pub category: String,
    /// List price in currency units.
    pub price: f64,
    /// Copies currently on the shelf.
    pub stock: u32,
    /// Copies owned by the library.
    pub total: u32,
    /// Publication date, `YYYY-MM-DD`.
    pub publish_date: String,
    /// One-line description.
    pub description: String,
}

impl Book {
    /// Copies currently out on loan.
    #[must_use]
    pub const fn borrowed(&self) -> u32 {
        self.total.saturating_sub(self.stock)
    }

    /// Re-derive `stock` for a new copy count, preserving active loans.
    ///
    /// # Errors
    ///
    /// Returns [`BookValidationError::TotalBelowBorrowed`] when the new total
    /// cannot cover the copies currently on loan.
    pub fn with_total(mut self, total: u32) -> Result<Self, BookValidationError> {
        let borrowed = self.borrowed();
        if total < borrowed {
            return Err(BookValidationError::TotalBelowBorrowed { total, borrowed });
        }
        self.total = total;
        self.stock = total - borrowed;
        Ok(self)
    }
}

/// Payload for inserting a book; the catalogue store assigns the identity.
///
/// `stock` starts equal to `total`: a freshly catalogued title has no loans.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBook {
    /// Unique ISBN.
    pub isbn: String,
    /// Title shown in listings.
    pub title: String,
    /// Primary author.
    pub author: String,
    /// Publishing house.
    pub publisher: String,
    /// Shelving category.
    pub category: String,
    /// List price in currency units.
    pub price: f64,
    /// Copies owned by the library.
    pub total: u32,
    /// Publication date, `YYYY-MM-DD`.
    pub publish_date: String,
    /// One-line description.
    pub description: String,
}

impl NewBook {
    /// Validate the payload.
    ///
    /// # Errors
    ///
    /// Returns [`BookValidationError`] when the ISBN or title is blank.
    pub fn validate(&self) -> Result<(), BookValidationError> {
        if self.isbn.trim().is_empty() {
            return Err(BookValidationError::EmptyIsbn);
        }
        if self.title.trim().is_empty() {
            return Err(BookValidationError::EmptyTitle);
        }
        Ok(())
    }

    /// Materialise the book with a store-assigned identity.
    #[must_use]
    pub fn into_book(self, id: i64) -> Book {
        Book {
            id,
            isbn: self.isbn,
            title: self.title,
            author: self.author,
            publisher: self.publisher,
            category: self.category,
            price: self.price,
            stock: self.total,
            total: self.total,
            publish_date: self.publish_date,
            description: self.description,
        }
    }
}
