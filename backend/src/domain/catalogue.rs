//! Catalogue services: book CRUD, filtered listings, category reads.

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use pagination::Page;
use tracing::info;

use crate::domain::ports::{
    BookPatch, CatalogRepository, CatalogRepositoryError, CatalogueCommand, CatalogueQuery,
    ListBooksRequest,
};
use crate::domain::{Book, BookValidationError, Error, NewBook};

fn map_catalog_error(error: CatalogRepositoryError) -> Error {
    Error::internal(format!("catalogue store failure: {error}"))
}

/// Catalogue use-cases over the catalogue store.
pub struct CatalogueService<C> {
    catalog_repo: Arc<C>,
}

impl<C> CatalogueService<C> {
    /// Create the service over its store.
    pub fn new(catalog_repo: Arc<C>) -> Self {
        Self { catalog_repo }
    }
}

#[async_trait]
impl<C> CatalogueCommand for CatalogueService<C>
where
    C: CatalogRepository,
{
    async fn create_book(&self, draft: NewBook) -> Result<Book, Error> {
        draft
            .validate()
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        let duplicate = self
            .catalog_repo
            .find_by_isbn(&draft.isbn)
            .await
            .map_err(map_catalog_error)?;
        if duplicate.is_some() {
            return Err(Error::conflict(format!(
                "isbn {} is already catalogued",
                draft.isbn
            )));
        }

        let book = self
            .catalog_repo
            .insert(draft)
            .await
            .map_err(map_catalog_error)?;
        info!(book_id = book.id, title = %book.title, "book catalogued");
        Ok(book)
    }

    async fn update_book(&self, id: i64, patch: BookPatch) -> Result<Book, Error> {
        let mut book = self
            .catalog_repo
            .find_by_id(id)
            .await
            .map_err(map_catalog_error)?
            .ok_or_else(|| Error::not_found(format!("book {id} not found")))?;

        if let Some(title) = patch.title {
            book.title = title;
        }
        if let Some(author) = patch.author {
            book.author = author;
        }
        if let Some(publisher) = patch.publisher {
            book.publisher = publisher;
        }
        if let Some(category) = patch.category {
            book.category = category;
        }
        if let Some(price) = patch.price {
            book.price = price;
        }
        if let Some(publish_date) = patch.publish_date {
            book.publish_date = publish_date;
        }
        if let Some(description) = patch.description {
            book.description = description;
        }
        if let Some(total) = patch.total {
            book = book.with_total(total).map_err(|err| match err {
                BookValidationError::TotalBelowBorrowed { .. } => Error::conflict(err.to_string()),
                other => Error::invalid_request(other.to_string()),
            })?;
        }

        let updated = self
            .catalog_repo
            .update(&book)
            .await
            .map_err(map_catalog_error)?;
        if !updated {
            return Err(Error::not_found(format!("book {id} not found")));
        }
        Ok(book)
    }

    async fn delete_book(&self, id: i64) -> Result<(), Error> {
        let deleted = self
            .catalog_repo
            .delete(id)
            .await
            .map_err(map_catalog_error)?;
        if !deleted {
            return Err(Error::not_found(format!("book {id} not found")));
        }
        info!(book_id = id, "book removed from catalogue");
        Ok(())
    }
}

#[async_trait]
impl<C> CatalogueQuery for CatalogueService<C>
where
    C: CatalogRepository,
{
    async fn list_books(&self, request: ListBooksRequest) -> Result<Page<Book>, Error> {
        let mut books = self.catalog_repo.list().await.map_err(map_catalog_error)?;
        let filter = request.filter;
        if let Some(title) = &filter.title {
            books.retain(|book| book.title.contains(title.as_str()));
        }
        if let Some(author) = &filter.author {
            books.retain(|book| book.author.contains(author.as_str()));
        }
        if let Some(category) = &filter.category {
            books.retain(|book| book.category == *category);
        }
        Ok(Page::from_items(books, request.page))
    }

    async fn get_book(&self, id: i64) -> Result<Book, Error> {
        self.catalog_repo
            .find_by_id(id)
            .await
            .map_err(map_catalog_error)?
            .ok_or_else(|| Error::not_found(format!("book {id} not found")))
    }

    async fn list_categories(&self) -> Result<Vec<String>, Error> {
        let books = self.catalog_repo.list().await.map_err(map_catalog_error)?;
        let categories: BTreeSet<String> = books
            .into_iter()
            .map(|book| book.category)
            .filter(|category| !category.is_empty())
            .collect();
        Ok(categories.into_iter().collect())
    }
}

#[cfg(test)]
#[path = "catalogue_tests.rs"]
mod tests;
