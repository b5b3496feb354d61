//! In-memory store backing all three repositories.
//!
//! The default runtime store and the workhorse of the test suite. Each
//! collection sits behind its own `RwLock`; identity assignment follows the
//! store contract (`max(existing) + 1`, `1` when empty).

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::domain::loan::NewLoan;
use crate::domain::ports::{
    CatalogRepository, CatalogRepositoryError, LoanRepository, LoanRepositoryError, NewUser,
    UserRepository, UserRepositoryError,
};
use crate::domain::{Book, LoanRecord, NewBook, User};

/// Lock-guarded vectors, one per collection.
#[derive(Debug, Default)]
pub struct MemoryStore {
    books: RwLock<Vec<Book>>,
    users: RwLock<Vec<User>>,
    loans: RwLock<Vec<LoanRecord>>,
}

fn next_id(ids: impl Iterator<Item = i64>) -> i64 {
    ids.max().unwrap_or(0) + 1
}

impl MemoryStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read_books(&self) -> Result<RwLockReadGuard<'_, Vec<Book>>, CatalogRepositoryError> {
        self.books
            .read()
            .map_err(|_| CatalogRepositoryError::connection("book collection lock poisoned"))
    }

    fn write_books(&self) -> Result<RwLockWriteGuard<'_, Vec<Book>>, CatalogRepositoryError> {
        self.books
            .write()
            .map_err(|_| CatalogRepositoryError::connection("book collection lock poisoned"))
    }

    fn read_users(&self) -> Result<RwLockReadGuard<'_, Vec<User>>, UserRepositoryError> {
        self.users
            .read()
            .map_err(|_| UserRepositoryError::connection("user collection lock poisoned"))
    }

    fn write_users(&self) -> Result<RwLockWriteGuard<'_, Vec<User>>, UserRepositoryError> {
        self.users
            .write()
            .map_err(|_| UserRepositoryError::connection("user collection lock poisoned"))
    }

    fn read_loans(&self) -> Result<RwLockReadGuard<'_, Vec<LoanRecord>>, LoanRepositoryError> {
        self.loans
            .read()
            .map_err(|_| LoanRepositoryError::connection("loan collection lock poisoned"))
    }

    fn write_loans(&self) -> Result<RwLockWriteGuard<'_, Vec<LoanRecord>>, LoanRepositoryError> {
        self.loans
            .write()
            .map_err(|_| LoanRepositoryError::connection("loan collection lock poisoned"))
    }
}

#[async_trait]
impl CatalogRepository for MemoryStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<Book>, CatalogRepositoryError> {
        Ok(self.read_books()?.iter().find(|book| book.id == id).cloned())
    }

    async fn find_by_isbn(&self, isbn: &str) -> Result<Option<Book>, CatalogRepositoryError> {
        Ok(self.read_books()?.iter().find(|book| book.isbn == isbn).cloned())
    }

    async fn list(&self) -> Result<Vec<Book>, CatalogRepositoryError> {
        Ok(self.read_books()?.clone())
    }

    async fn insert(&self, draft: NewBook) -> Result<Book, CatalogRepositoryError> {
        let mut books = self.write_books()?;
        let book = draft.into_book(next_id(books.iter().map(|book| book.id)));
        books.push(book.clone());
        Ok(book)
    }

    async fn update(&self, book: &Book) -> Result<bool, CatalogRepositoryError> {
        let mut books = self.write_books()?;
        match books.iter_mut().find(|stored| stored.id == book.id) {
            Some(stored) => {
                *stored = book.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn set_stock(&self, id: i64, stock: u32) -> Result<bool, CatalogRepositoryError> {
        let mut books = self.write_books()?;
        match books.iter_mut().find(|stored| stored.id == id) {
            Some(stored) => {
                stored.stock = stock;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: i64) -> Result<bool, CatalogRepositoryError> {
        let mut books = self.write_books()?;
        let before = books.len();
        books.retain(|book| book.id != id);
        Ok(books.len() < before)
    }
}

#[async_trait]
impl LoanRepository for MemoryStore {
    async fn append(&self, draft: NewLoan) -> Result<LoanRecord, LoanRepositoryError> {
        let mut loans = self.write_loans()?;
        let record = draft.into_record(next_id(loans.iter().map(|record| record.id)));
        loans.push(record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<LoanRecord>, LoanRepositoryError> {
        Ok(self.read_loans()?.iter().find(|record| record.id == id).cloned())
    }

    async fn update(&self, record: &LoanRecord) -> Result<bool, LoanRepositoryError> {
        let mut loans = self.write_loans()?;
        match loans.iter_mut().find(|stored| stored.id == record.id) {
            Some(stored) => {
                *stored = record.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list(&self) -> Result<Vec<LoanRecord>, LoanRepositoryError> {
        Ok(self.read_loans()?.clone())
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, UserRepositoryError> {
        Ok(self.read_users()?.iter().find(|user| user.id == id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserRepositoryError> {
        Ok(self
            .read_users()?
            .iter()
            .find(|user| user.username == username)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<User>, UserRepositoryError> {
        Ok(self.read_users()?.clone())
    }

    async fn insert(&self, draft: NewUser) -> Result<User, UserRepositoryError> {
        let mut users = self.write_users()?;
        let user = draft.into_user(next_id(users.iter().map(|user| user.id)));
        users.push(user.clone());
        Ok(user)
    }

    async fn update(&self, user: &User) -> Result<bool, UserRepositoryError> {
        let mut users = self.write_users()?;
        match users.iter_mut().find(|stored| stored.id == user.id) {
            Some(stored) => {
                *stored = user.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: i64) -> Result<bool, UserRepositoryError> {
        let mut users = self.write_users()?;
        let before = users.len();
        users.retain(|user| user.id != id);
        Ok(users.len() < before)
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
