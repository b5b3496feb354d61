//! JSON-file store backing all three repositories.
//!
//! One pretty-printed JSON document per collection (`books.json`,
//! `users.json`, `borrow_records.json`) in a configured data directory.
//! Every mutation rewrites the affected document through a temp file and
//! rename, so a crash mid-write never leaves a truncated document, and the
//! in-memory image only commits after the write lands on disk.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::info;

use crate::domain::loan::NewLoan;
use crate::domain::ports::{
    CatalogRepository, CatalogRepositoryError, LoanRepository, LoanRepositoryError, NewUser,
    UserRepository, UserRepositoryError,
};
use crate::domain::{Book, LoanRecord, NewBook, User};

const BOOKS_FILE: &str = "books.json";
const USERS_FILE: &str = "users.json";
const LOANS_FILE: &str = "borrow_records.json";

fn next_id(ids: impl Iterator<Item = i64>) -> i64 {
    ids.max().unwrap_or(0) + 1
}

fn load_collection<T: DeserializeOwned>(path: &Path) -> io::Result<Vec<T>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let raw = fs::read_to_string(path)?;
    serde_json::from_str(&raw).map_err(io::Error::other)
}

fn write_atomic<T: Serialize>(path: &Path, items: &[T]) -> io::Result<()> {
    let json = serde_json::to_string_pretty(items).map_err(io::Error::other)?;
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)
}

/// Durable store over a data directory of JSON documents.
pub struct JsonFileStore {
    dir: PathBuf,
    books: RwLock<Vec<Book>>,
    users: RwLock<Vec<User>>,
    loans: RwLock<Vec<LoanRecord>>,
}

impl JsonFileStore {
    /// Open (or initialise) the store in `dir`.
    ///
    /// # Errors
    ///
    /// Returns an [`io::Error`] when the directory cannot be created or an
    /// existing document fails to parse.
    pub fn open(dir: impl Into<PathBuf>) -> io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        let books = load_collection(&dir.join(BOOKS_FILE))?;
        let users = load_collection(&dir.join(USERS_FILE))?;
        let loans = load_collection(&dir.join(LOANS_FILE))?;
        info!(
            dir = %dir.display(),
            books = books.len(),
            users = users.len(),
            loans = loans.len(),
            "json store opened"
        );
        Ok(Self {
            dir,
            books: RwLock::new(books),
            users: RwLock::new(users),
            loans: RwLock::new(loans),
        })
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

    fn persist_books(&self, books: &[Book]) -> Result<(), CatalogRepositoryError> {
        write_atomic(&self.dir.join(BOOKS_FILE), books)
            .map_err(|err| CatalogRepositoryError::query(format!("persisting books: {err}")))
    }

    fn persist_users(&self, users: &[User]) -> Result<(), UserRepositoryError> {
        write_atomic(&self.dir.join(USERS_FILE), users)
            .map_err(|err| UserRepositoryError::query(format!("persisting users: {err}")))
    }

    fn persist_loans(&self, loans: &[LoanRecord]) -> Result<(), LoanRepositoryError> {
        write_atomic(&self.dir.join(LOANS_FILE), loans)
            .map_err(|err| LoanRepositoryError::query(format!("persisting loans: {err}")))
    }
}

#[async_trait]
impl CatalogRepository for JsonFileStore {
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
        let mut next = books.clone();
        next.push(book.clone());
        self.persist_books(&next)?;
        *books = next;
        Ok(book)
    }

    async fn update(&self, book: &Book) -> Result<bool, CatalogRepositoryError> {
        let mut books = self.write_books()?;
        let mut next = books.clone();
        let Some(stored) = next.iter_mut().find(|stored| stored.id == book.id) else {
            return Ok(false);
        };
        *stored = book.clone();
        self.persist_books(&next)?;
        *books = next;
        Ok(true)
    }

    async fn set_stock(&self, id: i64, stock: u32) -> Result<bool, CatalogRepositoryError> {
        let mut books = self.write_books()?;
        let mut next = books.clone();
        let Some(stored) = next.iter_mut().find(|stored| stored.id == id) else {
            return Ok(false);
        };
        stored.stock = stock;
        self.persist_books(&next)?;
        *books = next;
        Ok(true)
    }

    async fn delete(&self, id: i64) -> Result<bool, CatalogRepositoryError> {
        let mut books = self.write_books()?;
        let mut next = books.clone();
        let before = next.len();
        next.retain(|book| book.id != id);
        if next.len() == before {
            return Ok(false);
        }
        self.persist_books(&next)?;
        *books = next;
        Ok(true)
    }
}

#[async_trait]
impl LoanRepository for JsonFileStore {
    async fn append(&self, draft: NewLoan) -> Result<LoanRecord, LoanRepositoryError> {
        let mut loans = self.write_loans()?;
        let record = draft.into_record(next_id(loans.iter().map(|record| record.id)));
        let mut next = loans.clone();
        next.push(record.clone());
        self.persist_loans(&next)?;
        *loans = next;
        Ok(record)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<LoanRecord>, LoanRepositoryError> {
        Ok(self.read_loans()?.iter().find(|record| record.id == id).cloned())
    }

    async fn update(&self, record: &LoanRecord) -> Result<bool, LoanRepositoryError> {
        let mut loans = self.write_loans()?;
        let mut next = loans.clone();
        let Some(stored) = next.iter_mut().find(|stored| stored.id == record.id) else {
            return Ok(false);
        };
        *stored = record.clone();
        self.persist_loans(&next)?;
        *loans = next;
        Ok(true)
    }

    async fn list(&self) -> Result<Vec<LoanRecord>, LoanRepositoryError> {
        Ok(self.read_loans()?.clone())
    }
}

#[async_trait]
impl UserRepository for JsonFileStore {
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
        let mut next = users.clone();
        next.push(user.clone());
        self.persist_users(&next)?;
        *users = next;
        Ok(user)
    }

    async fn update(&self, user: &User) -> Result<bool, UserRepositoryError> {
        let mut users = self.write_users()?;
        let mut next = users.clone();
        let Some(stored) = next.iter_mut().find(|stored| stored.id == user.id) else {
            return Ok(false);
        };
        *stored = user.clone();
        self.persist_users(&next)?;
        *users = next;
        Ok(true)
    }

    async fn delete(&self, id: i64) -> Result<bool, UserRepositoryError> {
        let mut users = self.write_users()?;
        let mut next = users.clone();
        let before = next.len();
        next.retain(|user| user.id != id);
        if next.len() == before {
            return Ok(false);
        }
        self.persist_users(&next)?;
        *users = next;
        Ok(true)
    }
}

#[cfg(test)]
#[path = "json_store_tests.rs"]
mod tests;
