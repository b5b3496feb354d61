//! Tests for the JSON-file store.

use chrono::Utc;
use tempfile::tempdir;

use super::*;
use crate::domain::{LoanStatus, Role};

fn draft(isbn: &str, total: u32) -> NewBook {
    NewBook {
        isbn: isbn.to_owned(),
        title: format!("Title {isbn}"),
        author: "Author".to_owned(),
        publisher: String::new(),
        category: "History".to_owned(),
        price: 2.5,
        total,
        publish_date: "2020-01-01".to_owned(),
        description: String::new(),
    }
}

#[tokio::test]
async fn open_initialises_an_empty_directory() {
    let dir = tempdir().expect("temp dir");
    let store = JsonFileStore::open(dir.path().join("data")).expect("open");
    let catalog: &dyn CatalogRepository = &store;
    let ledger: &dyn LoanRepository = &store;
    let directory: &dyn UserRepository = &store;

    assert!(catalog.list().await.expect("books").is_empty());
    assert!(ledger.list().await.expect("loans").is_empty());
    assert!(directory.list().await.expect("users").is_empty());
}

#[tokio::test]
async fn mutations_survive_a_reopen() {
    let dir = tempdir().expect("temp dir");

    {
        let store = JsonFileStore::open(dir.path()).expect("open");
        let catalog: &dyn CatalogRepository = &store;
        let ledger: &dyn LoanRepository = &store;
        let directory: &dyn UserRepository = &store;

        let book = catalog.insert(draft("isbn-1", 4)).await.expect("insert book");
        ledger
            .append(NewLoan::issue(1, book.id, "Ada".to_owned(), book.title.clone(), Utc::now()))
            .await
            .expect("append loan");
        directory
            .insert(NewUser {
                username: "ada".to_owned(),
                password_digest: "digest".to_owned(),
                role: Role::Member,
                name: String::new(),
                email: String::new(),
                phone: String::new(),
                created_at: Utc::now(),
            })
            .await
            .expect("insert user");
    }

    let reopened = JsonFileStore::open(dir.path()).expect("reopen");
    let catalog: &dyn CatalogRepository = &reopened;
    let ledger: &dyn LoanRepository = &reopened;
    let directory: &dyn UserRepository = &reopened;

    let books = catalog.list().await.expect("books");
    assert_eq!(books.len(), 1);
    assert_eq!(books.first().map(|book| book.isbn.as_str()), Some("isbn-1"));
    assert_eq!(ledger.list().await.expect("loans").len(), 1);
    let users = directory.list().await.expect("users");
    assert_eq!(users.first().map(|user| user.username.as_str()), Some("ada"));
}

#[tokio::test]
async fn updates_rewrite_the_persisted_document() {
    let dir = tempdir().expect("temp dir");

    {
        let store = JsonFileStore::open(dir.path()).expect("open");
        let ledger: &dyn LoanRepository = &store;
        let record = ledger
            .append(NewLoan::issue(1, 1, "Ada".to_owned(), "T".to_owned(), Utc::now()))
            .await
            .expect("append");
        let returned = record.into_returned(Utc::now());
        assert!(ledger.update(&returned).await.expect("update"));
    }

    let reopened = JsonFileStore::open(dir.path()).expect("reopen");
    let ledger: &dyn LoanRepository = &reopened;
    let loans = ledger.list().await.expect("loans");
    assert_eq!(loans.first().map(|record| record.status), Some(LoanStatus::Returned));
}

#[tokio::test]
async fn documents_are_human_readable_json() {
    let dir = tempdir().expect("temp dir");
    let store = JsonFileStore::open(dir.path()).expect("open");
    let catalog: &dyn CatalogRepository = &store;
    catalog.insert(draft("isbn-9", 1)).await.expect("insert");

    let raw = std::fs::read_to_string(dir.path().join("books.json")).expect("books.json");
    assert!(raw.contains("\"isbn\": \"isbn-9\""));
    // No temp file left behind after the rename.
    assert!(!dir.path().join("books.json.tmp").exists());
}

#[tokio::test]
async fn missing_records_do_not_touch_disk() {
    let dir = tempdir().expect("temp dir");
    let store = JsonFileStore::open(dir.path()).expect("open");
    let catalog: &dyn CatalogRepository = &store;

    assert!(!catalog.delete(9).await.expect("delete"));
    assert!(!dir.path().join("books.json").exists());
}

#[tokio::test]
async fn corrupt_documents_fail_to_open() {
    let dir = tempdir().expect("temp dir");
    std::fs::write(dir.path().join("books.json"), "{not json").expect("write");
    assert!(JsonFileStore::open(dir.path()).is_err());
}
