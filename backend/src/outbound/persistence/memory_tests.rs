//! Tests for the in-memory store.

use chrono::Utc;

use super::*;
use crate::domain::Role;

fn draft(isbn: &str, total: u32) -> NewBook {
    NewBook {
        isbn: isbn.to_owned(),
        title: format!("Title {isbn}"),
        author: "Author".to_owned(),
        publisher: String::new(),
        category: "Computing".to_owned(),
        price: 1.0,
        total,
        publish_date: String::new(),
        description: String::new(),
    }
}

fn user_draft(username: &str) -> NewUser {
    NewUser {
        username: username.to_owned(),
        password_digest: "digest".to_owned(),
        role: Role::Member,
        name: String::new(),
        email: String::new(),
        phone: String::new(),
        created_at: Utc::now(),
    }
}

#[tokio::test]
async fn insert_assigns_max_plus_one_identities() {
    let store = MemoryStore::new();
    let catalog: &dyn CatalogRepository = &store;

    let first = catalog.insert(draft("a", 1)).await.expect("insert");
    let second = catalog.insert(draft("b", 1)).await.expect("insert");
    assert_eq!((first.id, second.id), (1, 2));

    // Deleting the highest identity frees it for reuse; the rule is
    // max(existing) + 1, not a persistent counter.
    assert!(catalog.delete(2).await.expect("delete"));
    let third = catalog.insert(draft("c", 1)).await.expect("insert");
    assert_eq!(third.id, 2);
}

#[tokio::test]
async fn set_stock_reports_missing_books() {
    let store = MemoryStore::new();
    let catalog: &dyn CatalogRepository = &store;

    let book = catalog.insert(draft("a", 3)).await.expect("insert");
    assert!(catalog.set_stock(book.id, 2).await.expect("set stock"));
    let reloaded = catalog.find_by_id(book.id).await.expect("find").expect("present");
    assert_eq!(reloaded.stock, 2);

    assert!(!catalog.set_stock(99, 1).await.expect("set stock"));
}

#[tokio::test]
async fn loans_append_and_update_in_place() {
    let store = MemoryStore::new();
    let ledger: &dyn LoanRepository = &store;

    let record = ledger
        .append(NewLoan::issue(1, 2, "Ada".to_owned(), "T".to_owned(), Utc::now()))
        .await
        .expect("append");
    assert_eq!(record.id, 1);

    let returned = record.clone().into_returned(Utc::now());
    assert!(ledger.update(&returned).await.expect("update"));
    let reloaded = ledger.find_by_id(record.id).await.expect("find").expect("present");
    assert_eq!(reloaded.status, crate::domain::LoanStatus::Returned);

    assert_eq!(ledger.list().await.expect("list").len(), 1);
}

#[tokio::test]
async fn users_are_found_by_username() {
    let store = MemoryStore::new();
    let directory: &dyn UserRepository = &store;

    let user = directory.insert(user_draft("ada")).await.expect("insert");
    let found = directory
        .find_by_username("ada")
        .await
        .expect("find")
        .expect("present");
    assert_eq!(found.id, user.id);
    assert!(directory.find_by_username("ghost").await.expect("find").is_none());
}
