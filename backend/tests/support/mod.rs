//! Shared helpers for HTTP integration tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use actix_http::Request;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{Error, test as actix_test};
use chrono::{DateTime, Duration, Local, Utc};
use mockable::{Clock, DefaultClock};
use serde_json::{Value, json};

use backend::inbound::http::state::HttpState;
use backend::outbound::persistence::MemoryStore;
use backend::server::state_from_store;

/// State over a fresh in-memory store with the real clock.
pub fn memory_state() -> HttpState {
    state_from_store(Arc::new(MemoryStore::new()), Arc::new(DefaultClock))
}

/// State over a fresh in-memory store with a steppable clock.
pub fn stepping_state() -> (HttpState, Arc<SteppingClock>) {
    let clock = Arc::new(SteppingClock::new(Utc::now()));
    let state = state_from_store(Arc::new(MemoryStore::new()), clock.clone());
    (state, clock)
}

/// Clock frozen at a chosen instant, advanced explicitly by tests.
pub struct SteppingClock(Mutex<DateTime<Utc>>);

impl SteppingClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    pub fn advance_days(&self, days: i64) {
        let mut guard = match self.0.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("clock mutex"),
        };
        *guard += Duration::days(days);
    }
}

impl Clock for SteppingClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        match self.0.lock() {
            Ok(guard) => *guard,
            Err(_) => panic!("clock mutex"),
        }
    }
}

/// Catalogue a book through the API and return its identity.
pub async fn create_book<S>(app: &S, title: &str, category: &str, total: u32) -> i64
where
    S: Service<Request, Response = ServiceResponse, Error = Error>,
{
    let response = actix_test::call_service(
        app,
        actix_test::TestRequest::post()
            .uri("/api/books")
            .set_json(json!({
                "isbn": format!("isbn-{title}"),
                "title": title,
                "author": "Author",
                "category": category,
                "total": total,
            }))
            .to_request(),
    )
    .await;
    assert!(response.status().is_success(), "book creation failed");
    let body: Value = actix_test::read_body_json(response).await;
    body.get("id").and_then(Value::as_i64).expect("book id")
}

/// Issue a borrow through the API and return the raw response.
pub async fn borrow<S>(app: &S, user_id: i64, book_id: i64) -> ServiceResponse
where
    S: Service<Request, Response = ServiceResponse, Error = Error>,
{
    actix_test::call_service(
        app,
        actix_test::TestRequest::post()
            .uri("/api/borrow")
            .set_json(json!({ "userId": user_id, "bookId": book_id, "userName": "Reader" }))
            .to_request(),
    )
    .await
}

/// Return a loan through the API and return the raw response.
pub async fn return_loan<S>(app: &S, record_id: i64) -> ServiceResponse
where
    S: Service<Request, Response = ServiceResponse, Error = Error>,
{
    actix_test::call_service(
        app,
        actix_test::TestRequest::post()
            .uri(&format!("/api/borrow/{record_id}/return"))
            .to_request(),
    )
    .await
}

/// Fetch a book through the API; `None` when it is gone.
pub async fn get_book<S>(app: &S, book_id: i64) -> Option<Value>
where
    S: Service<Request, Response = ServiceResponse, Error = Error>,
{
    let response = actix_test::call_service(
        app,
        actix_test::TestRequest::get()
            .uri(&format!("/api/books/{book_id}"))
            .to_request(),
    )
    .await;
    if response.status().is_success() {
        Some(actix_test::read_body_json(response).await)
    } else {
        None
    }
}

/// Current shelf count of a book.
pub async fn stock_of<S>(app: &S, book_id: i64) -> u64
where
    S: Service<Request, Response = ServiceResponse, Error = Error>,
{
    get_book(app, book_id)
        .await
        .and_then(|book| book.get("stock").and_then(Value::as_u64))
        .expect("book stock")
}
