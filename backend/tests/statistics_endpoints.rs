//! Statistics aggregation over the HTTP surface with the in-memory store.

mod support;

use actix_web::{App, http::StatusCode, test as actix_test, web};
use serde_json::Value;

use backend::server::api_scope;
use support::{borrow, create_book, memory_state, return_loan};

async fn fetch_statistics<S>(app: &S) -> Value
where
    S: actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
{
    let response = actix_test::call_service(
        app,
        actix_test::TestRequest::get().uri("/api/statistics").to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    actix_test::read_body_json(response).await
}

#[actix_web::test]
async fn ranking_and_counts_follow_borrow_activity() {
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(memory_state()))
            .service(api_scope()),
    )
    .await;
    let book_a = create_book(&app, "Book A", "Computing", 5).await;
    let book_b = create_book(&app, "Book B", "History", 5).await;

    for user_id in 1..=3 {
        assert_eq!(borrow(&app, user_id, book_a).await.status(), StatusCode::OK);
    }
    assert_eq!(borrow(&app, 1, book_b).await.status(), StatusCode::OK);

    let statistics = fetch_statistics(&app).await;
    assert_eq!(statistics.get("totalBorrows").and_then(Value::as_u64), Some(4));
    assert_eq!(statistics.get("currentBorrowed").and_then(Value::as_u64), Some(4));
    assert_eq!(statistics.get("overdueCount").and_then(Value::as_u64), Some(0));
    assert_eq!(statistics.get("totalBooks").and_then(Value::as_u64), Some(2));

    let ranking: Vec<(String, u64)> = statistics
        .get("bookRanking")
        .and_then(Value::as_array)
        .expect("ranking")
        .iter()
        .map(|entry| {
            (
                entry.get("title").and_then(Value::as_str).expect("title").to_owned(),
                entry.get("count").and_then(Value::as_u64).expect("count"),
            )
        })
        .collect();
    assert_eq!(
        ranking,
        vec![("Book A".to_owned(), 3), ("Book B".to_owned(), 1)]
    );

    let categories = statistics.get("categoryStats").expect("category stats");
    assert_eq!(categories.get("Computing").and_then(Value::as_u64), Some(3));
    assert_eq!(categories.get("History").and_then(Value::as_u64), Some(1));

    // All four borrows happened just now, in the newest month bucket.
    let months = statistics
        .get("monthlyStats")
        .and_then(Value::as_array)
        .expect("monthly stats");
    assert_eq!(months.len(), 6);
    assert_eq!(
        months.last().and_then(|bucket| bucket.get("count")).and_then(Value::as_u64),
        Some(4)
    );
}

#[actix_web::test]
async fn returns_leave_the_ledger_total_but_free_current_borrows() {
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(memory_state()))
            .service(api_scope()),
    )
    .await;
    let book_id = create_book(&app, "Cycled", "Computing", 1).await;

    let response = borrow(&app, 1, book_id).await;
    let record: Value = actix_test::read_body_json(response).await;
    let record_id = record.get("id").and_then(Value::as_i64).expect("record id");
    assert_eq!(return_loan(&app, record_id).await.status(), StatusCode::OK);

    let statistics = fetch_statistics(&app).await;
    assert_eq!(statistics.get("totalBorrows").and_then(Value::as_u64), Some(1));
    assert_eq!(statistics.get("currentBorrowed").and_then(Value::as_u64), Some(0));
}

#[actix_web::test]
async fn empty_stores_aggregate_to_zeroes() {
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(memory_state()))
            .service(api_scope()),
    )
    .await;

    let statistics = fetch_statistics(&app).await;
    assert_eq!(statistics.get("totalBorrows").and_then(Value::as_u64), Some(0));
    assert_eq!(
        statistics.get("bookRanking").and_then(Value::as_array).map(Vec::len),
        Some(0)
    );
    assert_eq!(
        statistics.get("monthlyStats").and_then(Value::as_array).map(Vec::len),
        Some(6)
    );
}
