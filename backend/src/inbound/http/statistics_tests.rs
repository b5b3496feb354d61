//! Tests for the statistics HTTP handler.

use std::collections::BTreeMap;
use std::sync::Arc;

use actix_web::{App, http::StatusCode, test as actix_test, web};
use serde_json::Value;

use super::*;
use crate::domain::ports::{MockStatisticsQuery, MonthlyCount, RankingEntry};

#[actix_web::test]
async fn summary_serialises_camel_case() {
    let mut statistics = MockStatisticsQuery::new();
    statistics.expect_summary().times(1).return_once(|| {
        Ok(StatisticsSummary {
            total_borrows: 4,
            current_borrowed: 2,
            overdue_count: 1,
            total_books: 8,
            total_users: 3,
            book_ranking: vec![
                RankingEntry {
                    title: "Book A".to_owned(),
                    count: 3,
                },
                RankingEntry {
                    title: "Book B".to_owned(),
                    count: 1,
                },
            ],
            monthly_stats: vec![MonthlyCount {
                month: "2026-06".to_owned(),
                count: 4,
            }],
            category_stats: BTreeMap::from([("Computing".to_owned(), 4)]),
        })
    });
    let state = HttpState {
        statistics: Arc::new(statistics),
        ..HttpState::fixture()
    };

    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .service(web::scope("/api").service(get_statistics)),
    )
    .await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/api/statistics").to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body.get("totalBorrows").and_then(Value::as_u64), Some(4));
    assert_eq!(body.get("currentBorrowed").and_then(Value::as_u64), Some(2));
    assert_eq!(body.get("overdueCount").and_then(Value::as_u64), Some(1));
    let ranking = body.get("bookRanking").and_then(Value::as_array).expect("ranking");
    assert_eq!(
        ranking.first().and_then(|entry| entry.get("title")).and_then(Value::as_str),
        Some("Book A")
    );
    assert_eq!(
        body.get("categoryStats").and_then(|stats| stats.get("Computing")).and_then(Value::as_u64),
        Some(4)
    );
    let months = body.get("monthlyStats").and_then(Value::as_array).expect("months");
    assert_eq!(
        months.first().and_then(|bucket| bucket.get("month")).and_then(Value::as_str),
        Some("2026-06")
    );
}

#[actix_web::test]
async fn store_failures_surface_as_internal_errors() {
    let mut statistics = MockStatisticsQuery::new();
    statistics
        .expect_summary()
        .times(1)
        .return_once(|| Err(crate::domain::Error::internal("ledger unreadable")));
    let state = HttpState {
        statistics: Arc::new(statistics),
        ..HttpState::fixture()
    };

    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .service(web::scope("/api").service(get_statistics)),
    )
    .await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/api/statistics").to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = actix_test::read_body_json(response).await;
    // Internal messages are redacted at the boundary.
    assert_eq!(
        body.get("message").and_then(Value::as_str),
        Some("Internal server error")
    );
}
