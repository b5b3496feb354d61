//! Tests for loan lifecycle, overdue derivation, and fine computation.

use chrono::{Duration, TimeZone, Utc};
use rstest::rstest;

use super::*;

fn borrow_instant() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).single().expect("valid instant")
}

fn active_loan() -> LoanRecord {
    NewLoan::issue(
        1,
        2,
        "Ada".to_owned(),
        "The Pragmatic Programmer".to_owned(),
        borrow_instant(),
    )
    .into_record(1)
}

#[test]
fn issue_sets_due_date_one_loan_period_out() {
    let record = active_loan();
    assert_eq!(record.due_date - record.borrow_date, Duration::days(LOAN_PERIOD_DAYS));
    assert_eq!(record.status, LoanStatus::Borrowed);
    assert_eq!(record.fine, 0.0);
    assert!(record.return_date.is_none());
}

#[rstest]
#[case(Duration::days(29), 0.0)]
#[case(Duration::days(30), 0.0)]
#[case(Duration::days(30) + Duration::hours(12), 0.0)]
#[case(Duration::days(31), 0.5)]
#[case(Duration::days(32), 1.0)]
#[case(Duration::days(40), 5.0)]
fn fine_counts_whole_days_past_due(#[case] elapsed: Duration, #[case] expected: f64) {
    let record = active_loan();
    let returned = record.into_returned(borrow_instant() + elapsed);
    assert_eq!(returned.fine, expected);
    assert_eq!(returned.status, LoanStatus::Returned);
}

#[test]
fn into_returned_stamps_the_return_instant() {
    let now = borrow_instant() + Duration::days(3);
    let returned = active_loan().into_returned(now);
    assert_eq!(returned.return_date, Some(now));
    assert_eq!(returned.fine, 0.0);
}

#[rstest]
#[case(Duration::days(0), EffectiveStatus::Borrowed)]
#[case(Duration::days(30), EffectiveStatus::Borrowed)]
#[case(Duration::days(30) + Duration::seconds(1), EffectiveStatus::Overdue)]
#[case(Duration::days(45), EffectiveStatus::Overdue)]
fn effective_status_tracks_the_clock(#[case] elapsed: Duration, #[case] expected: EffectiveStatus) {
    let record = active_loan();
    assert_eq!(effective_status(&record, borrow_instant() + elapsed), expected);
}

#[test]
fn effective_status_is_read_only() {
    let record = active_loan();
    let before = record.clone();
    let overdue_at = borrow_instant() + Duration::days(60);
    for _ in 0..3 {
        let _ = effective_status(&record, overdue_at);
    }
    assert_eq!(record, before);
}

#[test]
fn returned_records_stay_returned_regardless_of_clock() {
    let returned = active_loan().into_returned(borrow_instant() + Duration::days(1));
    let much_later = borrow_instant() + Duration::days(400);
    assert_eq!(effective_status(&returned, much_later), EffectiveStatus::Returned);
}

#[test]
fn records_serialise_camel_case_without_absent_return_date() {
    let value = serde_json::to_value(active_loan()).expect("record serialises");
    assert!(value.get("returnDate").is_none());
    assert!(value.get("bookTitle").is_some());
    assert_eq!(value.get("status"), Some(&serde_json::json!("borrowed")));
}
