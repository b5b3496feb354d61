//! Circulation HTTP handlers.
//!
//! ```text
//! POST /api/borrow
//! POST /api/borrow/{id}/return
//! GET  /api/borrow
//! ```

use actix_web::{get, post, web};
use pagination::Page;
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::{BorrowRequest, ListLoansRequest, LoanSnapshot};
use crate::domain::{EffectiveStatus, Error, LoanRecord, LoanStatus};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::page_request;

/// Request payload for issuing a loan.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BorrowRequestBody {
    /// Borrowing user.
    pub user_id: i64,
    /// Requested title.
    pub book_id: i64,
    /// Borrower's display name, snapshotted onto the record.
    #[serde(default)]
    pub user_name: String,
}

/// Wire shape of a loan record.
///
/// `status` is the read-time status: an active loan past its due date reads
/// `overdue` here even though the ledger still stores `borrowed`.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoanRecordBody {
    /// Ledger identity.
    pub id: i64,
    /// Borrowing user.
    pub user_id: i64,
    /// Borrowed title.
    pub book_id: i64,
    /// Borrower name snapshot.
    pub user_name: String,
    /// Book title snapshot.
    pub book_title: String,
    /// Issue instant, RFC 3339.
    #[schema(format = "date-time")]
    pub borrow_date: String,
    /// Due instant, RFC 3339.
    #[schema(format = "date-time")]
    pub due_date: String,
    /// Return instant, RFC 3339; absent while active.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(format = "date-time")]
    pub return_date: Option<String>,
    /// Read-time status.
    pub status: EffectiveStatus,
    /// Settled fine.
    pub fine: f64,
}

fn loan_body(record: LoanRecord, status: EffectiveStatus) -> LoanRecordBody {
    LoanRecordBody {
        id: record.id,
        user_id: record.user_id,
        book_id: record.book_id,
        user_name: record.user_name,
        book_title: record.book_title,
        borrow_date: record.borrow_date.to_rfc3339(),
        due_date: record.due_date.to_rfc3339(),
        return_date: record.return_date.map(|date| date.to_rfc3339()),
        status,
        fine: record.fine,
    }
}

impl From<LoanRecord> for LoanRecordBody {
    fn from(record: LoanRecord) -> Self {
        let status = match record.status {
            LoanStatus::Borrowed => EffectiveStatus::Borrowed,
            LoanStatus::Returned => EffectiveStatus::Returned,
        };
        loan_body(record, status)
    }
}

impl From<LoanSnapshot> for LoanRecordBody {
    fn from(snapshot: LoanSnapshot) -> Self {
        loan_body(snapshot.record, snapshot.status)
    }
}

/// Query parameters for the loan listing.
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListLoansQuery {
    /// Restrict to one borrower.
    pub user_id: Option<i64>,
    /// Restrict by persisted status, `borrowed` or `returned`.
    pub status: Option<String>,
    /// Page number, from 1.
    pub page: Option<u32>,
    /// Page size, at most 100.
    pub page_size: Option<u32>,
}

fn parse_status_filter(raw: &str) -> Result<LoanStatus, Error> {
    match raw {
        "borrowed" => Ok(LoanStatus::Borrowed),
        "returned" => Ok(LoanStatus::Returned),
        other => Err(
            Error::invalid_request("status filter must be borrowed or returned")
                .with_details(json!({ "field": "status", "value": other })),
        ),
    }
}

/// Issue a loan.
#[utoipa::path(
    post,
    path = "/api/borrow",
    request_body = BorrowRequestBody,
    responses(
        (status = 200, description = "Loan issued", body = LoanRecordBody),
        (status = 400, description = "Out of stock or already borrowed", body = Error),
        (status = 404, description = "Book not found", body = Error)
    ),
    tags = ["circulation"],
    operation_id = "borrowBook"
)]
#[post("/borrow")]
pub async fn borrow_book(
    state: web::Data<HttpState>,
    payload: web::Json<BorrowRequestBody>,
) -> ApiResult<web::Json<LoanRecordBody>> {
    let body = payload.into_inner();
    let record = state
        .circulation
        .borrow(BorrowRequest {
            user_id: body.user_id,
            book_id: body.book_id,
            user_name: body.user_name,
        })
        .await?;
    Ok(web::Json(LoanRecordBody::from(record)))
}

/// Complete a loan.
#[utoipa::path(
    post,
    path = "/api/borrow/{id}/return",
    params(("id" = i64, Path, description = "Loan record identity")),
    responses(
        (status = 200, description = "Loan returned", body = LoanRecordBody),
        (status = 400, description = "Already returned", body = Error),
        (status = 404, description = "Record not found", body = Error)
    ),
    tags = ["circulation"],
    operation_id = "returnBook"
)]
#[post("/borrow/{id}/return")]
pub async fn return_book(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<LoanRecordBody>> {
    let record = state.circulation.return_loan(path.into_inner()).await?;
    Ok(web::Json(LoanRecordBody::from(record)))
}

/// List loans, newest borrow first.
#[utoipa::path(
    get,
    path = "/api/borrow",
    params(ListLoansQuery),
    responses(
        (status = 200, description = "Page of loan records"),
        (status = 400, description = "Invalid filter or page selection", body = Error)
    ),
    tags = ["circulation"],
    operation_id = "listLoans"
)]
#[get("/borrow")]
pub async fn list_loans(
    state: web::Data<HttpState>,
    query: web::Query<ListLoansQuery>,
) -> ApiResult<web::Json<Page<LoanRecordBody>>> {
    let query = query.into_inner();
    let status = query
        .status
        .as_deref()
        .map(parse_status_filter)
        .transpose()?;
    let page = page_request(query.page, query.page_size)?;

    let loans = state
        .loans
        .list_loans(ListLoansRequest {
            user_id: query.user_id,
            status,
            page,
        })
        .await?;
    Ok(web::Json(loans.map(LoanRecordBody::from)))
}

#[cfg(test)]
#[path = "circulation_tests.rs"]
mod tests;
