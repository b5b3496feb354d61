//! Driving port for circulation mutations.

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::loan::NewLoan;
use crate::domain::{Error, LoanRecord};

/// Request to issue a loan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BorrowRequest {
    /// Borrowing user.
    pub user_id: i64,
    /// Requested title.
    pub book_id: i64,
    /// Borrower's display name, snapshotted onto the record.
    pub user_name: String,
}

/// Port executing borrow and return transactions.
///
/// Implementations guarantee the §-level circulation invariants: stock and
/// ledger move together or not at all, stock never goes negative, and a user
/// holds at most one active loan per title.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CirculationCommand: Send + Sync {
    /// Issue a loan, decrementing the book's stock.
    async fn borrow(&self, request: BorrowRequest) -> Result<LoanRecord, Error>;

    /// Complete a loan, settling the fine and restocking the book.
    async fn return_loan(&self, record_id: i64) -> Result<LoanRecord, Error>;
}

/// Fixture implementation for tests that do not exercise circulation.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCirculationCommand;

#[async_trait]
impl CirculationCommand for FixtureCirculationCommand {
    async fn borrow(&self, request: BorrowRequest) -> Result<LoanRecord, Error> {
        Ok(NewLoan::issue(
            request.user_id,
            request.book_id,
            request.user_name,
            String::new(),
            Utc::now(),
        )
        .into_record(1))
    }

    async fn return_loan(&self, record_id: i64) -> Result<LoanRecord, Error> {
        Err(Error::not_found(format!("loan record {record_id} not found")))
    }
}
