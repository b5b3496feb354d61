//! Driven port for the loan ledger.
//!
//! The ledger is append-and-update only: records are never deleted, and the
//! single update path rewrites a record's completion tail on return.
//! Identity assignment (`max(existing) + 1`, `1` when empty) is owned by the
//! adapter.

use async_trait::async_trait;

use crate::domain::LoanRecord;
use crate::domain::loan::NewLoan;

use super::define_port_error;

define_port_error! {
    /// Errors raised by loan ledger adapters.
    pub enum LoanRepositoryError {
        /// Store could not be reached or opened.
        Connection { message: String } =>
            "loan ledger connection failed: {message}",
        /// Read or write failed during execution.
        Query { message: String } =>
            "loan ledger query failed: {message}",
    }
}

/// Port for appending and updating ledger records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoanRepository: Send + Sync {
    /// Append a new record, assigning the next identity.
    async fn append(&self, draft: NewLoan) -> Result<LoanRecord, LoanRepositoryError>;

    /// Fetch a record by identity.
    async fn find_by_id(&self, id: i64) -> Result<Option<LoanRecord>, LoanRepositoryError>;

    /// Replace the record matching `record.id`; `false` when it is gone.
    async fn update(&self, record: &LoanRecord) -> Result<bool, LoanRepositoryError>;

    /// The full ledger in append order.
    async fn list(&self) -> Result<Vec<LoanRecord>, LoanRepositoryError>;
}

/// Fixture implementation for tests that do not exercise the ledger.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLoanRepository;

#[async_trait]
impl LoanRepository for FixtureLoanRepository {
    async fn append(&self, draft: NewLoan) -> Result<LoanRecord, LoanRepositoryError> {
        Ok(draft.into_record(1))
    }

    async fn find_by_id(&self, _id: i64) -> Result<Option<LoanRecord>, LoanRepositoryError> {
        Ok(None)
    }

    async fn update(&self, _record: &LoanRecord) -> Result<bool, LoanRepositoryError> {
        Ok(false)
    }

    async fn list(&self) -> Result<Vec<LoanRecord>, LoanRepositoryError> {
        Ok(Vec::new())
    }
}
