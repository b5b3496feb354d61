//! Driving port for loan listings.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{EffectiveStatus, Error, LoanRecord, LoanStatus};

/// Filtered, paged loan listing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListLoansRequest {
    /// Restrict to one borrower.
    pub user_id: Option<i64>,
    /// Restrict by persisted status; the transient overdue state is not a
    /// filterable value.
    pub status: Option<LoanStatus>,
    /// Page selection.
    pub page: PageRequest,
}

impl ListLoansRequest {
    /// Unfiltered first page.
    #[must_use]
    pub fn unfiltered() -> Self {
        Self::default()
    }
}

/// A ledger record paired with its read-time status.
#[derive(Debug, Clone, PartialEq)]
pub struct LoanSnapshot {
    /// The persisted record.
    pub record: LoanRecord,
    /// Status re-derived against the clock at read time.
    pub status: EffectiveStatus,
}

/// Port reading the ledger with transient status derivation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoanQuery: Send + Sync {
    /// List loans, newest borrow first, with effective statuses.
    async fn list_loans(&self, request: ListLoansRequest) -> Result<Page<LoanSnapshot>, Error>;
}

/// Fixture implementation for tests that do not exercise loan listings.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLoanQuery;

#[async_trait]
impl LoanQuery for FixtureLoanQuery {
    async fn list_loans(&self, request: ListLoansRequest) -> Result<Page<LoanSnapshot>, Error> {
        Ok(Page::from_items(Vec::new(), request.page))
    }
}
