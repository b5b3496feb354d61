//! Loan ledger entity, the read-time overdue classifier, and fine
//! computation.
//!
//! A loan is an immutable transaction header plus a completion tail
//! (`status`, `return_date`, `fine`) written exactly once on return. The
//! third status value, overdue, is never persisted: it is re-derived from
//! the wall clock on every read so listings stay consistent without a
//! background sweep.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Loan period granted on borrow.
pub const LOAN_PERIOD_DAYS: i64 = 30;

/// Fine accrued per whole day past the due date, in currency units.
pub const FINE_PER_OVERDUE_DAY: f64 = 0.5;

/// Persisted lifecycle state of a loan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum LoanStatus {
    /// The copy is out; this is the only state a loan is created in.
    Borrowed,
    /// The copy came back; terminal.
    Returned,
}

/// Read-time status of a loan, including the derived overdue state.
///
/// Derived by [`effective_status`] and never persisted; two reads at
/// different instants may legitimately disagree for the same record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum EffectiveStatus {
    /// Active and within the loan period.
    Borrowed,
    /// Active and past the due date.
    Overdue,
    /// Completed.
    Returned,
}

/// One borrow/return transaction in the ledger.
///
/// ## Invariants
/// - `status`, `return_date`, and `fine` are written once, together, on
///   return; every other field is immutable after creation.
/// - `user_name` and `book_title` are creation-time snapshots; later catalog
///   or profile edits do not rewrite history.
/// - Records are never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoanRecord {
    /// Ledger-assigned identity, monotonic from 1.
    pub id: i64,
    /// Borrowing user.
    pub user_id: i64,
    /// Borrowed title.
    pub book_id: i64,
    /// Snapshot of the borrower's name at creation.
    pub user_name: String,
    /// Snapshot of the book title at creation.
    pub book_title: String,
    /// Instant the loan was issued.
    pub borrow_date: DateTime<Utc>,
    /// `borrow_date` plus the loan period.
    pub due_date: DateTime<Utc>,
    /// Instant the copy came back; absent while active.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_date: Option<DateTime<Utc>>,
    /// Persisted lifecycle state.
    pub status: LoanStatus,
    /// Fine settled on return; zero while active or on-time.
    pub fine: f64,
}

impl LoanRecord {
    /// Complete the loan: stamp the return instant, settle the fine.
    ///
    /// Callers must have checked that the persisted status is still
    /// [`LoanStatus::Borrowed`]; completing is a one-shot transition.
    #[must_use]
    pub fn into_returned(mut self, now: DateTime<Utc>) -> Self {
        self.return_date = Some(now);
        self.status = LoanStatus::Returned;
        self.fine = overdue_fine(self.due_date, now);
        self
    }
}

/// Payload for appending a loan; the ledger assigns the identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLoan {
    /// Borrowing user.
    pub user_id: i64,
    /// Borrowed title.
    pub book_id: i64,
    /// Snapshot of the borrower's name.
    pub user_name: String,
    /// Snapshot of the book title.
    pub book_title: String,
    /// Instant the loan is issued.
    pub borrow_date: DateTime<Utc>,
    /// Due instant, `borrow_date` plus the loan period.
    pub due_date: DateTime<Utc>,
}

impl NewLoan {
    /// Draft a loan issued at `now` with the standard loan period.
    #[must_use]
    pub fn issue(
        user_id: i64,
        book_id: i64,
        user_name: String,
        book_title: String,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id,
            book_id,
            user_name,
            book_title,
            borrow_date: now,
            due_date: now + Duration::days(LOAN_PERIOD_DAYS),
        }
    }

    /// Materialise the record with a ledger-assigned identity.
    #[must_use]
    pub fn into_record(self, id: i64) -> LoanRecord {
        LoanRecord {
            id,
            user_id: self.user_id,
            book_id: self.book_id,
            user_name: self.user_name,
            book_title: self.book_title,
            borrow_date: self.borrow_date,
            due_date: self.due_date,
            return_date: None,
            status: LoanStatus::Borrowed,
            fine: 0.0,
        }
    }
}

/// Derive the read-time status of a loan at `now`.
///
/// Pure and read-only: callers re-derive on every listing or aggregation
/// pass instead of persisting the result.
#[must_use]
pub fn effective_status(record: &LoanRecord, now: DateTime<Utc>) -> EffectiveStatus {
    match record.status {
        LoanStatus::Returned => EffectiveStatus::Returned,
        LoanStatus::Borrowed if now > record.due_date => EffectiveStatus::Overdue,
        LoanStatus::Borrowed => EffectiveStatus::Borrowed,
    }
}

/// Fine owed for a return at `now` against `due_date`.
///
/// Counts whole days of the elapsed duration past due (a truncation of the
/// overdue interval, not a calendar-date subtraction), at
/// [`FINE_PER_OVERDUE_DAY`] per day. Returns on or before the due instant
/// owe nothing.
#[must_use]
pub fn overdue_fine(due_date: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    if now <= due_date {
        return 0.0;
    }
    let whole_days = (now - due_date).num_days();
    whole_days as f64 * FINE_PER_OVERDUE_DAY
}

#[cfg(test)]
#[path = "loan_tests.rs"]
mod tests;
