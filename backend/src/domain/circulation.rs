//! Circulation engine: the borrow/return state machine.
//!
//! Stock and ledger live in separate stores, so every mutation here runs
//! inside a single global write lock and compensates the first write when
//! the second one fails. Clients never observe a decremented stock without
//! its loan record or a completed loan without its restock.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use pagination::Page;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::domain::ports::{
    BorrowRequest, CatalogRepository, CatalogRepositoryError, CirculationCommand,
    ListLoansRequest, LoanQuery, LoanRepository, LoanRepositoryError, LoanSnapshot,
};
use crate::domain::{Error, LoanRecord, LoanStatus, NewLoan, effective_status};

fn map_catalog_error(error: CatalogRepositoryError) -> Error {
    Error::internal(format!("catalogue store failure: {error}"))
}

fn map_ledger_error(error: LoanRepositoryError) -> Error {
    Error::internal(format!("loan ledger failure: {error}"))
}

/// Borrow/return engine over the catalogue store and loan ledger.
pub struct CirculationService<C, L> {
    catalog_repo: Arc<C>,
    loan_repo: Arc<L>,
    clock: Arc<dyn Clock>,
    // Serialises circulation mutations: two borrows racing for the last
    // copy must not both succeed.
    write_lock: Mutex<()>,
}

impl<C, L> CirculationService<C, L> {
    /// Create the engine over its stores and clock.
    pub fn new(catalog_repo: Arc<C>, loan_repo: Arc<L>, clock: Arc<dyn Clock>) -> Self {
        Self {
            catalog_repo,
            loan_repo,
            clock,
            write_lock: Mutex::new(()),
        }
    }
}

#[async_trait]
impl<C, L> CirculationCommand for CirculationService<C, L>
where
    C: CatalogRepository,
    L: LoanRepository,
{
    async fn borrow(&self, request: BorrowRequest) -> Result<LoanRecord, Error> {
        let _guard = self.write_lock.lock().await;

        let book = self
            .catalog_repo
            .find_by_id(request.book_id)
            .await
            .map_err(map_catalog_error)?
            .ok_or_else(|| Error::not_found(format!("book {} not found", request.book_id)))?;
        if book.stock == 0 {
            return Err(Error::conflict(format!("\"{}\" is out of stock", book.title)));
        }

        let ledger = self.loan_repo.list().await.map_err(map_ledger_error)?;
        let holds_active_loan = ledger.iter().any(|record| {
            record.user_id == request.user_id
                && record.book_id == request.book_id
                && record.status == LoanStatus::Borrowed
        });
        if holds_active_loan {
            return Err(Error::conflict(format!(
                "\"{}\" is already borrowed by this user; return it first",
                book.title
            )));
        }

        let now = self.clock.utc();

        // Stock moves first; a failed append restores it so the pair stays
        // atomic from the outside.
        let stocked = self
            .catalog_repo
            .set_stock(book.id, book.stock - 1)
            .await
            .map_err(map_catalog_error)?;
        if !stocked {
            return Err(Error::not_found(format!("book {} not found", book.id)));
        }

        let draft = NewLoan::issue(
            request.user_id,
            request.book_id,
            request.user_name,
            book.title.clone(),
            now,
        );
        match self.loan_repo.append(draft).await {
            Ok(record) => {
                info!(
                    record_id = record.id,
                    book_id = book.id,
                    user_id = record.user_id,
                    "loan issued"
                );
                Ok(record)
            }
            Err(err) => {
                if let Err(restore) = self.catalog_repo.set_stock(book.id, book.stock).await {
                    warn!(
                        book_id = book.id,
                        error = %restore,
                        "stock restore failed after ledger append error"
                    );
                }
                Err(map_ledger_error(err))
            }
        }
    }

    async fn return_loan(&self, record_id: i64) -> Result<LoanRecord, Error> {
        let _guard = self.write_lock.lock().await;

        let record = self
            .loan_repo
            .find_by_id(record_id)
            .await
            .map_err(map_ledger_error)?
            .ok_or_else(|| Error::not_found(format!("loan record {record_id} not found")))?;
        if record.status == LoanStatus::Returned {
            return Err(Error::conflict(format!(
                "loan record {record_id} is already returned"
            )));
        }

        let now = self.clock.utc();
        let returned = record.clone().into_returned(now);
        let updated = self
            .loan_repo
            .update(&returned)
            .await
            .map_err(map_ledger_error)?;
        if !updated {
            return Err(Error::internal(format!(
                "loan record {record_id} vanished mid-return"
            )));
        }

        // The ledger entry is authoritative over the catalogue: a title
        // deleted since the borrow only skips the restock.
        let book = self
            .catalog_repo
            .find_by_id(record.book_id)
            .await
            .map_err(map_catalog_error)?;
        match book {
            Some(book) => match self.catalog_repo.set_stock(book.id, book.stock + 1).await {
                Ok(true) => {}
                Ok(false) => {
                    info!(
                        record_id,
                        book_id = record.book_id,
                        "book gone from catalogue; restock skipped"
                    );
                }
                Err(err) => {
                    // Roll the ledger back so no half-applied return is
                    // visible.
                    if let Err(restore) = self.loan_repo.update(&record).await {
                        warn!(
                            record_id,
                            error = %restore,
                            "ledger restore failed after restock error"
                        );
                    }
                    return Err(map_catalog_error(err));
                }
            },
            None => {
                info!(
                    record_id,
                    book_id = record.book_id,
                    "book gone from catalogue; restock skipped"
                );
            }
        }

        info!(record_id, fine = returned.fine, "loan returned");
        Ok(returned)
    }
}

#[async_trait]
impl<C, L> LoanQuery for CirculationService<C, L>
where
    C: CatalogRepository,
    L: LoanRepository,
{
    async fn list_loans(&self, request: ListLoansRequest) -> Result<Page<LoanSnapshot>, Error> {
        let now = self.clock.utc();
        let mut records = self.loan_repo.list().await.map_err(map_ledger_error)?;
        if let Some(user_id) = request.user_id {
            records.retain(|record| record.user_id == user_id);
        }
        if let Some(status) = request.status {
            records.retain(|record| record.status == status);
        }
        records.sort_by(|a, b| b.borrow_date.cmp(&a.borrow_date));

        Ok(Page::from_items(records, request.page).map(|record| LoanSnapshot {
            status: effective_status(&record, now),
            record,
        }))
    }
}

#[cfg(test)]
#[path = "circulation_tests.rs"]
mod tests;
