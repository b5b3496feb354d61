//! Statistics aggregation over the loan ledger.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Datelike, Duration};
use mockable::Clock;

use crate::domain::ports::{
    CatalogRepository, CatalogRepositoryError, LoanRepository, LoanRepositoryError, MonthlyCount,
    RankingEntry, StatisticsQuery, StatisticsSummary, UserRepository, UserRepositoryError,
};
use crate::domain::{Error, LoanStatus};

/// Number of month buckets in the monthly borrow series.
const MONTH_BUCKETS: i64 = 6;

/// Ranking entries kept after sorting.
const RANKING_LIMIT: usize = 10;

fn map_catalog_error(error: CatalogRepositoryError) -> Error {
    Error::internal(format!("catalogue store failure: {error}"))
}

fn map_ledger_error(error: LoanRepositoryError) -> Error {
    Error::internal(format!("loan ledger failure: {error}"))
}

fn map_user_error(error: UserRepositoryError) -> Error {
    Error::internal(format!("user store failure: {error}"))
}

/// Aggregator reading the ledger, catalogue, and user directory.
pub struct StatisticsService<C, L, U> {
    catalog_repo: Arc<C>,
    loan_repo: Arc<L>,
    user_repo: Arc<U>,
    clock: Arc<dyn Clock>,
}

impl<C, L, U> StatisticsService<C, L, U> {
    /// Create the aggregator over its stores and clock.
    pub fn new(
        catalog_repo: Arc<C>,
        loan_repo: Arc<L>,
        user_repo: Arc<U>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            catalog_repo,
            loan_repo,
            user_repo,
            clock,
        }
    }
}

#[async_trait]
impl<C, L, U> StatisticsQuery for StatisticsService<C, L, U>
where
    C: CatalogRepository,
    L: LoanRepository,
    U: UserRepository,
{
    async fn summary(&self) -> Result<StatisticsSummary, Error> {
        let now = self.clock.utc();
        let records = self.loan_repo.list().await.map_err(map_ledger_error)?;
        let books = self.catalog_repo.list().await.map_err(map_catalog_error)?;
        let users = self.user_repo.list().await.map_err(map_user_error)?;

        let total_borrows = records.len() as u64;
        let current_borrowed = records
            .iter()
            .filter(|record| record.status != LoanStatus::Returned)
            .count() as u64;
        let overdue_count = records
            .iter()
            .filter(|record| record.status == LoanStatus::Borrowed && now > record.due_date)
            .count() as u64;

        // Counting into a Vec keeps first-encountered order, which the
        // stable sort below preserves across equal counts.
        let mut book_ranking: Vec<RankingEntry> = Vec::new();
        for record in &records {
            match book_ranking
                .iter_mut()
                .find(|entry| entry.title == record.book_title)
            {
                Some(entry) => entry.count += 1,
                None => book_ranking.push(RankingEntry {
                    title: record.book_title.clone(),
                    count: 1,
                }),
            }
        }
        book_ranking.sort_by(|a, b| b.count.cmp(&a.count));
        book_ranking.truncate(RANKING_LIMIT);

        // Buckets step back in fixed 30-day increments while counting by
        // calendar month, so labels can repeat or skip a month when `now`
        // sits near a month boundary.
        let monthly_stats = (0..MONTH_BUCKETS)
            .rev()
            .map(|months_back| {
                let bucket = now - Duration::days(30 * months_back);
                let (year, month) = (bucket.year(), bucket.month());
                let count = records
                    .iter()
                    .filter(|record| {
                        record.borrow_date.year() == year && record.borrow_date.month() == month
                    })
                    .count() as u64;
                MonthlyCount {
                    month: format!("{year:04}-{month:02}"),
                    count,
                }
            })
            .collect();

        // Categories come from the live catalogue, not a snapshot: loans
        // whose book is gone drop out of the breakdown.
        let mut category_stats: BTreeMap<String, u64> = BTreeMap::new();
        for record in &records {
            if let Some(book) = books.iter().find(|book| book.id == record.book_id) {
                *category_stats.entry(book.category.clone()).or_insert(0) += 1;
            }
        }

        Ok(StatisticsSummary {
            total_borrows,
            current_borrowed,
            overdue_count,
            total_books: books.len() as u64,
            total_users: users.len() as u64,
            book_ranking,
            monthly_stats,
            category_stats,
        })
    }
}

#[cfg(test)]
#[path = "statistics_tests.rs"]
mod tests;
