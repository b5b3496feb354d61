//! Driving port for ledger statistics.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::Error;

/// One entry of the borrow ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RankingEntry {
    /// Snapshotted book title the loans were grouped by.
    pub title: String,
    /// Number of loans ever issued for the title.
    pub count: u64,
}

/// Borrow count for one month bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyCount {
    /// Bucket label, `YYYY-MM`.
    pub month: String,
    /// Loans whose borrow instant falls in that calendar month.
    pub count: u64,
}

/// Aggregates derived from the full ledger, catalogue, and user list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsSummary {
    /// Ledger size.
    pub total_borrows: u64,
    /// Records whose persisted status is not returned; overdue loans still
    /// count as currently borrowed.
    pub current_borrowed: u64,
    /// Active records past their due date at aggregation time.
    pub overdue_count: u64,
    /// Catalogue size.
    pub total_books: u64,
    /// User directory size.
    pub total_users: u64,
    /// Top titles by all-time borrow count, at most ten entries.
    pub book_ranking: Vec<RankingEntry>,
    /// Six month buckets ending at the current month, oldest first.
    pub monthly_stats: Vec<MonthlyCount>,
    /// Borrow counts grouped by the current catalogue category.
    pub category_stats: BTreeMap<String, u64>,
}

/// Port computing the statistics summary on demand.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatisticsQuery: Send + Sync {
    /// Aggregate the ledger in one logical pass.
    async fn summary(&self) -> Result<StatisticsSummary, Error>;
}

/// Fixture implementation for tests that do not exercise statistics.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureStatisticsQuery;

#[async_trait]
impl StatisticsQuery for FixtureStatisticsQuery {
    async fn summary(&self) -> Result<StatisticsSummary, Error> {
        Ok(StatisticsSummary {
            total_borrows: 0,
            current_borrowed: 0,
            overdue_count: 0,
            total_books: 0,
            total_users: 0,
            book_ranking: Vec::new(),
            monthly_stats: Vec::new(),
            category_stats: BTreeMap::new(),
        })
    }
}
