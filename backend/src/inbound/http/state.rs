//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AccountsService, CatalogueCommand, CatalogueQuery, CirculationCommand, LoanQuery,
    StatisticsQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Borrow/return engine.
    pub circulation: Arc<dyn CirculationCommand>,
    /// Loan listings with transient status derivation.
    pub loans: Arc<dyn LoanQuery>,
    /// Ledger statistics.
    pub statistics: Arc<dyn StatisticsQuery>,
    /// Catalogue mutations.
    pub catalogue: Arc<dyn CatalogueCommand>,
    /// Catalogue reads.
    pub catalogue_query: Arc<dyn CatalogueQuery>,
    /// Registration, login, and user administration.
    pub accounts: Arc<dyn AccountsService>,
}

#[cfg(test)]
impl HttpState {
    /// State wired entirely to fixture ports; tests override the port under
    /// test with a mock.
    pub(crate) fn fixture() -> Self {
        use crate::domain::ports::{
            FixtureAccountsService, FixtureCatalogueCommand, FixtureCatalogueQuery,
            FixtureCirculationCommand, FixtureLoanQuery, FixtureStatisticsQuery,
        };

        Self {
            circulation: Arc::new(FixtureCirculationCommand),
            loans: Arc::new(FixtureLoanQuery),
            statistics: Arc::new(FixtureStatisticsQuery),
            catalogue: Arc::new(FixtureCatalogueCommand),
            catalogue_query: Arc::new(FixtureCatalogueQuery),
            accounts: Arc::new(FixtureAccountsService),
        }
    }
}
