//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports describe how the domain expects to reach storage; driving
//! ports are the use-cases inbound adapters call. Each driven port exposes a
//! strongly typed error enum so adapters map their failures into predictable
//! variants.

mod macros;
pub(crate) use macros::define_port_error;

mod accounts_service;
mod catalog_repository;
mod catalogue_command;
mod catalogue_query;
mod circulation_command;
mod loan_query;
mod loan_repository;
mod statistics_query;
mod user_repository;

#[cfg(test)]
pub use accounts_service::MockAccountsService;
pub use accounts_service::{
    AccountsService, Credentials, FixtureAccountsService, RegisterRequest, UserPatch,
};
#[cfg(test)]
pub use catalog_repository::MockCatalogRepository;
pub use catalog_repository::{CatalogRepository, CatalogRepositoryError, FixtureCatalogRepository};
#[cfg(test)]
pub use catalogue_command::MockCatalogueCommand;
pub use catalogue_command::{BookPatch, CatalogueCommand, FixtureCatalogueCommand};
#[cfg(test)]
pub use catalogue_query::MockCatalogueQuery;
pub use catalogue_query::{BookFilter, CatalogueQuery, FixtureCatalogueQuery, ListBooksRequest};
#[cfg(test)]
pub use circulation_command::MockCirculationCommand;
pub use circulation_command::{BorrowRequest, CirculationCommand, FixtureCirculationCommand};
#[cfg(test)]
pub use loan_query::MockLoanQuery;
pub use loan_query::{FixtureLoanQuery, ListLoansRequest, LoanQuery, LoanSnapshot};
#[cfg(test)]
pub use loan_repository::MockLoanRepository;
pub use loan_repository::{FixtureLoanRepository, LoanRepository, LoanRepositoryError};
#[cfg(test)]
pub use statistics_query::MockStatisticsQuery;
pub use statistics_query::{
    FixtureStatisticsQuery, MonthlyCount, RankingEntry, StatisticsQuery, StatisticsSummary,
};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{
    FixtureUserRepository, NewUser, UserRepository, UserRepositoryError,
};
