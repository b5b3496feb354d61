//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] aggregates every REST endpoint and the schemas their payloads
//! reference. The generated specification backs Swagger UI in debug builds.

use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Library circulation backend API",
        description = "HTTP interface for the circulation ledger, catalogue, accounts, and statistics.",
        license(name = "MIT")
    ),
    servers((url = "/", description = "Relative to the deployment base URL")),
    paths(
        crate::inbound::http::circulation::borrow_book,
        crate::inbound::http::circulation::return_book,
        crate::inbound::http::circulation::list_loans,
        crate::inbound::http::statistics::get_statistics,
        crate::inbound::http::catalogue::list_books,
        crate::inbound::http::catalogue::list_categories,
        crate::inbound::http::catalogue::get_book,
        crate::inbound::http::catalogue::create_book,
        crate::inbound::http::catalogue::update_book,
        crate::inbound::http::catalogue::delete_book,
        crate::inbound::http::users::register,
        crate::inbound::http::users::login,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        crate::domain::Book,
        crate::domain::EffectiveStatus,
        crate::domain::Error,
        crate::domain::ErrorCode,
        crate::domain::LoanStatus,
        crate::domain::Role,
        crate::domain::UserProfile,
        crate::domain::ports::MonthlyCount,
        crate::domain::ports::RankingEntry,
        crate::domain::ports::StatisticsSummary,
        crate::inbound::http::circulation::BorrowRequestBody,
        crate::inbound::http::circulation::LoanRecordBody,
        crate::inbound::http::catalogue::CreateBookBody,
        crate::inbound::http::catalogue::UpdateBookBody,
        crate::inbound::http::users::LoginBody,
        crate::inbound::http::users::RegisterBody,
        crate::inbound::http::users::UpdateUserBody,
    )),
    tags(
        (name = "circulation", description = "Borrow and return operations over the loan ledger"),
        (name = "statistics", description = "Aggregates derived from the ledger"),
        (name = "catalogue", description = "Book catalogue management"),
        (name = "accounts", description = "Registration, login, and user administration"),
        (name = "health", description = "Liveness and readiness probes")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use utoipa::OpenApi;

    use super::*;

    #[test]
    fn document_lists_the_circulation_paths() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/borrow"));
        assert!(doc.paths.paths.contains_key("/api/borrow/{id}/return"));
        assert!(doc.paths.paths.contains_key("/api/statistics"));
    }

    #[test]
    fn error_schema_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.as_ref().expect("components");
        assert!(components.schemas.contains_key("Error"));
        assert!(components.schemas.contains_key("StatisticsSummary"));
    }
}
