//! Statistics HTTP handler.
//!
//! ```text
//! GET /api/statistics
//! ```

use actix_web::{get, web};

use crate::domain::Error;
use crate::domain::ports::StatisticsSummary;
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Aggregate the ledger into dashboard statistics.
#[utoipa::path(
    get,
    path = "/api/statistics",
    responses(
        (status = 200, description = "Ledger aggregates", body = StatisticsSummary),
        (status = 500, description = "Store failure", body = Error)
    ),
    tags = ["statistics"],
    operation_id = "getStatistics"
)]
#[get("/statistics")]
pub async fn get_statistics(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<StatisticsSummary>> {
    let summary = state.statistics.summary().await?;
    Ok(web::Json(summary))
}

#[cfg(test)]
#[path = "statistics_tests.rs"]
mod tests;
