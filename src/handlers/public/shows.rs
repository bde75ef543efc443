use axum::extract::State;
use chrono::Local;

use crate::database::models::Show;
use crate::middleware::{ApiResponse, ApiResult, QueryParams};
use crate::state::AppState;
use crate::validation::{resolve_year, YearRange};

/// GET /shows?year=YYYY - Shows in one calendar year, by date then insertion.
/// An absent or empty `year` means the current year.
pub async fn list(State(state): State<AppState>, params: QueryParams) -> ApiResult<Vec<Show>> {
    let year = resolve_year(params.first("year"), Local::now().date_naive())?;

    let Some(range) = YearRange::for_year(year) else {
        return Ok(ApiResponse::data(Vec::new()));
    };

    let shows = state.store.select_range(range.from, range.to).await?;
    tracing::debug!(year, count = shows.len(), "Listed shows");

    Ok(ApiResponse::data(shows))
}
