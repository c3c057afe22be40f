use crate::{
    AppState,
    api::models::guests::GuestSummaryResponse,
    errors::{Error, Result},
};
use axum::{Json, extract::State};
use chrono::Utc;

#[utoipa::path(
    get,
    path = "/guests",
    tag = "guestbook",
    summary = "Guestbook summary",
    description = "Entry count, attendance counters and the number of entries in the recent window. \
        Names and messages are never included.",
    responses(
        (status = 200, description = "Guestbook summary", body = GuestSummaryResponse),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn get_guest_summary(State(state): State<AppState>) -> Result<Json<GuestSummaryResponse>> {
    let window = chrono::Duration::from_std(state.config.recent_window).map_err(|e| Error::Internal {
        operation: format!("convert recent window: {e}"),
    })?;

    let summary = state.store.guest_summary(Utc::now() - window).await?;
    let stats = state.store.get_stats().await?;

    Ok(Json(GuestSummaryResponse {
        total_guests: summary.total,
        stats: stats.into(),
        recent_count: summary.recent,
    }))
}
