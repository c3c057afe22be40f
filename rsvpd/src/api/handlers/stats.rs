use crate::{AppState, api::models::stats::StatsResponse, errors::Result};
use axum::{Json, extract::State};

#[utoipa::path(
    get,
    path = "/stats",
    tag = "guestbook",
    summary = "Attendance counters",
    responses(
        (status = 200, description = "Confirmed and declined counts", body = StatsResponse),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn get_stats(State(state): State<AppState>) -> Result<Json<StatsResponse>> {
    let stats = state.store.get_stats().await?;
    Ok(Json(stats.into()))
}

#[cfg(test)]
mod tests {
    use crate::test_utils::create_test_app;
    use axum::http::StatusCode;
    use serde_json::{Value, json};

    #[tokio::test]
    async fn test_stats_track_every_rsvp() {
        let (app, _dir) = create_test_app().await;

        let statuses = ["confirmed", "confirmed", "declined", "confirmed", "declined"];
        for (i, status) in statuses.iter().enumerate() {
            app.post("/api/rsvp")
                .json(&json!({"name": format!("guest {i}"), "message": "hi", "status": status}))
                .await
                .assert_status(StatusCode::CREATED);
        }

        let response = app.get("/api/stats").await;
        response.assert_status(StatusCode::OK);
        let stats: Value = response.json();
        assert_eq!(stats, json!({"confirmed": 3, "declined": 2}));
    }
}
