use crate::{
    AppState,
    api::models::guests::{RsvpCreate, RsvpResponse},
    auth::ClientAddr,
    errors::Result,
};
use axum::{Json, extract::State, extract::rejection::JsonRejection, http::StatusCode};
use tracing::info;

#[utoipa::path(
    post,
    path = "/rsvp",
    tag = "guestbook",
    summary = "Submit an RSVP",
    description = "Records a guestbook entry and bumps the matching attendance counter in one step. \
        Name and message are trimmed; status defaults to `confirmed`.",
    request_body = RsvpCreate,
    responses(
        (status = 201, description = "RSVP recorded", body = RsvpResponse),
        (status = 400, description = "Missing or blank name/message, or unknown status"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all, fields(client = %client.as_str()))]
pub async fn create_rsvp(
    State(state): State<AppState>,
    client: ClientAddr,
    body: std::result::Result<Json<RsvpCreate>, JsonRejection>,
) -> Result<(StatusCode, Json<RsvpResponse>)> {
    let Json(body) = body?;
    let request = body.into_db_request(client.into_inner())?;

    let guest = state.store.record_rsvp(&request).await?;
    metrics::counter!("rsvp_submissions_total", "status" => guest.status.as_str()).increment(1);
    info!(guest_id = guest.id, status = %guest.status, "RSVP recorded");

    Ok((StatusCode::CREATED, Json(RsvpResponse::from(guest))))
}
