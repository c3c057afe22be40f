use crate::{
    AppState,
    api::models::live_location::{LiveLocationResponse, ShareLocationRequest},
    auth::{ClientAddr, require_secret},
    errors::Result,
};
use axum::{Json, extract::State, extract::rejection::JsonRejection};
use tracing::info;

#[utoipa::path(
    get,
    path = "/live-location",
    tag = "live-location",
    summary = "Current live location",
    responses(
        (status = 200, description = "The shared location; inactive with empty fields until an admin shares one", body = LiveLocationResponse),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn get_live_location(State(state): State<AppState>) -> Result<Json<LiveLocationResponse>> {
    let location = state.store.get_location().await?;
    Ok(Json(location.into()))
}

#[utoipa::path(
    post,
    path = "/share-location",
    tag = "live-location",
    summary = "Share or hide the live location",
    description = "Overwrites every location field. Requires the admin key in the body. \
        The caller's address is recorded as `lastUpdatedBy`.",
    request_body = ShareLocationRequest,
    responses(
        (status = 200, description = "Updated location", body = LiveLocationResponse),
        (status = 400, description = "Invalid phone or map URL"),
        (status = 401, description = "Missing or wrong admin key"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all, fields(client = %client.as_str()))]
pub async fn share_location(
    State(state): State<AppState>,
    client: ClientAddr,
    body: std::result::Result<Json<ShareLocationRequest>, JsonRejection>,
) -> Result<Json<LiveLocationResponse>> {
    let Json(body) = body?;
    require_secret(body.admin_key.as_deref(), state.config.admin_key.as_deref())?;

    let request = body.into_db_request()?;
    let location = state.store.set_location(&request, client.as_str()).await?;
    info!(is_active = location.is_active, "Live location updated");

    Ok(Json(location.into()))
}
