use crate::{
    AppState,
    api::models::guests::{AdminQuery, GuestResponse, GuestbookExport},
    auth::require_secret,
    errors::{Error, Result},
    templates::render_admin_guestbook,
};
use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    http::{HeaderValue, header},
    response::{Html, IntoResponse, Response},
};
use url::form_urlencoded;

/// An unreadable query string carries no usable password, so it falls through to the gate as empty
fn admin_query(query: std::result::Result<Query<AdminQuery>, QueryRejection>) -> AdminQuery {
    query.map(|Query(q)| q).unwrap_or_else(|e| {
        tracing::debug!("Unreadable admin query: {}", e.body_text());
        AdminQuery::default()
    })
}

/// Link to the JSON export carrying the same password
fn export_url(password: &str) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("password", password)
        .append_pair("download", "true")
        .finish();
    format!("/api/admin/guests?{query}")
}

#[utoipa::path(
    get,
    path = "/admin/guestbook",
    tag = "admin",
    summary = "Guestbook admin page",
    description = "HTML page listing every entry, newest first, with a link to the JSON export.",
    params(AdminQuery),
    responses(
        (status = 200, description = "Admin page", content_type = "text/html", body = String),
        (status = 401, description = "Missing or wrong password"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn admin_guestbook(
    State(state): State<AppState>,
    query: std::result::Result<Query<AdminQuery>, QueryRejection>,
) -> Result<Html<String>> {
    let query = admin_query(query);
    let password = query.password.as_deref();
    require_secret(password, state.config.admin_password.as_deref())?;

    let guests = state.store.list_guests().await?;
    let stats = state.store.get_stats().await?;

    let html = render_admin_guestbook(&guests, &stats, &export_url(password.unwrap_or_default())).map_err(|e| Error::Internal {
        operation: format!("render admin guestbook: {e}"),
    })?;

    Ok(Html(html))
}

#[utoipa::path(
    get,
    path = "/admin/guests",
    tag = "admin",
    summary = "Export the guestbook",
    description = "Every entry plus the counters as JSON. With `download=true` the body is sent as a file attachment.",
    params(AdminQuery),
    responses(
        (status = 200, description = "Full guestbook", body = GuestbookExport),
        (status = 401, description = "Missing or wrong password"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn export_guests(
    State(state): State<AppState>,
    query: std::result::Result<Query<AdminQuery>, QueryRejection>,
) -> Result<Response> {
    let query = admin_query(query);
    require_secret(query.password.as_deref(), state.config.admin_password.as_deref())?;
    let download = query.wants_download().map_err(Error::bad_request)?;

    let guests = state.store.list_guests().await?;
    let stats = state.store.get_stats().await?;
    let export = GuestbookExport {
        guests: guests.into_iter().map(GuestResponse::from).collect(),
        stats: stats.into(),
    };

    let mut response = Json(export).into_response();
    if download {
        response.headers_mut().insert(
            header::CONTENT_DISPOSITION,
            HeaderValue::from_static("attachment; filename=\"guestbook-export.json\""),
        );
    }

    Ok(response)
}
