//! OpenAPI documentation for the `/api/*` endpoints.
//!
//! Served as JSON at `/api/openapi.json` and rendered with Scalar at `/api/docs`.

use utoipa::OpenApi;

use crate::api;

#[derive(OpenApi)]
#[openapi(
    servers(
        (url = "/api", description = "Guestbook API")
    ),
    paths(
        api::handlers::guests::get_guest_summary,
        api::handlers::rsvp::create_rsvp,
        api::handlers::stats::get_stats,
        api::handlers::admin::admin_guestbook,
        api::handlers::admin::export_guests,
        api::handlers::live_location::get_live_location,
        api::handlers::live_location::share_location,
    ),
    components(
        schemas(
            api::models::guests::RsvpCreate,
            api::models::guests::RsvpGuest,
            api::models::guests::RsvpResponse,
            api::models::guests::GuestSummaryResponse,
            api::models::guests::GuestResponse,
            api::models::guests::GuestbookExport,
            api::models::stats::StatsResponse,
            api::models::live_location::LiveLocationResponse,
            api::models::live_location::ShareLocationRequest,
            crate::db::models::guests::GuestStatus,
        )
    ),
    tags(
        (name = "guestbook", description = "Submit RSVPs and read the public guestbook summary."),
        (name = "admin", description = "Password-gated views of every guestbook entry.

Pass the admin password as the `password` query parameter."),
        (name = "live-location", description = "The event's live location.

Anyone can read it. Updating it requires the admin key in the request body."),
    ),
    info(
        title = "rsvpd API",
        version = "1.0.0",
        description = "RSVP, guestbook and live location API for an event website.

## Errors

Every error response carries a JSON body with a single message:

```json
{ \"error\": \"Name and message are required\" }
```",
    ),
)]
pub struct ApiDoc;
