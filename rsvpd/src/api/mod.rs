//! API layer for HTTP request handling and data models.
//!
//! - **[`handlers`]**: Axum route handlers, mounted under `/api`
//! - **[`models`]**: Request/response data structures
//!
//! # API Structure
//!
//! - **Guestbook** (`/api/rsvp`, `/api/guests`, `/api/stats`): public submission and counts
//! - **Admin** (`/api/admin/*`): full guestbook, gated by the admin password
//! - **Live location** (`/api/live-location`, `/api/share-location`): public read, key-gated write
//!
//! # OpenAPI Documentation
//!
//! All endpoints are documented with `utoipa` annotations. The reference UI is served at
//! `/api/docs` when the server is running.

pub mod handlers;
pub mod models;
