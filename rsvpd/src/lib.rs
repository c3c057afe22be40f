//! # rsvpd: RSVP and guestbook backend for an event website
//!
//! `rsvpd` accepts RSVP submissions with a guestbook message, keeps running attendance counts,
//! gives an administrator a password-protected view of every entry, and publishes a single
//! "live location" record that the administrator can switch on, update and switch off. It also
//! serves the prebuilt front-end from a static directory.
//!
//! ## Architecture
//!
//! The application is built on [Axum](https://github.com/tokio-rs/axum) for the HTTP layer.
//! Persistence sits behind the [`db::store::Store`] trait with two backends: PostgreSQL
//! (recommended for production) and a single JSON document on local disk (handy for a small
//! single-instance deployment). The backend is chosen at startup from [`config::DatabaseConfig`].
//!
//! ### Request Flow
//!
//! Every request is independent: a handler in [`api::handlers`] validates its input, checks the
//! admin gate where one applies ([`auth`]), and performs one or two store operations. The only
//! process-wide state is the store handle and the configuration, held in [`AppState`]. There are no
//! background tasks.
//!
//! ### Routes
//!
//! | Route | Purpose |
//! |---|---|
//! | `POST /api/rsvp` | submit an RSVP |
//! | `GET /api/guests` | public summary (counts only) |
//! | `GET /api/stats` | attendance counters |
//! | `GET /api/admin/guestbook?password=` | admin HTML page |
//! | `GET /api/admin/guests?password=[&download=true]` | admin JSON export |
//! | `GET /api/live-location` | current live location |
//! | `POST /api/share-location` | update the live location (admin key) |
//! | `GET /api/docs`, `GET /api/openapi.json` | API reference |
//! | `GET /healthz` | liveness |
//! | `GET /internal/metrics` | Prometheus metrics, when enabled |
//!
//! Everything else is served from `static_dir`, falling back to its `index.html`.
//!
//! ## Quick Start
//!
//! ```no_run
//! use clap::Parser;
//! use rsvpd::{Application, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let args = rsvpd::config::Args::parse();
//!     let config = Config::load(&args)?;
//!
//!     rsvpd::telemetry::init_telemetry(config.enable_otel_export)?;
//!
//!     let app = Application::new(config).await?;
//!     app.serve(async {
//!         tokio::signal::ctrl_c().await.expect("Failed to listen for Ctrl+C");
//!     })
//!     .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration
//!
//! See the [`config`] module for configuration options.
pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod errors;
mod openapi;
pub mod telemetry;
mod templates;

#[cfg(test)]
mod test_utils;

use crate::{db::store::Store, errors::Error, openapi::ApiDoc};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{self, HeaderValue, Method},
    routing::{get, post},
};
use axum_prometheus::PrometheusMetricLayer;
use bon::Builder;
pub use config::Config;
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{Level, debug, info};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

/// Largest accepted JSON request body on `/api` routes
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// Application state shared across all request handlers.
///
/// # Example
///
/// ```ignore
/// let state = AppState::builder()
///     .store(store)
///     .config(config)
///     .build();
/// ```
#[derive(Clone, Builder)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub config: Config,
}

/// Get the rsvpd database migrator
pub fn migrator() -> sqlx::migrate::Migrator {
    sqlx::migrate!("./migrations")
}

/// Create CORS layer from configuration
fn create_cors_layer(config: &Config) -> anyhow::Result<CorsLayer> {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([http::header::CONTENT_TYPE])
        .expose_headers([http::header::CONTENT_DISPOSITION]);

    // A wildcard cannot be mixed into an explicit origin list
    let mut cors = if config.cors.allowed_origins.iter().any(|o| o == "*") {
        cors.allow_origin(Any)
    } else {
        let mut origins = Vec::new();
        for origin in &config.cors.allowed_origins {
            origins.push(origin.parse::<HeaderValue>()?);
        }
        cors.allow_origin(origins)
    };

    if let Some(max_age) = config.cors.max_age {
        cors = cors.max_age(std::time::Duration::from_secs(max_age));
    }

    Ok(cors)
}

async fn api_not_found() -> Error {
    Error::NotFound {
        resource: "Route".to_string(),
    }
}

/// Build the main application router with all endpoints and middleware.
///
/// This function constructs the complete Axum router with:
/// - Guestbook, admin and live-location routes under `/api`
/// - API reference UI and OpenAPI document
/// - Static front-end serving with `index.html` fallback
/// - Optional Prometheus metrics
/// - CORS configuration
/// - Tracing middleware
///
/// # Errors
///
/// Returns an error if CORS configuration is invalid.
pub fn build_router(state: &AppState) -> anyhow::Result<Router> {
    let api_routes = Router::new()
        .route("/guests", get(api::handlers::guests::get_guest_summary))
        .route("/rsvp", post(api::handlers::rsvp::create_rsvp))
        .route("/stats", get(api::handlers::stats::get_stats))
        // Admin views (password in query string)
        .route("/admin/guestbook", get(api::handlers::admin::admin_guestbook))
        .route("/admin/guests", get(api::handlers::admin::export_guests))
        // Live location
        .route("/live-location", get(api::handlers::live_location::get_live_location))
        .route("/share-location", post(api::handlers::live_location::share_location))
        .route("/openapi.json", get(|| async { axum::Json(ApiDoc::openapi()) }))
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()))
        .fallback(api_not_found)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state.clone());

    // Serve the front-end, falling back to its entry point for unmatched paths
    let static_dir = &state.config.static_dir;
    let static_files = ServeDir::new(static_dir).fallback(ServeFile::new(static_dir.join("index.html")));

    let router = Router::new()
        .route("/healthz", get(|| async { "OK" }))
        .nest("/api", api_routes)
        .fallback_service(static_files);

    // Create CORS layer from config
    let cors_layer = create_cors_layer(&state.config)?;
    let mut router = router.layer(cors_layer);

    // Add Prometheus metrics if enabled
    if state.config.enable_metrics {
        let (prometheus_layer, metric_handle) = PrometheusMetricLayer::pair();
        router = router
            .route("/internal/metrics", get(|| async move { metric_handle.render() }))
            .layer(prometheus_layer);
    }

    // Add tracing layer
    let router = router.layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO)),
    );

    Ok(router)
}

pub struct Application {
    router: Router,
    app_state: AppState,
    config: Config,
}

impl Application {
    /// Create a new application instance, opening the configured store
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        debug!("Starting rsvpd with storage: {}", config.database.describe());
        let store = db::store::open(&config.database).await?;
        Self::with_store(config, store)
    }

    /// Create an application around an already-open store
    pub fn with_store(config: Config, store: Arc<dyn Store>) -> anyhow::Result<Self> {
        let app_state = AppState::builder().store(store).config(config.clone()).build();
        let router = build_router(&app_state)?;

        Ok(Self {
            router,
            app_state,
            config,
        })
    }

    #[cfg(test)]
    pub fn into_test_server(self) -> axum_test::TestServer {
        axum_test::TestServer::new(self.router).expect("Failed to create test server")
    }

    /// Start serving the application
    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let bind_addr = self.config.bind_address();
        let listener = TcpListener::bind(&bind_addr).await?;
        info!(
            "rsvpd listening on http://{}, available at http://localhost:{}",
            bind_addr, self.config.port
        );

        // Peer addresses feed the client address fallback
        axum::serve(listener, self.router.into_make_service_with_connect_info::<SocketAddr>())
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Closing {} storage...", self.app_state.store.backend());
        self.app_state.store.close().await;

        info!("Shutting down telemetry...");
        telemetry::shutdown_telemetry();

        Ok(())
    }
}
