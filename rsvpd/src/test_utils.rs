//! Test utilities for HTTP-level tests.

use std::path::Path;

use axum_test::TestServer;
use tempfile::TempDir;

use crate::config::{Config, DatabaseConfig};

pub const TEST_ADMIN_PASSWORD: &str = "graduation2025";
pub const TEST_ADMIN_KEY: &str = "test-admin-key";

/// Config backed by a JSON file and a static directory under `dir`
pub fn create_test_config(dir: &Path) -> Config {
    Config {
        database: DatabaseConfig::File {
            path: dir.join("guestbook.json"),
        },
        admin_password: Some(TEST_ADMIN_PASSWORD.to_string()),
        admin_key: Some(TEST_ADMIN_KEY.to_string()),
        static_dir: dir.join("public"),
        ..Default::default()
    }
}

/// A test server over a fresh JSON store. Keep the returned directory alive for the test's duration.
pub async fn create_test_app() -> (TestServer, TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let public = dir.path().join("public");
    std::fs::create_dir_all(&public).expect("Failed to create static dir");
    std::fs::write(public.join("index.html"), "<!DOCTYPE html><title>rsvpd test page</title>").expect("Failed to write index.html");

    let config = create_test_config(dir.path());
    config.validate().expect("Test config should be valid");

    let app = crate::Application::new(config).await.expect("Failed to create application");
    (app.into_test_server(), dir)
}
