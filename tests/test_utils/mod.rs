//! Test utilities for integration tests
#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::{Router, body::Body};
use chrono::{Duration, Utc};
use serde_json::{Value, json};
use tempfile::TempDir;

use callpilot::api::{AppState, app};
use callpilot::core::AppConfig;
use callpilot::google::oauth::GoogleEndpoints;

pub const TEST_REDIRECT_URI: &str = "http://localhost:2222/api/auth/google/callback";

/// An app wired to fake upstreams, plus the directory holding its
/// credential file. Keep the struct alive for the duration of the test
/// or the directory is removed.
pub struct TestApp {
    pub router: Router,
    pub token_file: PathBuf,
    _dir: TempDir,
}

/// Creates a test application router that talks to `calendar_url` for
/// the Calendar API and `google_url` for every Google OAuth endpoint.
///
/// Tests that use a `mockito` server should add `#[serial]` so mocks
/// from one test never answer requests from another.
pub fn test_app(calendar_url: &str, google_url: &str) -> TestApp {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let token_file = dir.path().join("token.json");

    let config = AppConfig {
        google_client_id: String::from("test-client-id"),
        google_client_secret: String::from("test-client-secret"),
        google_redirect_uri: String::from(TEST_REDIRECT_URI),
        google_scopes: vec![String::from(
            "https://www.googleapis.com/auth/calendar",
        )],
        google_endpoints: GoogleEndpoints {
            auth_uri: format!("{}/o/oauth2/auth", google_url),
            token_uri: format!("{}/token", google_url),
            userinfo_uri: format!("{}/userinfo", google_url),
        },
        token_file: token_file.clone(),
        calendar_api_url: calendar_url.to_string(),
    };
    let app_state = AppState::new(&config).expect("Failed to build app state");

    TestApp {
        router: app(Arc::new(app_state)),
        token_file,
        _dir: dir,
    }
}

/// A credential record in the on-disk format, expiring `expires_in`
/// seconds from now. Negative values give an already expired token.
pub fn stored_credentials(google_url: &str, access_token: &str, expires_in: i64) -> Value {
    json!({
        "token": access_token,
        "refresh_token": "test-refresh-token",
        "token_uri": format!("{}/token", google_url),
        "client_id": "test-client-id",
        "client_secret": "test-client-secret",
        "scopes": ["https://www.googleapis.com/auth/calendar"],
        "expiry": (Utc::now() + Duration::seconds(expires_in)).to_rfc3339(),
    })
}

pub async fn body_to_string(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Failed to read body");
    String::from_utf8(bytes.to_vec()).expect("Body is not UTF-8")
}

pub async fn body_to_json(body: Body) -> Value {
    serde_json::from_str(&body_to_string(body).await).expect("Body is not JSON")
}
