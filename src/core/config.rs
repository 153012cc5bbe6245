use std::env;
use std::path::PathBuf;

use thiserror::Error;

use crate::google::oauth::GoogleEndpoints;

pub const DEFAULT_TOKEN_FILE: &str = "./token.json";
pub const DEFAULT_CALENDAR_API_URL: &str = "http://localhost:8000";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("GOOGLE_REDIRECT_URI environment variable is required")]
    MissingRedirectUri,
    #[error("GOOGLE_OAUTH_SCOPES environment variable is required")]
    MissingScopes,
}

/// Everything needed to talk to Google and the Calendar API. Built
/// once at startup and handed to whatever needs it.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub google_client_id: String,
    pub google_client_secret: String,
    pub google_redirect_uri: String,
    pub google_scopes: Vec<String>,
    pub google_endpoints: GoogleEndpoints,
    pub token_file: PathBuf,
    pub calendar_api_url: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from an arbitrary variable lookup so tests don't
    /// have to mutate the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let google_redirect_uri = var("GOOGLE_REDIRECT_URI").ok_or(ConfigError::MissingRedirectUri)?;
        let google_scopes = parse_scopes(&var("GOOGLE_OAUTH_SCOPES").unwrap_or_default());
        if google_scopes.is_empty() {
            return Err(ConfigError::MissingScopes);
        }

        let defaults = GoogleEndpoints::default();
        let google_endpoints = GoogleEndpoints {
            auth_uri: var("GOOGLE_OAUTH_AUTH_URI").unwrap_or(defaults.auth_uri),
            token_uri: var("GOOGLE_OAUTH_TOKEN_URI").unwrap_or(defaults.token_uri),
            userinfo_uri: var("GOOGLE_USERINFO_URI").unwrap_or(defaults.userinfo_uri),
        };

        Ok(Self {
            google_client_id: var("GOOGLE_OAUTH_CLIENT_ID").unwrap_or_default(),
            google_client_secret: var("GOOGLE_OAUTH_CLIENT_SECRET").unwrap_or_default(),
            google_redirect_uri,
            google_scopes,
            google_endpoints,
            token_file: var("GOOGLE_TOKEN_FILE")
                .unwrap_or_else(|| DEFAULT_TOKEN_FILE.to_string())
                .into(),
            calendar_api_url: var("CALENDAR_API_BASE_URL")
                .unwrap_or_else(|| DEFAULT_CALENDAR_API_URL.to_string()),
        })
    }
}

/// Scopes may be separated by commas, whitespace or both.
pub fn parse_scopes(raw: &str) -> Vec<String> {
    raw.replace(',', " ")
        .split_whitespace()
        .map(String::from)
        .collect()
}
