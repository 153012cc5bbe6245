//! Google OAuth session management.
//!
//! `GoogleAuth` owns the full token lifecycle for the single connected
//! calendar: consent URL, code exchange, silent refresh and disconnect.
//! Provider failures never escape as errors past `complete_authorization`
//! or `get_active_credentials`; they collapse into an `AuthOutcome` or
//! an absent credential.

use std::collections::BTreeSet;

use chrono::{Duration, Utc};
use reqwest::Client;
use serde::Serialize;
use thiserror::Error;

use super::oauth::{self, GoogleEndpoints, OAuthError, TokenResponse};
use super::token_store::{CredentialRecord, TokenStore, TokenStoreError};
use crate::core::{AppConfig, ConfigError};

/// Google's alias for the account's main calendar
pub const PRIMARY_CALENDAR_ID: &str = "primary";

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0}")]
    Provider(#[from] OAuthError),
    #[error("{0}")]
    Store(#[from] TokenStoreError),
    #[error("no refresh token available")]
    MissingRefreshToken,
}

/// Result of handling an OAuth callback.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthOutcome {
    Connected { email: Option<String> },
    Failed { reason: String },
}

impl AuthOutcome {
    pub fn is_connected(&self) -> bool {
        matches!(self, AuthOutcome::Connected { .. })
    }

    pub fn message(&self) -> String {
        match self {
            AuthOutcome::Connected { .. } => {
                String::from("Successfully connected to Google Calendar")
            }
            AuthOutcome::Failed { reason } => format!("Authentication failed: {}", reason),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthStatus {
    pub connected: bool,
    pub email: Option<String>,
    pub calendar_id: Option<String>,
}

impl AuthStatus {
    fn disconnected() -> Self {
        Self {
            connected: false,
            email: None,
            calendar_id: None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct GoogleAuth {
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    scopes: Vec<String>,
    endpoints: GoogleEndpoints,
    store: TokenStore,
    http: Client,
}

impl GoogleAuth {
    pub fn new(config: &AppConfig) -> Result<Self, ConfigError> {
        if config.google_redirect_uri.trim().is_empty() {
            return Err(ConfigError::MissingRedirectUri);
        }
        if config.google_scopes.is_empty() {
            return Err(ConfigError::MissingScopes);
        }

        Ok(Self {
            client_id: config.google_client_id.clone(),
            client_secret: config.google_client_secret.clone(),
            redirect_uri: config.google_redirect_uri.clone(),
            scopes: config.google_scopes.clone(),
            endpoints: config.google_endpoints.clone(),
            store: TokenStore::new(&config.token_file),
            http: Client::new(),
        })
    }

    pub fn store(&self) -> &TokenStore {
        &self.store
    }

    pub fn authorization_url(&self) -> Result<String, OAuthError> {
        tracing::debug!(
            client_id = %redact(&self.client_id),
            redirect_uri = %self.redirect_uri,
            scopes = ?self.scopes,
            "Building Google authorization URL"
        );

        oauth::authorization_url(
            &self.endpoints.auth_uri,
            &self.client_id,
            &self.redirect_uri,
            &self.scopes,
        )
    }

    /// Exchange the one-time code from the OAuth callback, persist the
    /// resulting tokens and look up the account email.
    pub async fn complete_authorization(&self, code: &str) -> AuthOutcome {
        match self.exchange_and_store(code).await {
            Ok(record) => {
                let email = self.user_email(&record).await;
                tracing::info!(email = ?email, "Connected Google Calendar");
                AuthOutcome::Connected { email }
            }
            Err(err) => {
                tracing::warn!("Google authorization failed: {}", err);
                AuthOutcome::Failed {
                    reason: err.to_string(),
                }
            }
        }
    }

    /// Load the stored credentials, refreshing them first if the access
    /// token has expired. `None` means there is no usable session.
    pub async fn get_active_credentials(&self) -> Option<CredentialRecord> {
        let record = match self.store.load() {
            Ok(record) => record,
            Err(TokenStoreError::NotFound(_)) => return None,
            Err(err) => {
                tracing::warn!("Ignoring unreadable credentials: {}", err);
                return None;
            }
        };

        if record.is_expired() {
            return match self.refresh(&record).await {
                Ok(refreshed) if refreshed.is_valid() => Some(refreshed),
                Ok(_) => None,
                Err(err) => {
                    tracing::warn!("Silent token refresh failed: {}", err);
                    None
                }
            };
        }

        record.is_valid().then_some(record)
    }

    pub async fn is_authenticated(&self) -> bool {
        self.get_active_credentials().await.is_some()
    }

    pub async fn get_status(&self) -> AuthStatus {
        let Some(record) = self.get_active_credentials().await else {
            return AuthStatus::disconnected();
        };

        AuthStatus {
            connected: true,
            email: self.user_email(&record).await,
            calendar_id: Some(PRIMARY_CALENDAR_ID.to_string()),
        }
    }

    pub fn disconnect(&self) -> Result<(), TokenStoreError> {
        self.store.delete()?;
        tracing::info!("Disconnected Google Calendar");
        Ok(())
    }

    async fn exchange_and_store(&self, code: &str) -> Result<CredentialRecord, AuthError> {
        let tokens = oauth::exchange_code_for_token(
            &self.http,
            &self.endpoints.token_uri,
            &self.client_id,
            &self.client_secret,
            code,
            &self.redirect_uri,
        )
        .await?;

        let granted_scopes = tokens
            .scope
            .as_deref()
            .map(oauth_scopes)
            .unwrap_or_else(|| self.scopes.iter().cloned().collect());

        let record = CredentialRecord {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            token_endpoint: self.endpoints.token_uri.clone(),
            client_id: self.client_id.clone(),
            client_secret: self.client_secret.clone(),
            granted_scopes,
            expiry: expiry_from(tokens.expires_in),
        };
        self.store.save(&record)?;

        Ok(record)
    }

    async fn refresh(&self, record: &CredentialRecord) -> Result<CredentialRecord, AuthError> {
        let refresh_token = record
            .refresh_token
            .as_deref()
            .ok_or(AuthError::MissingRefreshToken)?;

        tracing::debug!("Access token expired, refreshing");
        let tokens = oauth::refresh_access_token(
            &self.http,
            &record.token_endpoint,
            &record.client_id,
            &record.client_secret,
            refresh_token,
        )
        .await?;

        let refreshed = refreshed_record(record, tokens);
        self.store.save(&refreshed)?;

        Ok(refreshed)
    }

    async fn user_email(&self, record: &CredentialRecord) -> Option<String> {
        match oauth::fetch_user_email(&self.http, &self.endpoints.userinfo_uri, &record.access_token)
            .await
        {
            Ok(email) => email,
            Err(err) => {
                tracing::warn!("Failed to look up account email: {}", err);
                None
            }
        }
    }
}

fn refreshed_record(previous: &CredentialRecord, tokens: TokenResponse) -> CredentialRecord {
    // Google usually omits the refresh token on refresh, keep the old one
    let refresh_token = tokens
        .refresh_token
        .filter(|t| !t.is_empty())
        .or_else(|| previous.refresh_token.clone());

    CredentialRecord {
        access_token: tokens.access_token,
        refresh_token,
        granted_scopes: tokens
            .scope
            .as_deref()
            .map(oauth_scopes)
            .unwrap_or_else(|| previous.granted_scopes.clone()),
        expiry: expiry_from(tokens.expires_in),
        ..previous.clone()
    }
}

fn expiry_from(expires_in: Option<i64>) -> Option<chrono::DateTime<Utc>> {
    expires_in
        .filter(|secs| *secs > 0)
        .map(|secs| Utc::now() + Duration::seconds(secs))
}

fn oauth_scopes(scope: &str) -> BTreeSet<String> {
    scope.split_whitespace().map(String::from).collect()
}

fn redact(value: &str) -> String {
    if value.is_empty() {
        return String::from("MISSING");
    }
    let prefix: String = value.chars().take(8).collect();
    format!("{}...", prefix)
}
