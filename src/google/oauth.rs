//! Raw calls against Google's OAuth endpoints: building the consent
//! URL, exchanging an authorization code, refreshing an access token
//! and looking up the account's email address.

use reqwest::{Client, Url};
use serde::Deserialize;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq)]
pub struct GoogleEndpoints {
    pub auth_uri: String,
    pub token_uri: String,
    pub userinfo_uri: String,
}

impl Default for GoogleEndpoints {
    fn default() -> Self {
        Self {
            auth_uri: String::from("https://accounts.google.com/o/oauth2/auth"),
            token_uri: String::from("https://oauth2.googleapis.com/token"),
            userinfo_uri: String::from("https://www.googleapis.com/oauth2/v2/userinfo"),
        }
    }
}

#[derive(Debug, Error)]
pub enum OAuthError {
    #[error("request to {url} failed: {source}")]
    Transport { url: String, source: reqwest::Error },
    #[error("{status}: {message}")]
    Rejected { status: u16, message: String },
    #[error("invalid response from {url}: {source}")]
    InvalidResponse { url: String, source: reqwest::Error },
    #[error("invalid endpoint URL {0}")]
    InvalidEndpoint(String),
}

#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
}

#[derive(Deserialize)]
struct ProviderError {
    error: Option<String>,
    error_description: Option<String>,
}

#[derive(Deserialize)]
struct UserInfo {
    email: Option<String>,
}

/// Build the consent URL. `access_type=offline` and `prompt=consent`
/// make Google hand out a refresh token on every authorization, even
/// when the user has consented before.
pub fn authorization_url(
    auth_uri: &str,
    client_id: &str,
    redirect_uri: &str,
    scopes: &[String],
) -> Result<String, OAuthError> {
    let scope = scopes.join(" ");
    let url = Url::parse_with_params(
        auth_uri,
        &[
            ("response_type", "code"),
            ("client_id", client_id),
            ("redirect_uri", redirect_uri),
            ("scope", scope.as_str()),
            ("access_type", "offline"),
            ("include_granted_scopes", "true"),
            ("prompt", "consent"),
        ],
    )
    .map_err(|_| OAuthError::InvalidEndpoint(auth_uri.to_string()))?;

    Ok(url.to_string())
}

pub async fn exchange_code_for_token(
    client: &Client,
    token_uri: &str,
    client_id: &str,
    client_secret: &str,
    code: &str,
    redirect_uri: &str,
) -> Result<TokenResponse, OAuthError> {
    let params = [
        ("grant_type", "authorization_code"),
        ("code", code),
        ("client_id", client_id),
        ("client_secret", client_secret),
        ("redirect_uri", redirect_uri),
    ];
    post_token_request(client, token_uri, &params).await
}

pub async fn refresh_access_token(
    client: &Client,
    token_uri: &str,
    client_id: &str,
    client_secret: &str,
    refresh_token: &str,
) -> Result<TokenResponse, OAuthError> {
    let params = [
        ("grant_type", "refresh_token"),
        ("refresh_token", refresh_token),
        ("client_id", client_id),
        ("client_secret", client_secret),
    ];
    post_token_request(client, token_uri, &params).await
}

/// Look up the email address of the account the access token belongs to.
pub async fn fetch_user_email(
    client: &Client,
    userinfo_uri: &str,
    access_token: &str,
) -> Result<Option<String>, OAuthError> {
    let res = client
        .get(userinfo_uri)
        .bearer_auth(access_token)
        .send()
        .await
        .map_err(|source| OAuthError::Transport {
            url: userinfo_uri.to_string(),
            source,
        })?;

    let status = res.status();
    if !status.is_success() {
        let text = res.text().await.unwrap_or_default();
        return Err(OAuthError::Rejected {
            status: status.as_u16(),
            message: text,
        });
    }

    let info: UserInfo = res
        .json()
        .await
        .map_err(|source| OAuthError::InvalidResponse {
            url: userinfo_uri.to_string(),
            source,
        })?;
    Ok(info.email)
}

async fn post_token_request(
    client: &Client,
    token_uri: &str,
    params: &[(&str, &str)],
) -> Result<TokenResponse, OAuthError> {
    let res = client
        .post(token_uri)
        .form(params)
        .send()
        .await
        .map_err(|source| OAuthError::Transport {
            url: token_uri.to_string(),
            source,
        })?;

    let status = res.status();
    if !status.is_success() {
        let text = res.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<ProviderError>(&text) {
            Ok(ProviderError {
                error: Some(error),
                error_description: Some(description),
            }) => format!("{} ({})", error, description),
            Ok(ProviderError {
                error: Some(error), ..
            }) => error,
            _ => text,
        };
        return Err(OAuthError::Rejected {
            status: status.as_u16(),
            message,
        });
    }

    res.json()
        .await
        .map_err(|source| OAuthError::InvalidResponse {
            url: token_uri.to_string(),
            source,
        })
}
