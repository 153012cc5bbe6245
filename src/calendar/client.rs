//! HTTP client for the internal Calendar API. Every tool call goes
//! through `CalendarApiClient::call`.

use std::time::Duration;

use reqwest::{Client, Method};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum ApiError {
    /// The API answered with a status >= 400
    #[error("{detail}")]
    Status { status: u16, detail: String },
    #[error("Failed to connect to Calendar API: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Unexpected response from Calendar API: {0}")]
    InvalidResponse(String),
}

#[derive(Clone, Debug)]
pub struct CalendarApiClient {
    base_url: String,
    http: Client,
}

impl CalendarApiClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    /// Issue a request and return the parsed JSON body. Non-2xx responses
    /// become `ApiError::Status` carrying the API's `detail` message.
    pub async fn call<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        query: &[(&str, String)],
    ) -> Result<Value, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("Calendar API {} {}", method, url);

        let mut req = self.http.request(method, &url);
        if !query.is_empty() {
            req = req.query(query);
        }
        if let Some(body) = body {
            req = req.json(body);
        }

        let res = req.send().await?;
        let status = res.status();
        let text = res.text().await?;
        let data: Option<Value> = serde_json::from_str(&text).ok();

        if status.as_u16() >= 400 {
            let detail = data
                .as_ref()
                .and_then(|d| d.get("detail"))
                .map(detail_message)
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| String::from("API error"));
            tracing::warn!("Calendar API {} returned {}: {}", url, status, detail);
            return Err(ApiError::Status {
                status: status.as_u16(),
                detail,
            });
        }

        // 204 and other bodiless successes carry nothing to flatten
        if text.trim().is_empty() {
            return Ok(Value::Object(Default::default()));
        }

        data.ok_or_else(|| ApiError::InvalidResponse(format!("{} returned a non-JSON body", url)))
    }

    pub async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Value, ApiError> {
        self.call::<Value>(Method::GET, path, None, query).await
    }

    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value, ApiError> {
        self.call(Method::POST, path, Some(body), &[]).await
    }

    pub async fn patch<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> Result<Value, ApiError> {
        self.call(Method::PATCH, path, body, &[]).await
    }

    pub async fn delete(&self, path: &str) -> Result<Value, ApiError> {
        self.call::<Value>(Method::DELETE, path, None, &[]).await
    }
}

// FastAPI-style validation errors put a list of objects in `detail`
fn detail_message(detail: &Value) -> String {
    match detail {
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item.get("msg").and_then(Value::as_str) {
                Some(msg) => msg.to_string(),
                None => item.to_string(),
            })
            .collect::<Vec<_>>()
            .join("; "),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
