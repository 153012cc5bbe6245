use std::sync::Arc;

use anyhow::Result;

use crate::calendar::CalendarApiClient;
use crate::core::AppConfig;
use crate::google::GoogleAuth;
use crate::tools::{BoxedAgentTool, all_tools};

pub type SharedState = Arc<AppState>;

/// Built once at startup. Nothing in here is mutated while serving;
/// the only shared mutable resource is the credential file behind
/// `auth`. Each tool holds its own handle to the Calendar API client.
pub struct AppState {
    pub auth: GoogleAuth,
    pub tools: Vec<BoxedAgentTool>,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let auth = GoogleAuth::new(config)?;
        let calendar = CalendarApiClient::new(&config.calendar_api_url)?;
        let tools = all_tools(&calendar);

        Ok(Self { auth, tools })
    }
}
