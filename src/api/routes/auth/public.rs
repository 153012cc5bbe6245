//! Public types for the auth API
use serde::{Deserialize, Serialize};

pub use crate::google::AuthStatus;

#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub code: String,
    /// Accepted but not checked, see DESIGN.md
    pub state: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AuthUrlResponse {
    pub auth_url: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DisconnectResponse {
    pub success: bool,
    pub message: String,
}
