//! Router for the Google OAuth API

use axum::extract::{Query, State};
use axum::response::Redirect;
use axum::{Json, Router};

use super::public;
use crate::api::state::SharedState;
use crate::google::AuthOutcome;

/// Front-end page the browser lands on after the OAuth round trip
pub const CONNECT_CALENDAR_PATH: &str = "/connect-calendar";

/// Google redirects here after consent. Always answers with a redirect
/// to the connect page, carrying either the connected email or the
/// failure message.
async fn google_callback(
    State(state): State<SharedState>,
    Query(params): Query<public::CallbackQuery>,
) -> Redirect {
    if params.state.is_some() {
        tracing::debug!("Ignoring OAuth state parameter");
    }

    let outcome = state.auth.complete_authorization(&params.code).await;
    Redirect::temporary(&callback_redirect(&outcome))
}

fn callback_redirect(outcome: &AuthOutcome) -> String {
    match outcome {
        AuthOutcome::Connected { email: Some(email) } => format!(
            "{}?success=true&email={}",
            CONNECT_CALENDAR_PATH,
            urlencoding::encode(email)
        ),
        AuthOutcome::Connected { email: None } => {
            format!("{}?success=true", CONNECT_CALENDAR_PATH)
        }
        AuthOutcome::Failed { .. } => format!(
            "{}?error={}",
            CONNECT_CALENDAR_PATH,
            urlencoding::encode(&outcome.message())
        ),
    }
}

async fn google_auth_url(
    State(state): State<SharedState>,
) -> Result<Json<public::AuthUrlResponse>, crate::api::public::ApiError> {
    let auth_url = state.auth.authorization_url()?;
    Ok(Json(public::AuthUrlResponse { auth_url }))
}

async fn google_status(State(state): State<SharedState>) -> Json<public::AuthStatus> {
    Json(state.auth.get_status().await)
}

async fn google_disconnect(State(state): State<SharedState>) -> Json<public::DisconnectResponse> {
    let resp = match state.auth.disconnect() {
        Ok(()) => public::DisconnectResponse {
            success: true,
            message: String::from("Successfully disconnected from Google Calendar"),
        },
        Err(err) => public::DisconnectResponse {
            success: false,
            message: format!("Failed to disconnect: {}", err),
        },
    };
    Json(resp)
}

/// Create the auth router
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/google/callback", axum::routing::get(google_callback))
        .route("/google/url", axum::routing::get(google_auth_url))
        .route("/google/status", axum::routing::get(google_status))
        .route("/google/disconnect", axum::routing::post(google_disconnect))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_encodes_the_email_on_success() {
        let outcome = AuthOutcome::Connected {
            email: Some(String::from("dr.smith+cal@clinic.com")),
        };
        assert_eq!(
            callback_redirect(&outcome),
            "/connect-calendar?success=true&email=dr.smith%2Bcal%40clinic.com"
        );
    }

    #[test]
    fn it_omits_a_missing_email() {
        let outcome = AuthOutcome::Connected { email: None };
        assert_eq!(callback_redirect(&outcome), "/connect-calendar?success=true");
    }

    #[test]
    fn it_encodes_the_failure_message() {
        let outcome = AuthOutcome::Failed {
            reason: String::from("400: invalid_grant"),
        };
        assert_eq!(
            callback_redirect(&outcome),
            "/connect-calendar?error=Authentication%20failed%3A%20400%3A%20invalid_grant"
        );
    }
}
