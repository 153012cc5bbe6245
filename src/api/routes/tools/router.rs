//! Router for the voice agent tools API

use anyhow::anyhow;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde_json::Value;

use crate::api::state::SharedState;
use crate::tools::find_tool;

/// List every tool definition so the agent platform can register them
async fn list_tools(State(state): State<SharedState>) -> Response {
    Json(&state.tools).into_response()
}

/// Invoke a single tool. Failures inside the tool come back as a
/// `success: false` envelope with a 200, only unknown tools are errors.
async fn call_tool(
    State(state): State<SharedState>,
    Path(name): Path<String>,
    body: Bytes,
) -> Result<Json<Value>, crate::api::public::ApiError> {
    let tool = find_tool(&state.tools, &name).ok_or_else(|| {
        crate::api::public::ApiError::not_found(anyhow!("Unknown tool: {}", name))
    })?;

    // An empty body is the same as calling with no arguments
    let args = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body)
            .map_err(|err| crate::api::public::ApiError::bad_request(anyhow!(err)))?
    };
    tracing::info!("Calling tool {}", name);
    let resp = tool.call(args).await;

    if resp.get("success").and_then(Value::as_bool) == Some(false) {
        tracing::warn!("Tool {} failed: {}", name, resp["error"]);
    }

    Ok(Json(resp))
}

/// Create the tools router
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/", axum::routing::get(list_tools))
        .route("/{name}", axum::routing::post(call_tool))
}
