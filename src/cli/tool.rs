use anyhow::{Result, anyhow};
use serde_json::Value;

use crate::calendar::CalendarApiClient;
use crate::core::AppConfig;
use crate::tools::{all_tools, find_tool};

/// Call a tool directly against the configured Calendar API. Useful for
/// checking the upstream without going through a voice session.
pub async fn run(name: &str, args: &str) -> Result<()> {
    let config = AppConfig::from_env()?;
    let client = CalendarApiClient::new(&config.calendar_api_url)?;
    let tools = all_tools(&client);

    let tool = find_tool(&tools, name).ok_or_else(|| {
        let known: Vec<String> = tools.iter().map(|t| t.function_name()).collect();
        anyhow!("Unknown tool: {}. Available: {}", name, known.join(", "))
    })?;
    let args: Value = serde_json::from_str(args)?;

    let resp = tool.call(args).await;
    println!("{}", serde_json::to_string_pretty(&resp)?);

    Ok(())
}
