use anyhow::Result;
use callpilot::cli;

#[tokio::main]
async fn main() -> Result<()> {
    cli::run().await
}
