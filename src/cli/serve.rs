use anyhow::Result;

use crate::api;
use crate::core::AppConfig;

pub async fn run(host: String, port: String) -> Result<()> {
    super::init_tracing();

    // Missing OAuth settings are fatal before anything binds
    let config = AppConfig::from_env()?;
    api::serve(host, port, config).await
}
