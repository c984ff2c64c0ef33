use anyhow::Context;
use parley::{api::AskClient, config, logging, ui};
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    config::initialize_config().context("failed to initialize configuration")?;
    let config = config::get_config();

    // Handle must outlive the UI so buffered log lines get flushed.
    let _logger = logging::init(&config.log_level).context("failed to initialize logging")?;
    log::info!("starting parley against {}", config.endpoint);

    let client = AskClient::new(&config.endpoint);
    ui::run_ui(client, Duration::from_millis(config.tick_rate_ms)).await?;

    Ok(())
}
