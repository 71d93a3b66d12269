mod components;
mod config;
mod error;
mod shutdown;
mod startup;

use tracing::info;

#[tokio::main]
async fn main() -> miette::Result<()> {
    // Initialize logging
    startup::init_logging()?;

    info!("Starting Kokousbotti");

    // Load configuration
    let config = startup::load_config().await?;

    // Start the poll loop
    startup::run(config).await
}
