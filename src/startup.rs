use crate::components::google_calendar::token::TokenManager;
use crate::components::joiner::Browser;
use crate::components::{GoogleCalendarHandle, MeetingJoiner};
use crate::config::Config;
use crate::error::Error;
use crate::shutdown;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{oneshot, RwLock};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initialize logging with environment-based configuration
pub fn init_logging() -> miette::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| Error::Other(format!("Failed to set up logging: {}", e)))?;

    Ok(())
}

/// Load and initialize the application config
pub async fn load_config() -> miette::Result<Arc<RwLock<Config>>> {
    match Config::load() {
        Ok(config) => Ok(Arc::new(RwLock::new(config))),
        Err(e) => {
            error!("Failed to load configuration: {:?}", e);
            Err(e.into())
        }
    }
}

/// Initialize and start the meeting auto-join loop
pub async fn run(config: Arc<RwLock<Config>>) -> miette::Result<()> {
    let poll_interval_secs = {
        let config_read = config.read().await;
        config_read.poll_interval_secs
    };

    // A missing or unreadable token is an unrecoverable startup fault;
    // later token failures only cost individual ticks
    let token_manager = TokenManager::new(Arc::clone(&config));
    token_manager.get_token().await?;

    info!(
        "Starting meeting auto-join loop (poll interval {}s)",
        poll_interval_secs
    );

    // Spawn the calendar actor and build the poll loop around it
    let calendar_handle = GoogleCalendarHandle::new(Arc::clone(&config));
    let joiner = MeetingJoiner::new(calendar_handle.clone(), Browser);

    // Create shutdown channels
    let (shutdown_send, shutdown_recv) = oneshot::channel();
    let (loop_shutdown_send, loop_shutdown_recv) = oneshot::channel();

    // Spawn signal handler task
    let shutdown_calendar = calendar_handle.clone();
    tokio::spawn(async move {
        shutdown::handle_signals(shutdown_send, loop_shutdown_send, shutdown_calendar).await;
    });

    // Run the poll loop in its own task
    let joiner_task = tokio::spawn(async move {
        joiner
            .run(Duration::from_secs(poll_interval_secs), loop_shutdown_recv)
            .await;
    });

    // Wait for either the loop to end or a shutdown signal
    tokio::select! {
        result = joiner_task => {
            info!("Poll loop ended");
            match result {
                Ok(()) => Ok(()),
                Err(e) => {
                    error!("Poll loop task error: {:?}", e);
                    Err(Error::Other(format!("Poll loop task error: {}", e)).into())
                }
            }
        }
        _ = shutdown_recv => {
            info!("Received shutdown signal, exiting");
            Ok(())
        }
    }
}
