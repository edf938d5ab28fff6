//! Faculty notification core entry point.
//!
//! There is no request surface: the binary only checks that the startup
//! wiring works. It reads the configuration, connects to the database,
//! builds the stores and the notification hub, and stays up until
//! interrupted.

use std::error::Error;

use faculty_app::config::AppConfig;
use faculty_app::state::AppState;
use faculty_app::telemetry::init_tracing;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::from_env()?;
    init_tracing(config.log_format)?;

    tracing::info!("Starting Faculty notification core");

    let state = AppState::connect(&config).await?;
    tracing::info!(
        listener_timeout = ?config.listener_timeout,
        "notification core ready"
    );

    tokio::signal::ctrl_c().await?;
    tracing::info!("shutting down");
    state.db_pool.close().await;

    Ok(())
}
