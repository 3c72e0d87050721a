use axum_helpers::ShutdownCoordinator;
use core_config::FromEnv;
use core_config::tracing::{init_tracing, install_color_eyre};
use ferrum_api::{config::Config, lifecycle};
use tracing::info;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    let config = Config::from_env()?;

    init_tracing(&config.environment, &config.log_level);
    info!(?config, "Configuration loaded");

    let coordinator = ShutdownCoordinator::new();
    coordinator.listen_for_signals();

    lifecycle::run(config, coordinator).await?;

    info!("Ferrum shutdown complete");
    Ok(())
}
