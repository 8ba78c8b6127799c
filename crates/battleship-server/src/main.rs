//! TCP server binary for two-player battleship.

use anyhow::Result;
use battleship_server::config::Config;
use battleship_server::server;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    info!(
        bind_addr = %config.bind_addr,
        port = config.port,
        max_clients = config.max_clients,
        max_games = config.max_games,
        game_timeout_secs = config.game_timeout_secs,
        "starting battleship-server"
    );

    server::run(config).await
}
