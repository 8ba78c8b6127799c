//! Configuration for the battleship TCP server.
//!
//! Values are layered: built-in defaults, then an optional TOML file named
//! by `BATTLESHIP_CONFIG`, then individual environment overrides:
//!
//! - `BATTLESHIP_BIND_ADDR`         (default: "0.0.0.0")
//! - `BATTLESHIP_PORT`              (default: "8000")
//! - `BATTLESHIP_MAX_CLIENTS`       (default: "1024")
//! - `BATTLESHIP_MAX_GAMES`         (default: "5")
//! - `BATTLESHIP_GAME_TIMEOUT_SECS` (default: "18000", five hours)
//! - `BATTLESHIP_KEEPALIVE_SECS`    (default: "15")

use std::env;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{ensure, Context, Result};
use serde::Deserialize;

/// Server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// IP address / interface to bind to (e.g. "0.0.0.0" or "127.0.0.1").
    pub bind_addr: String,

    /// TCP port to listen on.
    pub port: u16,

    /// Maximum number of simultaneously connected clients.
    pub max_clients: usize,

    /// Maximum number of games held at once.
    pub max_games: usize,

    /// Seconds after creation at which a game is discarded.
    pub game_timeout_secs: u64,

    /// Seconds between keep-alive frames on an event stream.
    pub keepalive_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bind_addr: "0.0.0.0".to_string(),
            port: 8000,
            max_clients: 1024,
            max_games: 5,
            game_timeout_secs: 5 * 60 * 60,
            keepalive_secs: 15,
        }
    }
}

impl Config {
    /// Defaults, then the `BATTLESHIP_CONFIG` file if set, then env vars.
    pub fn from_env() -> Result<Self> {
        let mut config = match env::var("BATTLESHIP_CONFIG") {
            Ok(path) => Config::from_file(path)?,
            Err(_) => Config::default(),
        };

        if let Ok(addr) = env::var("BATTLESHIP_BIND_ADDR") {
            config.bind_addr = addr;
        }
        config.port = read_env_or_default("BATTLESHIP_PORT", config.port)?;
        config.max_clients = read_env_or_default("BATTLESHIP_MAX_CLIENTS", config.max_clients)?;
        config.max_games = read_env_or_default("BATTLESHIP_MAX_GAMES", config.max_games)?;
        config.game_timeout_secs =
            read_env_or_default("BATTLESHIP_GAME_TIMEOUT_SECS", config.game_timeout_secs)?;
        config.keepalive_secs =
            read_env_or_default("BATTLESHIP_KEEPALIVE_SECS", config.keepalive_secs)?;

        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Config::from_toml_str(&text).with_context(|| format!("parsing {}", path.display()))
    }

    /// Parse TOML; absent keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Config = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        ensure!(self.max_games > 0, "max_games must be at least 1");
        ensure!(self.keepalive_secs > 0, "keepalive_secs must be at least 1");
        Ok(())
    }

    /// Convenience: `addr:port` socket string.
    pub fn socket_addr_string(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    pub fn game_timeout(&self) -> Duration {
        Duration::from_secs(self.game_timeout_secs)
    }

    pub fn keepalive(&self) -> Duration {
        Duration::from_secs(self.keepalive_secs)
    }
}

fn read_env_or_default<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(val) => val
            .trim()
            .parse::<T>()
            .with_context(|| format!("invalid value for {}: {:?}", key, val)),
        Err(_) => Ok(default),
    }
}
