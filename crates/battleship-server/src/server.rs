//! TCP listener and top-level server wiring.
//!
//! This module:
//! - Listens on the configured address/port.
//! - Accepts new TCP connections, refusing them past `max_clients`.
//! - Assigns each connection a `ClientId`.
//! - Spawns a per-client task that owns the connection's session.
//!
//! Games live in the shared [`GameRegistry`](battleship_core::GameRegistry)
//! inside [`AppState`]; there is no central engine task.

use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use crate::client;
use crate::config::Config;
use crate::types::{AppState, ClientId};

static NEXT_CLIENT_ID: AtomicU64 = AtomicU64::new(1);

fn next_client_id() -> ClientId {
    let id = NEXT_CLIENT_ID.fetch_add(1, Ordering::Relaxed);
    ClientId(id)
}

/// Run the TCP server with the given configuration.
pub async fn run(config: Config) -> Result<()> {
    let addr = config.socket_addr_string();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    info!(%addr, "listening");

    serve(listener, AppState::new(&config)).await
}

/// Accept connections on an already bound listener until it fails.
pub async fn serve(listener: TcpListener, state: AppState) -> Result<()> {
    loop {
        let (stream, peer_addr) = listener.accept().await?;
        let current_clients = state.connections.read().await.len();

        if current_clients >= state.max_clients {
            warn!(
                %peer_addr,
                max_clients = state.max_clients,
                "rejecting connection: max_clients reached"
            );
            // Dropping the stream closes it.
            continue;
        }

        let client_id = next_client_id();
        info!(client = client_id.0, %peer_addr, "accepted connection");
        state.connections.write().await.insert(client_id, peer_addr);

        let state = state.clone();
        tokio::spawn(async move {
            let connections = state.connections.clone();
            match client::run_client(client_id, stream, state).await {
                Ok(()) => info!(client = client_id.0, "client disconnected"),
                Err(e) => error!(client = client_id.0, error = %e, "client error"),
            }
            connections.write().await.remove(&client_id);
        });
    }
}
