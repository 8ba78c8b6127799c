//! Per-player event stream.
//!
//! Once a connection sends `EVENTS` it is dedicated to one wait:
//! keep-alive frames go out on a fixed tick until the player's turn
//! signal fires, then a single `refresh` frame is written and the stream
//! ends. A client hang-up ends it early.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use battleship_core::TurnSignal;
use battleship_protocol::{format_event, EventFrame};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::debug;

use crate::types::ClientId;

/// Drive the stream until refresh or disconnect.
pub async fn run_event_stream<R, W>(
    client_id: ClientId,
    signal: Arc<TurnSignal>,
    keepalive: Duration,
    reader: &mut R,
    writer: &mut W,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut ticker = interval_at(Instant::now() + keepalive, keepalive);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut scratch = String::new();

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                write_frame(writer, EventFrame::KeepAlive).await?;
            }
            _ = signal.wait() => {
                debug!(client = client_id.0, "turn signal, sending refresh");
                write_frame(writer, EventFrame::Refresh).await?;
                return Ok(());
            }
            read = reader.read_line(&mut scratch) => {
                match read {
                    Ok(0) | Err(_) => {
                        debug!(client = client_id.0, "event stream closed by client");
                        return Ok(());
                    }
                    // Anything the client sends while streaming is ignored.
                    Ok(_) => scratch.clear(),
                }
            }
        }
    }
}

async fn write_frame<W: AsyncWrite + Unpin>(writer: &mut W, frame: EventFrame) -> Result<()> {
    writer.write_all(format_event(frame).as_bytes()).await?;
    writer.flush().await?;
    Ok(())
}
