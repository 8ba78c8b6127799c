// crates/battleship-server/src/client.rs

use std::future::Future;

use anyhow::Result;
use battleship_protocol::{format_response, parse_request_line, Request, Response};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::OwnedWriteHalf;
use tokio::net::TcpStream;
use tracing::{debug, error, warn};

use crate::event_stream::run_event_stream;
use crate::handlers::{self, Reply, INTERNAL_ERROR};
use crate::types::{AppState, ClientId, Session};

/// Run the request/response loop for a single connection.
///
/// The connection holds at most one [`Session`]. Routed requests run on
/// their own task so that a panicking handler costs one reply, not the
/// connection. `EVENTS` turns the connection into an event stream and
/// closes it when the stream ends.
pub async fn run_client(client_id: ClientId, stream: TcpStream, state: AppState) -> Result<()> {
    let (read_stream, mut write_stream) = stream.into_split();
    let mut reader = BufReader::new(read_stream);
    let mut session: Option<Session> = None;
    let mut line = String::new();

    loop {
        line.clear();
        if reader.read_line(&mut line).await? == 0 {
            break;
        }

        let request = match parse_request_line(&line) {
            Ok(Some(request)) => request,
            Ok(None) => continue,
            Err(e) => {
                warn!(client = client_id.0, line = line.trim(), error = %e, "invalid request");
                write_responses(&mut write_stream, &[Response::Error(e.to_string())]).await?;
                continue;
            }
        };
        debug!(client = client_id.0, request = ?request, "request");

        match request {
            Request::Quit => break,
            Request::Session { game, player } => {
                session = Some(Session { game, player });
                write_responses(&mut write_stream, &[Response::Ok]).await?;
            }
            Request::Events => {
                match handlers::event_signal(&state, session.as_ref()).await {
                    Ok(signal) => {
                        run_event_stream(
                            client_id,
                            signal,
                            state.keepalive,
                            &mut reader,
                            &mut write_stream,
                        )
                        .await?;
                    }
                    Err(refusal) => write_responses(&mut write_stream, &[refusal]).await?,
                }
                break;
            }
            routed => {
                let handler = handlers::dispatch(state.clone(), session.clone(), routed);
                let reply = run_routed(client_id, session.take(), handler).await;
                session = reply.session;
                write_responses(&mut write_stream, &reply.responses).await?;
            }
        }
    }

    write_stream.shutdown().await.ok();
    Ok(())
}

/// Run one routed handler on its own task.
///
/// If the task panics or is cancelled the connection keeps `session` and
/// the client gets `ERROR internal server error`.
pub async fn run_routed<F>(client_id: ClientId, session: Option<Session>, handler: F) -> Reply
where
    F: Future<Output = Reply> + Send + 'static,
{
    match tokio::spawn(handler).await {
        Ok(reply) => reply,
        Err(e) => {
            if e.is_panic() {
                error!(client = client_id.0, "request handler panicked");
            } else {
                error!(client = client_id.0, error = %e, "request handler cancelled");
            }
            Reply {
                session,
                responses: vec![Response::Error(INTERNAL_ERROR.to_string())],
            }
        }
    }
}

/// Write a reply's lines followed by `END`.
async fn write_responses(stream: &mut OwnedWriteHalf, responses: &[Response]) -> Result<()> {
    let mut data = String::new();
    for resp in responses.iter().chain(std::iter::once(&Response::End)) {
        data.push_str(&format_response(resp));
        data.push('\n');
    }

    stream.write_all(data.as_bytes()).await?;
    stream.flush().await?;
    Ok(())
}
