//! TCP transport.
//!
//! Accept loop plus a per-connection task speaking newline-delimited JSON:
//! one request line in, one response line out, connection held open for
//! pipelined requests. Unreadable frames get an error response instead of
//! a dropped connection.

use cinder_core::{
    Environment,
    wire::{MAX_ENCRYPTED_DATA_BYTES, Request, Response},
};
use tokio::{
    io::{AsyncBufReadExt, AsyncWriteExt, BufReader},
    net::{TcpListener, TcpStream},
};

use crate::{driver::Driver, store::Store};

/// Ceiling on a single request line: the blob cap plus framing headroom.
const MAX_FRAME_BYTES: usize = MAX_ENCRYPTED_DATA_BYTES + 4096;

/// Accept connections forever, spawning one task per connection.
///
/// # Errors
///
/// Returns an error only if `accept` itself fails; per-connection errors
/// are logged and end that connection alone.
pub async fn serve<S: Store, E: Environment>(
    listener: TcpListener,
    driver: Driver<S, E>,
) -> std::io::Result<()> {
    loop {
        let (stream, peer) = listener.accept().await?;
        let driver = driver.clone();

        tokio::spawn(async move {
            tracing::debug!(%peer, "connection opened");
            if let Err(err) = handle_connection(stream, &driver).await {
                tracing::debug!(%peer, error = %err, "connection ended with error");
            }
        });
    }
}

async fn handle_connection<S: Store, E: Environment>(
    stream: TcpStream,
    driver: &Driver<S, E>,
) -> std::io::Result<()> {
    let (read_half, mut write_half) = stream.into_split();
    let mut lines = BufReader::new(read_half).lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let response = if line.len() > MAX_FRAME_BYTES {
            Response::PayloadTooLarge { max_bytes: MAX_ENCRYPTED_DATA_BYTES }
        } else {
            match serde_json::from_str::<Request>(&line) {
                Ok(request) => driver.handle(request),
                // serde errors carry positions, not payload bytes, so this
                // does not echo blob contents
                Err(err) => Response::Error { message: format!("unreadable request: {err}") },
            }
        };

        let Ok(mut frame) = serde_json::to_string(&response) else {
            unreachable!("wire responses serialize infallibly");
        };
        frame.push('\n');
        write_half.write_all(frame.as_bytes()).await?;
    }

    Ok(())
}
