//! Gateway listener for platform event envelopes
//!
//! The relay that owns the Slack connection (socket handling, signature
//! verification) delivers envelopes as one JSON object per line. Each
//! envelope is acknowledged on the same connection before its handler
//! runs, so handler latency never eats into the platform's delivery
//! window. Handlers run in their own tasks; any number of events may be
//! in flight at once with no shared state between them.

use std::sync::Arc;

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::OwnedWriteHalf;
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, error, info, warn};

use slackweb::SlackApi;

use crate::events::Envelope;
use crate::handlers;

/// Maximum envelope size; even long-winded approval texts stay well under
const MAX_ENVELOPE_SIZE: usize = 64 * 1024;

/// Ack frame written back for each envelope
#[derive(Debug, Serialize)]
struct Ack<'a> {
    envelope_id: &'a str,
}

/// Envelope head; parsed first so every recognizable envelope can be
/// acked even when the full payload parse fails
#[derive(Debug, Deserialize)]
struct EnvelopeHead {
    envelope_id: String,
}

/// Bind the gateway listener
pub async fn bind(addr: &str) -> Result<TcpListener> {
    let listener = TcpListener::bind(addr)
        .await
        .context(format!("Failed to bind gateway listener on {addr}"))?;
    info!(%addr, "gateway listening");
    Ok(listener)
}

/// Accept relay connections until the task is dropped
pub async fn run(listener: TcpListener, api: Arc<dyn SlackApi>) {
    loop {
        match listener.accept().await {
            Ok((stream, peer)) => {
                debug!(%peer, "run: relay connected");
                let api = api.clone();
                tokio::spawn(async move {
                    if let Err(e) = serve_connection(stream, api).await {
                        warn!(%peer, error = %e, "relay connection closed with error");
                    }
                });
            }
            Err(e) => {
                error!(error = %e, "run: accept failed");
            }
        }
    }
}

/// Read envelopes off one relay connection
///
/// A line that is not an envelope at all is logged and skipped without an
/// ack; the connection survives. An acked envelope whose payload fails
/// the typed parse (unknown kind, malformed body) is logged and dropped -
/// the relay would only redeliver it on a missing ack, and redelivery
/// cannot fix a payload we cannot decode.
async fn serve_connection(stream: TcpStream, api: Arc<dyn SlackApi>) -> Result<()> {
    let (read_half, mut write_half) = stream.into_split();
    let mut reader = BufReader::new(read_half);
    let mut line = String::new();

    loop {
        line.clear();
        let bytes_read = reader.read_line(&mut line).await.context("Failed to read envelope")?;
        if bytes_read == 0 {
            debug!("serve_connection: relay disconnected");
            return Ok(());
        }
        if bytes_read > MAX_ENVELOPE_SIZE {
            warn!(bytes_read, "serve_connection: envelope too large, skipping");
            continue;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let head: EnvelopeHead = match serde_json::from_str(trimmed) {
            Ok(head) => head,
            Err(e) => {
                warn!(error = %e, "serve_connection: not an envelope, skipping");
                continue;
            }
        };

        // Ack first: the platform's delivery window is short, and handler
        // work must never delay it.
        send_ack(&mut write_half, &head.envelope_id)
            .await
            .context("Failed to ack envelope")?;

        match serde_json::from_str::<Envelope>(trimmed) {
            Ok(envelope) => {
                debug!(envelope_id = %envelope.envelope_id, kind = envelope.payload.kind(), "serve_connection: dispatching");
                let api = api.clone();
                tokio::spawn(async move {
                    handlers::dispatch(api.as_ref(), envelope.payload).await;
                });
            }
            Err(e) => {
                warn!(envelope_id = %head.envelope_id, error = %e, "serve_connection: undecodable payload, dropping");
            }
        }
    }
}

/// Write one newline-terminated ack frame
async fn send_ack(write_half: &mut OwnedWriteHalf, envelope_id: &str) -> Result<()> {
    let ack = serde_json::to_string(&Ack { envelope_id }).context("Failed to serialize ack")?;
    write_half.write_all(ack.as_bytes()).await.context("Failed to write ack")?;
    write_half.write_all(b"\n").await.context("Failed to write newline")?;
    write_half.flush().await.context("Failed to flush ack")?;
    Ok(())
}
