//! Server-sent event pump for streaming completions

use super::protocol::{ChunkOutcome, parse_chunk};
use debate_application::ports::llm_gateway::GatewayError;
use debate_domain::StreamEvent;
use eventsource_stream::Eventsource;
use futures::{Stream, StreamExt};
use tokio::sync::mpsc;
use tracing::{debug, trace, warn};

/// Parse a byte stream of server-sent events and forward every fragment.
///
/// Ends with `Ok(Completed)` on `[DONE]`, or with a single `Err` on a fault
/// or when the body ends early. Stops as soon as the receiver is dropped,
/// even while the body is idle.
pub(crate) async fn forward_events<S, B, E>(
    body: S,
    tx: mpsc::Sender<Result<StreamEvent, GatewayError>>,
) where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
    E: std::fmt::Display,
{
    let mut events = std::pin::pin!(body.eventsource());

    loop {
        let next = tokio::select! {
            _ = tx.closed() => {
                debug!("Stream receiver dropped, closing completion body");
                return;
            }
            next = events.next() => next,
        };

        let event = match next {
            Some(Ok(event)) => event,
            Some(Err(e)) => {
                warn!(error = %e, "Completion stream interrupted");
                let _ = tx
                    .send(Err(GatewayError::ConnectionError(format!(
                        "stream interrupted: {}",
                        e
                    ))))
                    .await;
                return;
            }
            None => {
                warn!("Completion stream closed before [DONE]");
                let _ = tx
                    .send(Err(GatewayError::Protocol(
                        "stream ended without [DONE]".to_string(),
                    )))
                    .await;
                return;
            }
        };

        trace!(data = %event.data, "SSE event");
        match parse_chunk(&event.data) {
            Ok(ChunkOutcome::Fragment(text)) => {
                if tx.send(Ok(StreamEvent::Delta(text))).await.is_err() {
                    return;
                }
            }
            Ok(ChunkOutcome::Skip) => {}
            Ok(ChunkOutcome::Done) => {
                let _ = tx.send(Ok(StreamEvent::Completed)).await;
                return;
            }
            Err(e) => {
                warn!(error = %e, "Rejected stream chunk");
                let _ = tx.send(Err(e)).await;
                return;
            }
        }
    }
}
