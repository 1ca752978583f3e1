//! Server-Sent Events (SSE) parser for Claude streaming responses

use futures_util::StreamExt;
use reqwest::Response;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use super::error::TutorError;
use super::models::StreamEvent;

/// Incremental SSE decoder; bytes may be split anywhere, including inside a UTF-8 sequence
#[derive(Debug, Default)]
pub struct SseDecoder {
    pending: Vec<u8>,
    event_type: String,
}

impl SseDecoder {
    /// Feed a chunk and collect every event completed by it
    pub fn push(&mut self, chunk: &[u8]) -> Vec<StreamEvent> {
        self.pending.extend_from_slice(chunk);
        let mut events = Vec::new();

        while let Some(newline) = self.pending.iter().position(|b| *b == b'\n') {
            let raw: Vec<u8> = self.pending.drain(..=newline).collect();
            let line = String::from_utf8_lossy(&raw);
            let line = line.trim_end();

            if let Some(event_type) = line.strip_prefix("event:") {
                self.event_type = event_type.trim().to_string();
            } else if let Some(data) = line.strip_prefix("data:") {
                if let Some(event) = parse_event(&self.event_type, data.trim_start()) {
                    events.push(event);
                }
            }
            // Blank lines and ':' comments carry nothing
        }
        events
    }
}

/// Process an SSE stream from the Claude API
///
/// Parsed events go through `tx`. Returns early, without error, if the
/// receiver is dropped.
pub async fn process_stream(
    response: Response,
    tx: mpsc::Sender<StreamEvent>,
    cancel_token: CancellationToken,
) -> Result<(), TutorError> {
    let mut stream = response.bytes_stream();
    let mut decoder = SseDecoder::default();

    loop {
        tokio::select! {
            _ = cancel_token.cancelled() => {
                return Err(TutorError::Cancelled);
            }

            chunk = stream.next() => {
                match chunk {
                    Some(Ok(bytes)) => {
                        for event in decoder.push(&bytes) {
                            if tx.send(event).await.is_err() {
                                return Ok(());
                            }
                        }
                    }
                    Some(Err(e)) => return Err(TutorError::RequestError(e)),
                    None => break,
                }
            }
        }
    }

    Ok(())
}

/// Parse a single SSE event from event type and data
fn parse_event(event_type: &str, data: &str) -> Option<StreamEvent> {
    match event_type {
        "message_start" => {
            let parsed: serde_json::Value = serde_json::from_str(data).ok()?;
            let id = parsed["message"]["id"].as_str()?.to_string();
            Some(StreamEvent::MessageStart { id })
        }

        "content_block_start" => Some(StreamEvent::ContentBlockStart),

        "content_block_delta" => {
            let parsed: serde_json::Value = serde_json::from_str(data).ok()?;
            let text = parsed["delta"]["text"].as_str()?.to_string();
            Some(StreamEvent::ContentBlockDelta { text })
        }

        "content_block_stop" => Some(StreamEvent::ContentBlockStop),

        "message_delta" => {
            let parsed: serde_json::Value = serde_json::from_str(data).ok()?;
            let stop_reason = parsed["delta"]["stop_reason"].as_str().map(|s| s.to_string());
            Some(StreamEvent::MessageDelta { stop_reason })
        }

        "message_stop" => Some(StreamEvent::MessageStop),

        "ping" => Some(StreamEvent::Ping),

        "error" => {
            let parsed: serde_json::Value = serde_json::from_str(data).ok()?;
            let message =
                parsed["error"]["message"].as_str().unwrap_or("Unknown error").to_string();
            Some(StreamEvent::Error { message })
        }

        _ => {
            tracing::debug!("Unknown SSE event type: {}", event_type);
            None
        }
    }
}
