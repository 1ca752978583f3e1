//! HTTP client for the Claude messages API

use reqwest::Client;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use super::auth::ApiKeyManager;
use super::chat::Completion;
use super::error::TutorError;
use super::models::{ClaudeModel, CreateMessageRequest, Message, StreamEvent};
use super::prompt::Prompt;
use super::streaming;

/// Upper bound on reply length; tutoring answers are meant to be short
const MAX_REPLY_TOKENS: u32 = 1024;

/// Claude API client
#[derive(Debug, Clone)]
pub struct ClaudeClient {
    client: Client,
    /// Missing keys surface as [`TutorError::ApiKeyNotFound`] at request time
    api_key: Option<String>,
    model: ClaudeModel,
}

impl ClaudeClient {
    const API_URL: &'static str = "https://api.anthropic.com/v1/messages";
    const API_VERSION: &'static str = "2023-06-01";

    /// Create a client with an explicit key
    pub fn new(api_key: impl Into<String>) -> Result<Self, TutorError> {
        Ok(Self { client: Self::http_client()?, api_key: Some(api_key.into()), model: ClaudeModel::default() })
    }

    /// Create a client using the environment or keyring key, if any
    pub fn from_stored_key() -> Result<Self, TutorError> {
        let api_key = match ApiKeyManager::resolve() {
            Ok((key, source)) => {
                tracing::debug!(?source, "Using stored API key");
                Some(key)
            }
            Err(err) => {
                tracing::info!(error = %err, "No API key available, tutor replies will fall back");
                None
            }
        };
        Ok(Self { client: Self::http_client()?, api_key, model: ClaudeModel::default() })
    }

    pub fn with_model(mut self, model: ClaudeModel) -> Self {
        self.model = model;
        self
    }

    pub fn model(&self) -> ClaudeModel {
        self.model
    }

    pub fn has_key(&self) -> bool {
        self.api_key.is_some()
    }

    fn http_client() -> Result<Client, TutorError> {
        Ok(Client::builder().timeout(std::time::Duration::from_secs(300)).build()?)
    }

    /// Send a streaming message request
    ///
    /// Events go through `tx`. Use the cancellation token to interrupt the request.
    pub async fn send_streaming(
        &self,
        request: CreateMessageRequest,
        tx: mpsc::Sender<StreamEvent>,
        cancel_token: CancellationToken,
    ) -> Result<(), TutorError> {
        let api_key = self.api_key.as_deref().ok_or(TutorError::ApiKeyNotFound)?;

        let send = self
            .client
            .post(Self::API_URL)
            .header("x-api-key", api_key)
            .header("anthropic-version", Self::API_VERSION)
            .header("content-type", "application/json")
            .json(&request)
            .send();

        let response = tokio::select! {
            _ = cancel_token.cancelled() => return Err(TutorError::Cancelled),
            response = send => response?,
        };

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);
            return Err(TutorError::RateLimited { retry_after_seconds: retry_after });
        }

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(TutorError::ApiError {
                status: 401,
                message: "Invalid API key".to_string(),
            });
        }

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(TutorError::ApiError { status: status.as_u16(), message });
        }

        streaming::process_stream(response, tx, cancel_token).await
    }
}

impl Completion for ClaudeClient {
    async fn complete(
        &self,
        prompt: Prompt,
        deltas: mpsc::UnboundedSender<String>,
        cancel: CancellationToken,
    ) -> Result<String, TutorError> {
        let request = CreateMessageRequest::new(self.model, vec![Message::user(prompt.user)])
            .with_system(prompt.system)
            .with_max_tokens(MAX_REPLY_TOKENS);

        let (tx, rx) = mpsc::channel(64);
        let (sent, collected) =
            tokio::join!(self.send_streaming(request, tx, cancel), collect_reply(rx, deltas));
        sent?;
        collected
    }
}

/// Gather text deltas into the full reply, forwarding each one as it arrives
async fn collect_reply(
    mut rx: mpsc::Receiver<StreamEvent>,
    deltas: mpsc::UnboundedSender<String>,
) -> Result<String, TutorError> {
    let mut reply = String::new();
    while let Some(event) = rx.recv().await {
        match event {
            StreamEvent::ContentBlockDelta { text } => {
                reply.push_str(&text);
                // The UI may be gone; the full reply is still returned
                let _ = deltas.send(text);
            }
            StreamEvent::Error { message } => return Err(TutorError::StreamError(message)),
            StreamEvent::MessageStop => break,
            _ => {}
        }
    }
    Ok(reply)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_creation() {
        let client = ClaudeClient::new("sk-ant-test-key").unwrap().with_model(ClaudeModel::Sonnet45);
        assert_eq!(client.api_key.as_deref(), Some("sk-ant-test-key"));
        assert_eq!(client.model(), ClaudeModel::Sonnet45);
        assert!(client.has_key());
    }

    #[tokio::test]
    async fn missing_key_fails_before_any_request() {
        let client = ClaudeClient { api_key: None, ..ClaudeClient::new("x").unwrap() };
        let (tx, _rx) = mpsc::channel(1);
        let request = CreateMessageRequest::new(ClaudeModel::Haiku45, vec![Message::user("oi")]);
        let result = client.send_streaming(request, tx, CancellationToken::new()).await;
        assert!(matches!(result, Err(TutorError::ApiKeyNotFound)));
    }

    #[tokio::test]
    async fn collector_joins_deltas_and_stops() {
        let (tx, rx) = mpsc::channel(8);
        let (delta_tx, mut delta_rx) = mpsc::unbounded_channel();
        for event in [
            StreamEvent::MessageStart { id: "m".into() },
            StreamEvent::ContentBlockDelta { text: "Use ".into() },
            StreamEvent::Ping,
            StreamEvent::ContentBlockDelta { text: "math.sqrt".into() },
            StreamEvent::MessageStop,
            StreamEvent::ContentBlockDelta { text: "ignored".into() },
        ] {
            tx.send(event).await.unwrap();
        }
        drop(tx);

        assert_eq!(collect_reply(rx, delta_tx).await.unwrap(), "Use math.sqrt");
        assert_eq!(delta_rx.recv().await.as_deref(), Some("Use "));
        assert_eq!(delta_rx.recv().await.as_deref(), Some("math.sqrt"));
    }

    #[tokio::test]
    async fn collector_surfaces_stream_errors() {
        let (tx, rx) = mpsc::channel(4);
        tx.send(StreamEvent::Error { message: "Overloaded".into() }).await.unwrap();
        drop(tx);
        let result = collect_reply(rx, mpsc::unbounded_channel().0).await;
        assert!(matches!(result, Err(TutorError::StreamError(m)) if m == "Overloaded"));
    }
}
