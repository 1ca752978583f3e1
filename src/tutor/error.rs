//! Error types for the tutor backend

use thiserror::Error;

/// Errors that can occur while asking the tutor
#[derive(Debug, Error)]
pub enum TutorError {
    /// API key is not configured
    #[error("API key not configured. Set ANTHROPIC_API_KEY or run :key <api-key>")]
    ApiKeyNotFound,

    /// Failed to access system keyring
    #[error("Failed to access keyring: {0}")]
    KeyringError(String),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// API returned an error response
    #[error("API error ({status}): {message}")]
    ApiError { status: u16, message: String },

    /// Rate limited by the API
    #[error("Rate limited. Retry after {retry_after_seconds} seconds")]
    RateLimited { retry_after_seconds: u64 },

    /// The stream broke off or reported an error event
    #[error("Stream error: {0}")]
    StreamError(String),

    /// The app shut down while the request was in flight
    #[error("Request cancelled")]
    Cancelled,

    /// Invalid API key format
    #[error("Invalid API key format. Key should start with 'sk-ant-'")]
    InvalidApiKey,

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl TutorError {
    /// Check if this error is recoverable (user can retry)
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            TutorError::RateLimited { .. }
                | TutorError::RequestError(_)
                | TutorError::StreamError(_)
                | TutorError::Cancelled
        )
    }

    /// Check if this error requires re-authentication
    pub fn requires_reauth(&self) -> bool {
        matches!(
            self,
            TutorError::ApiKeyNotFound
                | TutorError::InvalidApiKey
                | TutorError::ApiError { status: 401, .. }
        )
    }

    /// Short command-line hint for the user, if there is something they can do
    pub fn hint(&self) -> Option<String> {
        if self.requires_reauth() {
            Some("Chave da API ausente ou inválida. Use :key <sua-chave>".to_string())
        } else if let TutorError::RateLimited { retry_after_seconds } = self {
            Some(format!("Limite de requisições atingido. Tente novamente em {}s", retry_after_seconds))
        } else if self.is_recoverable() && !matches!(self, TutorError::Cancelled) {
            Some("Falha de conexão com o tutor. Tente novamente.".to_string())
        } else {
            None
        }
    }
}
