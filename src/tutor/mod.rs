//! AI tutor backed by the Claude messages API
//!
//! API key management, the streaming HTTP client, prompt assembly, and the
//! chat state the UI renders.

pub mod auth;
pub mod chat;
pub mod client;
pub mod error;
pub mod models;
pub mod prompt;
pub mod streaming;

pub use auth::{ApiKeyManager, KeySource};
pub use chat::{ChatMessage, ChatState, Completion, EMPTY_REPLY, FALLBACK_REPLY, GREETING, Reply, ask};
pub use client::ClaudeClient;
pub use error::TutorError;
pub use models::{ClaudeModel, Role};
pub use prompt::{Prompt, build_prompt, truncate_context};
