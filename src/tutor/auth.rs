//! API key lookup and storage
//!
//! `ANTHROPIC_API_KEY` wins over the system keyring so the CLI works in
//! environments without a keyring daemon.

use keyring::Entry;

use super::error::TutorError;

/// Environment variable checked before the keyring
pub const API_KEY_ENV: &str = "ANTHROPIC_API_KEY";
/// Service name for keyring storage
const SERVICE_NAME: &str = "pymath-tui";
/// Entry name for the API key
const API_KEY_ENTRY: &str = "anthropic-api-key";

/// Where a resolved key came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySource {
    Environment,
    Keyring,
}

/// Manages the Claude API key
pub struct ApiKeyManager;

impl ApiKeyManager {
    /// Resolve the key from the environment, then the keyring
    pub fn resolve() -> Result<(String, KeySource), TutorError> {
        if let Some(key) = std::env::var(API_KEY_ENV).ok().filter(|k| !k.trim().is_empty()) {
            return Ok((key.trim().to_string(), KeySource::Environment));
        }
        Self::get_api_key().map(|key| (key, KeySource::Keyring))
    }

    /// Get the API key from system keyring
    pub fn get_api_key() -> Result<String, TutorError> {
        let entry = Entry::new(SERVICE_NAME, API_KEY_ENTRY)
            .map_err(|e| TutorError::KeyringError(e.to_string()))?;

        entry.get_password().map_err(|e| match e {
            keyring::Error::NoEntry => TutorError::ApiKeyNotFound,
            _ => TutorError::KeyringError(e.to_string()),
        })
    }

    /// Store the API key in system keyring
    pub fn set_api_key(key: &str) -> Result<(), TutorError> {
        let key = key.trim();
        if !Self::validate_key_format(key) {
            return Err(TutorError::InvalidApiKey);
        }

        let entry = Entry::new(SERVICE_NAME, API_KEY_ENTRY)
            .map_err(|e| TutorError::KeyringError(e.to_string()))?;

        entry.set_password(key).map_err(|e| TutorError::KeyringError(e.to_string()))
    }

    /// Validate API key format
    pub fn validate_key_format(key: &str) -> bool {
        key.starts_with("sk-ant-") && key.len() > 20
    }

    /// Mask an API key for display (first 8 and last 4 chars)
    pub fn mask_key(key: &str) -> String {
        let chars: Vec<char> = key.chars().collect();
        if chars.len() <= 12 {
            return "*".repeat(chars.len());
        }
        let prefix: String = chars[..8].iter().collect();
        let suffix: String = chars[chars.len() - 4..].iter().collect();
        format!("{}...{}", prefix, suffix)
    }
}
