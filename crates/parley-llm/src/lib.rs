//! Parley LLM Provider Layer
//!
//! Implementations of the `StructuredGenerator` trait from `parley-domain`.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//! - `GeminiProvider`: Gemini `generateContent` API with JSON-schema output
//!
//! Providers are plain values. The composition root builds one and hands it
//! to the bridge; nothing here is global.
//!
//! # Examples
//!
//! ```
//! use parley_llm::MockProvider;
//! use parley_domain::{RequestPayload, SchemaDescriptor, StructuredGenerator};
//!
//! let provider = MockProvider::new(r#"{"ok": true}"#);
//! let request = RequestPayload {
//!     system_instruction: "instructions".to_string(),
//!     user_content: "message".to_string(),
//!     response_schema: SchemaDescriptor::bridge(),
//! };
//!
//! let rt = tokio::runtime::Runtime::new().unwrap();
//! let result = rt.block_on(provider.generate_structured(&request)).unwrap();
//! assert_eq!(result, r#"{"ok": true}"#);
//! ```

#![warn(missing_docs)]

pub mod gemini;

use parley_domain::{RequestPayload, StructuredGenerator};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;

pub use gemini::{GeminiConfig, GeminiProvider};

/// Errors that can occur during LLM operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LlmError {
    /// Network or transport failure (connect, timeout, I/O)
    #[error("Communication error: {0}")]
    Communication(String),

    /// The service answered with a non-success status
    #[error("HTTP {status}: {body}")]
    Http {
        /// Status code
        status: u16,
        /// Response body, as returned
        body: String,
    },

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// No credential was configured
    #[error("Missing credential: {0}")]
    MissingCredential(String),

    /// Invalid response envelope from the service
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The service declined to produce content
    #[error("Generation blocked: {0}")]
    Blocked(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

#[derive(Debug, Clone)]
enum MockReply {
    Text(String),
    Fail(LlmError),
    Panic,
}

/// Mock LLM provider for deterministic testing
///
/// Returns pre-configured responses without making any network calls.
/// Responses are keyed by the request's user content.
///
/// # Examples
///
/// ```
/// use parley_llm::{LlmError, MockProvider};
///
/// let mut provider = MockProvider::new("{}");
/// provider.add_response("msg1", r#"{"a": 1}"#);
/// provider.add_error("msg2", LlmError::RateLimitExceeded);
/// assert_eq!(provider.call_count(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    responses: Arc<Mutex<HashMap<String, MockReply>>>,
    call_count: Arc<Mutex<usize>>,
    last_request: Arc<Mutex<Option<RequestPayload>>>,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all requests
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            responses: Arc::new(Mutex::new(HashMap::new())),
            call_count: Arc::new(Mutex::new(0)),
            last_request: Arc::new(Mutex::new(None)),
        }
    }

    /// Add a specific response for a given user content
    pub fn add_response(&mut self, user_content: impl Into<String>, response: impl Into<String>) {
        lock(&self.responses).insert(user_content.into(), MockReply::Text(response.into()));
    }

    /// Configure to return an error for a specific user content
    pub fn add_error(&mut self, user_content: impl Into<String>, error: LlmError) {
        lock(&self.responses).insert(user_content.into(), MockReply::Fail(error));
    }

    /// Configure to panic for a specific user content
    pub fn add_panic(&mut self, user_content: impl Into<String>) {
        lock(&self.responses).insert(user_content.into(), MockReply::Panic);
    }

    /// Get the number of times generate_structured was called
    pub fn call_count(&self) -> usize {
        *lock(&self.call_count)
    }

    /// Reset the call count
    pub fn reset_call_count(&self) {
        *lock(&self.call_count) = 0;
    }

    /// The most recent request seen, if any
    pub fn last_request(&self) -> Option<RequestPayload> {
        lock(&self.last_request).clone()
    }

    fn reply_for(&self, request: &RequestPayload) -> MockReply {
        *lock(&self.call_count) += 1;
        *lock(&self.last_request) = Some(request.clone());

        lock(&self.responses)
            .get(&request.user_content)
            .cloned()
            .unwrap_or_else(|| MockReply::Text(self.default_response.clone()))
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

impl StructuredGenerator for MockProvider {
    type Error = LlmError;

    async fn generate_structured(&self, request: &RequestPayload) -> Result<String, Self::Error> {
        // Locks are released inside reply_for, so a scripted panic never poisons them
        match self.reply_for(request) {
            MockReply::Text(text) => Ok(text),
            MockReply::Fail(error) => Err(error),
            MockReply::Panic => panic!("mock provider panic"),
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use parley_domain::SchemaDescriptor;

    fn request(user_content: &str) -> RequestPayload {
        RequestPayload {
            system_instruction: "instructions".to_string(),
            user_content: user_content.to_string(),
            response_schema: SchemaDescriptor::bridge(),
        }
    }

    #[tokio::test]
    async fn test_mock_provider_default() {
        let provider = MockProvider::new("Test response");
        let result = provider.generate_structured(&request("any")).await;
        assert_eq!(result.unwrap(), "Test response");
    }

    #[tokio::test]
    async fn test_mock_provider_specific_responses() {
        let mut provider = MockProvider::default();
        provider.add_response("hello", "world");
        provider.add_response("foo", "bar");

        assert_eq!(provider.generate_structured(&request("hello")).await.unwrap(), "world");
        assert_eq!(provider.generate_structured(&request("foo")).await.unwrap(), "bar");
        assert_eq!(
            provider.generate_structured(&request("unknown")).await.unwrap(),
            "Default mock response"
        );
    }

    #[tokio::test]
    async fn test_mock_provider_call_count() {
        let provider = MockProvider::new("test");
        assert_eq!(provider.call_count(), 0);

        provider.generate_structured(&request("one")).await.unwrap();
        assert_eq!(provider.call_count(), 1);

        provider.generate_structured(&request("two")).await.unwrap();
        assert_eq!(provider.call_count(), 2);

        provider.reset_call_count();
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_mock_provider_error() {
        let mut provider = MockProvider::default();
        provider.add_error("bad", LlmError::Communication("refused".to_string()));

        let result = provider.generate_structured(&request("bad")).await;
        assert_eq!(result.unwrap_err(), LlmError::Communication("refused".to_string()));
    }

    #[tokio::test]
    async fn test_mock_provider_records_last_request() {
        let provider = MockProvider::new("{}");
        assert!(provider.last_request().is_none());

        provider.generate_structured(&request("remember me")).await.unwrap();
        let seen = provider.last_request().unwrap();
        assert_eq!(seen.user_content, "remember me");
        assert_eq!(seen.response_schema, SchemaDescriptor::bridge());
    }

    #[tokio::test]
    async fn test_mock_provider_clone_shares_state() {
        let provider1 = MockProvider::new("test");
        let provider2 = provider1.clone();

        provider1.generate_structured(&request("x")).await.unwrap();

        assert_eq!(provider1.call_count(), 1);
        assert_eq!(provider2.call_count(), 1);
    }
}
