//! Gemini Provider Implementation
//!
//! Calls Gemini's `generateContent` API with `responseMimeType` set to JSON
//! and a `responseSchema` rendered from the request's `SchemaDescriptor`.
//!
//! # Features
//!
//! - Async HTTP communication via `reqwest`
//! - Configurable endpoint, model and transport timeout
//! - Exactly one request per call; failures are returned, never retried
//!
//! # Examples
//!
//! ```no_run
//! use parley_llm::{GeminiConfig, GeminiProvider};
//!
//! // Reads the key from GEMINI_API_KEY
//! let provider = GeminiProvider::from_config(GeminiConfig::default()).unwrap();
//! ```

use crate::LlmError;
use parley_domain::{FieldKind, FieldSpec, RequestPayload, SchemaDescriptor, StructuredGenerator};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::time::Duration;
use tracing::{debug, warn};

/// Default Gemini API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";

/// Default model
pub const DEFAULT_MODEL: &str = "gemini-3-pro-preview";

/// Default transport timeout (seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Default environment variable holding the API key
pub const DEFAULT_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Connection settings for the Gemini provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiConfig {
    /// Base URL of the API
    pub endpoint: String,

    /// Model identifier
    pub model: String,

    /// Transport timeout for the single HTTP call (seconds)
    pub timeout_secs: u64,

    /// Environment variable the API key is read from
    pub api_key_env: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
        }
    }
}

impl GeminiConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.endpoint.trim().is_empty() {
            return Err("endpoint must not be empty".to_string());
        }
        if self.model.trim().is_empty() {
            return Err("model must not be empty".to_string());
        }
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Full `generateContent` URL for the configured model
    pub fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }
}

/// Gemini API provider for schema-constrained generation
pub struct GeminiProvider {
    config: GeminiConfig,
    api_key: String,
    client: reqwest::Client,
}

impl std::fmt::Debug for GeminiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiProvider")
            .field("config", &self.config)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

// ============================================================================
// API Types
// ============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    system_instruction: GeminiSystemInstruction,
    generation_config: GeminiGenerationConfig,
}

#[derive(Serialize)]
struct GeminiContent {
    role: String,
    parts: Vec<GeminiTextPart>,
}

#[derive(Serialize)]
struct GeminiSystemInstruction {
    parts: Vec<GeminiTextPart>,
}

#[derive(Serialize, Deserialize)]
struct GeminiTextPart {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    response_mime_type: String,
    response_schema: Value,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    candidates: Option<Vec<GeminiCandidate>>,
    prompt_feedback: Option<GeminiPromptFeedback>,
    error: Option<GeminiError>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    content: Option<GeminiContentResponse>,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct GeminiContentResponse {
    #[serde(default)]
    parts: Vec<GeminiPartResponse>,
}

#[derive(Deserialize)]
struct GeminiPartResponse {
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiPromptFeedback {
    block_reason: Option<String>,
}

#[derive(Deserialize)]
struct GeminiError {
    message: String,
}

impl GeminiProvider {
    /// Create a provider with an explicit API key
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The key is empty
    /// - The configuration is invalid
    /// - The HTTP client cannot be built
    pub fn new(config: GeminiConfig, api_key: impl Into<String>) -> Result<Self, LlmError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(LlmError::MissingCredential(config.api_key_env.clone()));
        }
        config.validate().map_err(LlmError::Other)?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| LlmError::Other(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            config,
            api_key,
            client,
        })
    }

    /// Create a provider reading the API key from `config.api_key_env`
    pub fn from_config(config: GeminiConfig) -> Result<Self, LlmError> {
        let api_key = std::env::var(&config.api_key_env)
            .map_err(|_| LlmError::MissingCredential(config.api_key_env.clone()))?;
        Self::new(config, api_key)
    }

    /// The active configuration
    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    /// Perform one `generateContent` call and return the candidate text
    pub async fn generate(&self, request: &RequestPayload) -> Result<String, LlmError> {
        let url = self.config.generate_url();
        let body = build_request(request);

        debug!(model = %self.config.model, "sending generateContent request");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Communication(format!("Request failed: {}", e)))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(LlmError::ModelNotAvailable(self.config.model.clone()));
        }
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(LlmError::RateLimitExceeded);
        }

        let text = response
            .text()
            .await
            .map_err(|e| LlmError::Communication(format!("Failed to read body: {}", e)))?;

        if !status.is_success() {
            return Err(LlmError::Http {
                status: status.as_u16(),
                body: text,
            });
        }

        extract_candidate_text(&text)
    }
}

impl StructuredGenerator for GeminiProvider {
    type Error = LlmError;

    async fn generate_structured(&self, request: &RequestPayload) -> Result<String, Self::Error> {
        self.generate(request).await
    }
}

fn build_request(request: &RequestPayload) -> GeminiRequest {
    GeminiRequest {
        contents: vec![GeminiContent {
            role: "user".to_string(),
            parts: vec![GeminiTextPart {
                text: request.user_content.clone(),
            }],
        }],
        system_instruction: GeminiSystemInstruction {
            parts: vec![GeminiTextPart {
                text: request.system_instruction.clone(),
            }],
        },
        generation_config: GeminiGenerationConfig {
            response_mime_type: "application/json".to_string(),
            response_schema: render_schema(&request.response_schema),
        },
    }
}

/// Render a schema descriptor in Gemini's OpenAPI-subset dialect
pub fn render_schema(schema: &SchemaDescriptor) -> Value {
    render_object(&schema.fields, None)
}

fn render_object(fields: &[FieldSpec], description: Option<&str>) -> Value {
    let mut properties = Map::new();
    for field in fields {
        properties.insert(field.name.to_string(), render_field(field));
    }
    let required: Vec<&str> = fields.iter().map(|f| f.name).collect();

    let mut object = json!({
        "type": "OBJECT",
        "properties": properties,
        "required": required,
    });
    if let Some(description) = description {
        object["description"] = json!(description);
    }
    object
}

fn render_field(field: &FieldSpec) -> Value {
    match &field.kind {
        FieldKind::String => json!({ "type": "STRING", "description": field.description }),
        FieldKind::Number => json!({ "type": "NUMBER", "description": field.description }),
        FieldKind::StringArray => json!({
            "type": "ARRAY",
            "items": { "type": "STRING" },
            "description": field.description,
        }),
        FieldKind::Object(children) => render_object(children, Some(field.description)),
    }
}

/// Pull the generated text out of a `generateContent` response body
fn extract_candidate_text(body: &str) -> Result<String, LlmError> {
    let envelope: GeminiResponse = serde_json::from_str(body)
        .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse envelope: {}", e)))?;

    if let Some(error) = envelope.error {
        return Err(LlmError::Other(format!("Gemini error: {}", error.message)));
    }

    let candidate = envelope
        .candidates
        .and_then(|c| c.into_iter().next());

    let Some(candidate) = candidate else {
        if let Some(reason) = envelope.prompt_feedback.and_then(|f| f.block_reason) {
            return Err(LlmError::Blocked(reason));
        }
        return Err(LlmError::InvalidResponse("No candidates in response".to_string()));
    };

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        if let Some(reason) = candidate.finish_reason.filter(|r| r != "STOP") {
            warn!(finish_reason = %reason, "candidate finished without text");
            return Err(LlmError::Blocked(reason));
        }
        return Err(LlmError::InvalidResponse("Candidate has no text".to_string()));
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> RequestPayload {
        RequestPayload {
            system_instruction: "Be precise.".to_string(),
            user_content: "Input message to bridge: \"hi\"".to_string(),
            response_schema: SchemaDescriptor::bridge(),
        }
    }

    #[test]
    fn test_config_defaults() {
        let config = GeminiConfig::default();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.api_key_env, DEFAULT_API_KEY_ENV);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_generate_url() {
        let config = GeminiConfig {
            endpoint: "http://localhost:8089/".to_string(),
            model: "m1".to_string(),
            ..GeminiConfig::default()
        };
        assert_eq!(
            config.generate_url(),
            "http://localhost:8089/v1beta/models/m1:generateContent"
        );
    }

    #[test]
    fn test_invalid_config() {
        let config = GeminiConfig {
            timeout_secs: 0,
            ..GeminiConfig::default()
        };
        assert!(config.validate().is_err());
        assert!(matches!(
            GeminiProvider::new(config, "key"),
            Err(LlmError::Other(_))
        ));
    }

    #[test]
    fn test_empty_key_is_missing_credential() {
        let result = GeminiProvider::new(GeminiConfig::default(), "  ");
        assert!(matches!(result, Err(LlmError::MissingCredential(_))));
    }

    #[test]
    fn test_from_config_unset_env() {
        let config = GeminiConfig {
            api_key_env: "PARLEY_TEST_KEY_THAT_IS_NEVER_SET".to_string(),
            ..GeminiConfig::default()
        };
        let result = GeminiProvider::from_config(config);
        assert_eq!(
            result.unwrap_err(),
            LlmError::MissingCredential("PARLEY_TEST_KEY_THAT_IS_NEVER_SET".to_string())
        );
    }

    #[test]
    fn test_debug_redacts_key() {
        let provider = GeminiProvider::new(GeminiConfig::default(), "secret-key").unwrap();
        let debug = format!("{:?}", provider);
        assert!(!debug.contains("secret-key"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_request_body_shape() {
        let body = serde_json::to_value(build_request(&payload())).unwrap();

        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "Input message to bridge: \"hi\"");
        assert_eq!(body["systemInstruction"]["parts"][0]["text"], "Be precise.");
        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(body["generationConfig"]["responseSchema"]["type"], "OBJECT");
    }

    #[test]
    fn test_render_schema() {
        let schema = render_schema(&SchemaDescriptor::bridge());

        assert_eq!(schema["type"], "OBJECT");
        assert_eq!(schema["properties"]["literal"]["type"], "STRING");
        assert_eq!(schema["properties"]["confidence"]["type"], "NUMBER");
        assert_eq!(schema["properties"]["culturalMarkers"]["type"], "ARRAY");
        assert_eq!(schema["properties"]["culturalMarkers"]["items"]["type"], "STRING");

        let required = schema["required"].as_array().unwrap();
        assert_eq!(required.len(), 7);
        assert!(required.contains(&json!("reExpression")));

        let nested = &schema["properties"]["reExpression"];
        assert_eq!(nested["type"], "OBJECT");
        assert_eq!(nested["properties"]["alternatives"]["items"]["type"], "STRING");
        assert_eq!(
            nested["required"],
            json!(["message", "culturalNote", "alternatives"])
        );
    }

    #[test]
    fn test_extract_candidate_text_joins_parts() {
        let body = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "{\"a\":"}, {"text": " 1}"}]}, "finishReason": "STOP"}
            ]
        }"#;
        assert_eq!(extract_candidate_text(body).unwrap(), "{\"a\": 1}");
    }

    #[test]
    fn test_extract_candidate_text_blocked_prompt() {
        let body = r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#;
        assert_eq!(
            extract_candidate_text(body).unwrap_err(),
            LlmError::Blocked("SAFETY".to_string())
        );
    }

    #[test]
    fn test_extract_candidate_text_safety_finish() {
        let body = r#"{"candidates": [{"finishReason": "SAFETY"}]}"#;
        assert_eq!(
            extract_candidate_text(body).unwrap_err(),
            LlmError::Blocked("SAFETY".to_string())
        );
    }

    #[test]
    fn test_extract_candidate_text_invalid_envelope() {
        assert!(matches!(
            extract_candidate_text("<html>gateway</html>"),
            Err(LlmError::InvalidResponse(_))
        ));
        assert!(matches!(
            extract_candidate_text(r#"{"candidates": []}"#),
            Err(LlmError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_extract_candidate_text_error_field() {
        let body = r#"{"error": {"message": "quota"}}"#;
        assert!(matches!(extract_candidate_text(body), Err(LlmError::Other(_))));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_communication_error() {
        let config = GeminiConfig {
            endpoint: "http://127.0.0.1:1".to_string(),
            timeout_secs: 5,
            ..GeminiConfig::default()
        };
        let provider = GeminiProvider::new(config, "key").unwrap();

        let result = provider.generate(&payload()).await;
        assert!(matches!(result, Err(LlmError::Communication(_))));
    }

    // Integration test (requires network and a real key)
    #[tokio::test]
    #[ignore]
    async fn test_gemini_generate_integration() {
        let provider = GeminiProvider::from_config(GeminiConfig::default()).unwrap();
        let text = provider.generate(&payload()).await.unwrap();
        assert!(serde_json::from_str::<Value>(&text).is_ok());
    }
}
