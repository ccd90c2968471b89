//! Bridge command implementation.

use super::{resolve_message, ResolvedMessage};
use crate::cli::BridgeArgs;
use crate::config::{AppConfig, OutputFormat};
use crate::error::Result;
use crate::output::Formatter;
use parley_bridge::{Bridge, BridgeError, BridgeState};
use parley_domain::{BridgeResult, StructuredGenerator};
use parley_llm::GeminiProvider;
use std::time::Duration;
use tracing::debug;

/// Execute the bridge command.
pub async fn execute_bridge(
    args: BridgeArgs,
    config: &AppConfig,
    formatter: &Formatter,
) -> Result<()> {
    let message = resolve_message(&args.message, &config.defaults)?;
    let timeout = args
        .timeout
        .or(config.defaults.timeout_secs)
        .map(Duration::from_secs);

    let provider = GeminiProvider::from_config(config.gemini.clone())?;
    debug!(model = %provider.config().model, "provider ready");
    let bridge = Bridge::new(provider, config.bridge.clone());

    let show_progress = formatter.format() == OutputFormat::Table;
    let result = bridge_message(&bridge, &message, timeout, |state| {
        if show_progress && state == BridgeState::AwaitingRemote {
            eprintln!("{}", formatter.info("Bridging context..."));
        }
    })
    .await?;

    println!("{}", formatter.format_result(&result)?);
    Ok(())
}

/// Run one bridge call under an optional deadline.
///
/// An expired deadline abandons the call and is reported as a network
/// failure.
pub async fn bridge_message<G, F>(
    bridge: &Bridge<G>,
    message: &ResolvedMessage,
    timeout: Option<Duration>,
    observer: F,
) -> std::result::Result<BridgeResult, BridgeError>
where
    G: StructuredGenerator,
    G::Error: Into<BridgeError>,
    F: FnMut(BridgeState),
{
    let call = bridge.process_bridge_observed(
        &message.text,
        message.domain,
        message.adjustments,
        observer,
    );

    match timeout {
        Some(limit) => tokio::time::timeout(limit, call).await.map_err(|_| {
            BridgeError::Network(format!("no response within {}s", limit.as_secs_f64()))
        })?,
        None => call.await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parley_bridge::{BridgeConfig, ErrorKind};
    use parley_domain::{ConflictDomain, RequestPayload, UserAdjustments};
    use parley_llm::{LlmError, MockProvider};

    const VALID_RESPONSE: &str = r#"{
        "literal": "The speaker will respond.",
        "emotionalState": "resolve",
        "culturalMarkers": [],
        "powerSignaling": "deterrence",
        "inferredIntent": "discourage escalation",
        "confidence": 0.9,
        "reExpression": {
            "message": "We are prepared to respond.",
            "culturalNote": "Removes the implied threat.",
            "alternatives": []
        }
    }"#;

    fn message(text: &str) -> ResolvedMessage {
        ResolvedMessage {
            text: text.to_string(),
            domain: ConflictDomain::International,
            adjustments: UserAdjustments::default(),
        }
    }

    #[tokio::test]
    async fn test_bridge_message_success() {
        let bridge = Bridge::new(MockProvider::new(VALID_RESPONSE), BridgeConfig::default());
        let mut saw_remote = false;

        let result = bridge_message(
            &bridge,
            &message("We will not stand idle."),
            Some(Duration::from_secs(5)),
            |s| saw_remote |= s == BridgeState::AwaitingRemote,
        )
        .await
        .unwrap();

        assert!(saw_remote);
        assert_eq!(result.re_expression.message, "We are prepared to respond.");
        assert!(result.analysis.confidence.is_high());
    }

    struct StalledGenerator;

    impl StructuredGenerator for StalledGenerator {
        type Error = LlmError;

        async fn generate_structured(&self, _request: &RequestPayload) -> std::result::Result<String, LlmError> {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn test_deadline_is_network_failure() {
        let bridge = Bridge::new(StalledGenerator, BridgeConfig::default());

        let err = bridge_message(
            &bridge,
            &message("hello"),
            Some(Duration::from_millis(10)),
            |_| {},
        )
        .await
        .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Network);
        assert!(err.to_string().contains("no response within 0.01s"));
    }

    #[tokio::test]
    async fn test_validation_error_passes_through() {
        let bridge = Bridge::new(MockProvider::new(VALID_RESPONSE), BridgeConfig::default());

        let err = bridge_message(&bridge, &message("   "), None, |_| {})
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(bridge.generator().call_count(), 0);
    }
}
