//! Core Bridge orchestrator

use crate::config::BridgeConfig;
use crate::error::{BridgeError, ErrorKind};
use crate::parser::parse_and_map;
use crate::prompt::compile_request;
use futures::FutureExt;
use parley_domain::{
    BridgeResult, ConflictDomain, StructuredGenerator, UserAdjustments, ValidationError,
};
use std::any::Any;
use std::fmt;
use std::panic::AssertUnwindSafe;
use std::time::Instant;
use tracing::{debug, error, info};

/// Progress of a single bridge call
///
/// `Idle → Compiling → AwaitingRemote → Validating → Success | Failed`.
/// A failure at any step jumps straight to `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeState {
    /// Nothing started yet
    Idle,
    /// Pre-flight checks and request compilation
    Compiling,
    /// The single outbound call is in flight
    AwaitingRemote,
    /// Parsing and validating the response
    Validating,
    /// A result was produced
    Success,
    /// The call ended with an error of this kind
    Failed(ErrorKind),
}

impl BridgeState {
    /// Whether this state ends the call
    pub fn is_terminal(&self) -> bool {
        matches!(self, BridgeState::Success | BridgeState::Failed(_))
    }
}

impl fmt::Display for BridgeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BridgeState::Idle => f.write_str("idle"),
            BridgeState::Compiling => f.write_str("compiling"),
            BridgeState::AwaitingRemote => f.write_str("awaiting_remote"),
            BridgeState::Validating => f.write_str("validating"),
            BridgeState::Success => f.write_str("success"),
            BridgeState::Failed(kind) => write!(f, "failed({})", kind),
        }
    }
}

/// The Bridge turns a conflict message into an analysis and a rewrite
///
/// Each call is independent: the bridge holds no per-request state, so it
/// can be shared freely. Callers that need a deadline wrap the returned
/// future in their own timeout; dropping the future abandons the in-flight
/// call and leaves nothing behind.
pub struct Bridge<G>
where
    G: StructuredGenerator,
{
    generator: G,
    config: BridgeConfig,
}

impl<G> Bridge<G>
where
    G: StructuredGenerator,
    G::Error: Into<BridgeError>,
{
    /// Create a new Bridge around an explicitly constructed generator
    pub fn new(generator: G, config: BridgeConfig) -> Self {
        Self { generator, config }
    }

    /// The underlying generator
    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// The active configuration
    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Analyze and re-express a message
    ///
    /// Issues exactly one generator call when pre-flight checks pass, and
    /// none when they fail. Never retries.
    pub async fn process_bridge(
        &self,
        input: &str,
        domain: ConflictDomain,
        adjustments: UserAdjustments,
    ) -> Result<BridgeResult, BridgeError> {
        self.process_bridge_observed(input, domain, adjustments, |_| {})
            .await
    }

    /// Like [`Bridge::process_bridge`], reporting every state transition
    pub async fn process_bridge_observed<F>(
        &self,
        input: &str,
        domain: ConflictDomain,
        adjustments: UserAdjustments,
        mut observer: F,
    ) -> Result<BridgeResult, BridgeError>
    where
        F: FnMut(BridgeState),
    {
        let start = Instant::now();
        let mut transition = |state: BridgeState| {
            debug!(%state, "bridge state");
            observer(state);
        };

        transition(BridgeState::Idle);
        let outcome = self.run(input, domain, adjustments, &mut transition).await;

        match &outcome {
            Ok(_) => {
                transition(BridgeState::Success);
                info!(
                    domain = %domain,
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "bridge complete"
                );
            }
            Err(e) => {
                transition(BridgeState::Failed(e.kind()));
                error!(kind = %e.kind(), error = %e, "bridge failed");
            }
        }

        outcome
    }

    /// Validate loosely typed input, then run [`Bridge::process_bridge`]
    ///
    /// Intended for drivers that receive the domain as a label and the
    /// sliders as optional numbers.
    pub async fn process_bridge_raw(
        &self,
        input: &str,
        domain: &str,
        adjustments: &[(&str, Option<f64>)],
    ) -> Result<BridgeResult, BridgeError> {
        let domain: ConflictDomain = domain.parse()?;
        let adjustments = UserAdjustments::from_values(adjustments)?;
        self.process_bridge(input, domain, adjustments).await
    }

    async fn run(
        &self,
        input: &str,
        domain: ConflictDomain,
        adjustments: UserAdjustments,
        transition: &mut impl FnMut(BridgeState),
    ) -> Result<BridgeResult, BridgeError> {
        transition(BridgeState::Compiling);
        self.check_input(input)?;

        let payload = compile_request(input, domain, adjustments);
        debug!(
            instruction_len = payload.system_instruction.len(),
            "compiled request"
        );

        transition(BridgeState::AwaitingRemote);
        let raw = AssertUnwindSafe(self.generator.generate_structured(&payload))
            .catch_unwind()
            .await
            .map_err(|panic| BridgeError::Unknown(panic_message(panic)))?
            .map_err(Into::<BridgeError>::into)?;
        debug!("response length: {} chars", raw.len());

        transition(BridgeState::Validating);
        parse_and_map(&raw, input, domain)
    }

    /// Pre-flight checks on the message itself
    fn check_input(&self, input: &str) -> Result<(), ValidationError> {
        if input.trim().is_empty() {
            return Err(ValidationError::EmptyInput);
        }
        let len = input.chars().count();
        if len > self.config.max_input_length {
            return Err(ValidationError::InputTooLong {
                len,
                max: self.config.max_input_length,
            });
        }
        Ok(())
    }
}

fn panic_message(panic: Box<dyn Any + Send>) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        format!("generator panicked: {}", s)
    } else if let Some(s) = panic.downcast_ref::<String>() {
        format!("generator panicked: {}", s)
    } else {
        "generator panicked".to_string()
    }
}
