//! Trait definitions for external interactions
//!
//! These traits define the boundary between the bridge core and the remote
//! structured-generation service. Implementations live in `parley-llm`.

use crate::SchemaDescriptor;
use std::future::Future;

/// Fully specified request for one structured generation call
///
/// The instruction and the user's text travel as separate fields so the
/// message can never be read as part of the instructions.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestPayload {
    /// Instruction block steering the remote model
    pub system_instruction: String,

    /// The user's message, framed for analysis
    pub user_content: String,

    /// Shape the response must conform to
    pub response_schema: SchemaDescriptor,
}

/// A remote service able to emit JSON matching a declared schema
///
/// Each call is independent and stateless. Implementations must issue at
/// most one outbound request per call and must not retry.
pub trait StructuredGenerator {
    /// Error type for generation failures
    type Error;

    /// Run one generation call, returning the raw response text
    fn generate_structured(
        &self,
        request: &RequestPayload,
    ) -> impl Future<Output = Result<String, Self::Error>> + Send;
}
