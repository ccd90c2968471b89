//! Analysis and re-expression results

use crate::{Confidence, ConflictDomain};
use serde::{Deserialize, Serialize};

/// Decomposition of the input message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisLayer {
    /// Literal factual content
    pub literal: String,

    /// Dominant emotional state (fear, anger, pride, panic...)
    pub emotional_state: String,

    /// Detected cultural patterns, in the order reported; may be empty
    pub cultural_markers: Vec<String>,

    /// How the speaker projects power or vulnerability
    pub power_signaling: String,

    /// The strategic outcome the speaker actually wants
    pub inferred_intent: String,

    /// Advisory certainty of the analysis
    pub confidence: Confidence,
}

/// The rewritten message for the receiving audience
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReExpression {
    /// Rewritten message
    pub message: String,

    /// Why this rewrite works for the receiver
    pub cultural_note: String,

    /// Other possible phrasings; may be empty
    pub alternatives: Vec<String>,
}

/// Outcome of one successful bridge call
///
/// Built once, atomically, at the end of the call that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BridgeResult {
    /// Input text, verbatim
    pub original: String,

    /// Domain the request was compiled for
    pub domain: ConflictDomain,

    /// Decomposition of the input
    pub analysis: AnalysisLayer,

    /// Rewritten message
    pub re_expression: ReExpression,
}
