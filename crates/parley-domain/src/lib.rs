//! Parley Domain Layer
//!
//! Value types shared by every other Parley crate, plus the trait seam to the
//! remote structured-generation service.
//!
//! ## Key Concepts
//!
//! - **ConflictDomain**: the contextual frame a message is read in
//! - **UserAdjustments**: intensity, formality and directness sliders, each in [0, 100]
//! - **AnalysisLayer**: decomposition of the message (literal content, emotion,
//!   cultural markers, power signaling, intent, confidence)
//! - **ReExpression**: the rewritten message with its rationale and alternatives
//! - **BridgeResult**: the aggregate returned by one successful call
//! - **SchemaDescriptor**: the required-field contract the remote response must satisfy
//!
//! All types are value objects owned by the caller; there is no shared
//! mutable state and no identity across requests.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adjustments;
pub mod confidence;
pub mod conflict;
pub mod error;
pub mod result;
pub mod schema;
pub mod traits;

// Re-exports for convenience
pub use adjustments::UserAdjustments;
pub use confidence::Confidence;
pub use conflict::ConflictDomain;
pub use error::ValidationError;
pub use result::{AnalysisLayer, BridgeResult, ReExpression};
pub use schema::{FieldKind, FieldSpec, SchemaDescriptor};
pub use traits::{RequestPayload, StructuredGenerator};
