//! Parley Bridge
//!
//! Turns a conflict-laden message into a structured analysis and a
//! de-escalated rewrite, via one schema-constrained call to a remote model.
//!
//! # Overview
//!
//! The bridge is the boundary layer between a caller (a UI, the CLI, a test)
//! and the remote generation service. It compiles a deterministic request,
//! performs exactly one call, and validates the response before anything
//! reaches the caller.
//!
//! # Architecture
//!
//! ```text
//! (text, domain, adjustments) → RequestCompiler → StructuredGenerator
//!                                                        ↓
//!                     BridgeResult ← Validator/Mapper ← raw JSON
//! ```
//!
//! # Failure Kinds
//!
//! - **Validation**: bad caller input, never sent
//! - **Network**: the remote call could not complete
//! - **MalformedResponse**: the body is not JSON
//! - **SchemaViolation**: a required field is missing, mistyped or empty
//! - **Unknown**: anything else, including a panicking generator
//!
//! None are retried; the caller decides whether to call again.
//!
//! # Example Usage
//!
//! ```no_run
//! use parley_bridge::{Bridge, BridgeConfig};
//! use parley_domain::{ConflictDomain, UserAdjustments};
//! use parley_llm::{GeminiConfig, GeminiProvider};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = GeminiProvider::from_config(GeminiConfig::default())?;
//! let bridge = Bridge::new(provider, BridgeConfig::default());
//!
//! let result = bridge
//!     .process_bridge(
//!         "We will not stand idle.",
//!         ConflictDomain::International,
//!         UserAdjustments::new(30, 70, 50)?,
//!     )
//!     .await?;
//!
//! println!("Intent: {}", result.analysis.inferred_intent);
//! println!("Rewrite: {}", result.re_expression.message);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod bridge;
mod config;
mod error;
mod parser;
mod prompt;


pub use bridge::{Bridge, BridgeState};
pub use config::BridgeConfig;
pub use error::{BridgeError, ErrorKind, USER_FACING_MESSAGE};
pub use parser::{parse_and_map, validate_shape};
pub use prompt::{compile_request, RequestCompiler, ALWAYS_DIRECTIVES, NEVER_DIRECTIVES};
