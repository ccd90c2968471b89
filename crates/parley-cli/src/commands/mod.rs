//! Command implementations.

mod bridge;
mod domains;
mod prompt;
mod schema;

pub use bridge::execute_bridge;
pub use domains::execute_domains;
pub use prompt::execute_prompt;
pub use schema::execute_schema;

use crate::cli::MessageArgs;
use crate::config::Defaults;
use crate::error::Result;
use parley_bridge::BridgeError;
use parley_domain::{ConflictDomain, UserAdjustments};
use std::io::Read;

/// A fully resolved request: message, domain and sliders
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedMessage {
    pub text: String,
    pub domain: ConflictDomain,
    pub adjustments: UserAdjustments,
}

/// Merge flags over configured defaults, reading stdin when no text is given.
pub fn resolve_message(args: &MessageArgs, defaults: &Defaults) -> Result<ResolvedMessage> {
    let text = match args.text.as_deref() {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf.trim_end_matches(['\n', '\r']).to_string()
        }
        Some(text) => text.to_string(),
    };
    resolve_with_text(text, args, defaults)
}

/// Same as [`resolve_message`] for an already obtained text.
pub fn resolve_with_text(
    text: String,
    args: &MessageArgs,
    defaults: &Defaults,
) -> Result<ResolvedMessage> {
    let domain = match args.domain.as_deref() {
        Some(label) => label
            .parse::<ConflictDomain>()
            .map_err(BridgeError::from)?,
        None => defaults.domain,
    };

    let base = defaults.adjustments;
    let adjustments = UserAdjustments::new(
        args.intensity.unwrap_or(i64::from(base.intensity())),
        args.formality.unwrap_or(i64::from(base.formality())),
        args.directness.unwrap_or(i64::from(base.directness())),
    )
    .map_err(BridgeError::from)?;

    Ok(ResolvedMessage {
        text,
        domain,
        adjustments,
    })
}
