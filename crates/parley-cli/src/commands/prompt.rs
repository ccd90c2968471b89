//! Prompt command implementation.

use super::resolve_message;
use crate::cli::MessageArgs;
use crate::config::AppConfig;
use crate::error::Result;
use crate::output::Formatter;
use parley_bridge::{compile_request, BridgeError};
use parley_domain::ValidationError;

/// Execute the prompt command.
///
/// Compiles the request exactly as the bridge command would, and prints it
/// instead of sending it.
pub fn execute_prompt(args: MessageArgs, config: &AppConfig, formatter: &Formatter) -> Result<()> {
    let message = resolve_message(&args, &config.defaults)?;
    if message.text.trim().is_empty() {
        return Err(BridgeError::from(ValidationError::EmptyInput).into());
    }

    let request = compile_request(&message.text, message.domain, message.adjustments);
    println!("{}", formatter.format_request(&request)?);
    Ok(())
}
