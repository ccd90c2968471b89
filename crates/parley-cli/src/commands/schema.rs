//! Schema command implementation.

use crate::error::Result;
use crate::output::Formatter;
use parley_domain::SchemaDescriptor;

/// Execute the schema command.
pub fn execute_schema(formatter: &Formatter) -> Result<()> {
    println!("{}", formatter.format_schema(&SchemaDescriptor::bridge())?);
    Ok(())
}
