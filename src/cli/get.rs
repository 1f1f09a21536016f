//! Resolve a single key

use super::{CliError, load_tree};
use crate::TokensObject;

/// Options for the get command
#[derive(Debug, Clone, Default)]
pub struct GetOptions {
    /// JSON text of the tokens file
    pub input: String,
    /// Path prefix to look up, e.g. `spacing.sm`
    pub key: String,
}

/// Execute a get: the formatted value for `key`.
pub fn execute_get(options: &GetOptions) -> Result<String, CliError> {
    let tokens = TokensObject::new(load_tree(&options.input)?)?;
    Ok(tokens.get_value_for_key(&options.key)?)
}
