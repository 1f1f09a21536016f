//! CLI support for quarksy
//!
//! Provides programmatic access to the `quarksy` commands for embedding in
//! other tools. Nothing here reads from stdin or prints.

mod build;
mod get;

pub use build::{BuildOptions, execute_build};
pub use get::{GetOptions, execute_get};

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use crate::{
    evaluator::EvalError,
    platform::{CssPlatform, CssPlatformOptions, Platform, PlatformOutput},
    tokens_object::TokensError,
    tree::TokenTree,
};

/// Tokens file read when no input is given.
pub const DEFAULT_INPUT: &str = "tokens.json";

/// Errors that can occur during CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Tokens(#[from] TokensError),

    #[error("Evaluation error: {0}")]
    Eval(#[from] EvalError),

    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("IO error: {0}")]
    Stdin(#[source] io::Error),

    #[error("Unknown platform: '{0}' (available: css)")]
    UnknownPlatform(String),
}

/// Parse the JSON text of a tokens file.
pub fn load_tree(input: &str) -> Result<TokenTree, CliError> {
    input
        .parse::<TokenTree>()
        .map_err(|e| CliError::Tokens(e.into()))
}

/// Instantiate the platforms selected by name.
pub fn platforms_for(
    names: &[String],
    css: &CssPlatformOptions,
) -> Result<Vec<Box<dyn Platform>>, CliError> {
    names
        .iter()
        .map(|name| match name.as_str() {
            "css" => Ok(Box::new(CssPlatform::new(css.clone())) as Box<dyn Platform>),
            other => Err(CliError::UnknownPlatform(other.to_string())),
        })
        .collect()
}

/// Write generated files into `output_dir`, creating it when needed.
pub fn write_platform_output(
    outputs: &[PlatformOutput],
    output_dir: &Path,
) -> Result<Vec<PathBuf>, CliError> {
    fs::create_dir_all(output_dir).map_err(|source| CliError::Io {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let mut written = Vec::with_capacity(outputs.len());
    for output in outputs {
        let path = output_dir.join(&output.file_name);
        fs::write(&path, &output.content).map_err(|source| CliError::Io {
            path: path.clone(),
            source,
        })?;
        tracing::info!(path = %path.display(), bytes = output.content.len(), "wrote platform output");
        written.push(path);
    }

    Ok(written)
}
