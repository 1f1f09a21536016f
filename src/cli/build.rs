//! Transform a tokens file into platform files

use std::path::PathBuf;

use super::{CliError, load_tree, platforms_for, write_platform_output};
use crate::{TokensObject, platform::CssPlatformOptions};

/// Options for the build command
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// JSON text of the tokens file
    pub input: String,
    /// Platform names, e.g. `css`
    pub platforms: Vec<String>,
    pub css: CssPlatformOptions,
    pub output_dir: PathBuf,
}

impl Default for BuildOptions {
    fn default() -> Self {
        BuildOptions {
            input: String::new(),
            platforms: vec!["css".to_string()],
            css: CssPlatformOptions::default(),
            output_dir: PathBuf::from("."),
        }
    }
}

/// Execute a build: resolve every token and write one set of files per platform.
///
/// Returns the paths of the written files.
pub fn execute_build(options: &BuildOptions) -> Result<Vec<PathBuf>, CliError> {
    let platforms = platforms_for(&options.platforms, &options.css)?;
    let tokens = TokensObject::new(load_tree(&options.input)?)?;

    let mut written = Vec::new();
    for platform in &platforms {
        tracing::info!(platform = platform.name(), "running platform");
        let outputs = platform.run(&tokens)?;
        written.extend(write_platform_output(&outputs, &options.output_dir)?);
    }

    Ok(written)
}
