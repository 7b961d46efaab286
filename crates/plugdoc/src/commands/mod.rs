//! CLI command implementations.

pub(crate) mod build;
pub(crate) mod sample;

use std::path::Path;

use plugdoc_core::{DocOutput, load_doc_output};

use crate::error::CliError;

pub(crate) use build::BuildArgs;
pub(crate) use sample::SampleArgs;

/// Read the ansible-doc JSON given on the command line.
fn load_input(path: &Path) -> Result<DocOutput, CliError> {
    load_doc_output(path).map_err(|source| CliError::Load {
        path: path.display().to_string(),
        source,
    })
}
