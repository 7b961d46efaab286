//! CLI error types.

use plugdoc_config::ConfigError;
use plugdoc_core::LoadError;
use plugdoc_site::BuildError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("Failed to read {path}: {source}")]
    Load {
        path: String,
        #[source]
        source: LoadError,
    },

    #[error("{0}")]
    Build(#[from] BuildError),

    #[error("Plugin '{0}' not found in input")]
    UnknownPlugin(String),

    #[error("Plugin '{0}' has no documentation")]
    Undocumented(String),
}
