//! `plugdoc sample` command implementation.

use std::path::PathBuf;

use clap::Args;
use plugdoc_core::{CommentMode, DocOutput, PluginData, synthesize};

use super::load_input;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the sample command.
#[derive(Args)]
pub(crate) struct SampleArgs {
    /// Path to ansible-doc JSON (from --json or --metadata-dump).
    #[arg(short, long)]
    input: PathBuf,

    /// Plugin name, fully qualified or the last segment if unambiguous.
    #[arg(short, long)]
    plugin: String,

    /// Comments to add: none, optional or descriptions.
    #[arg(long, default_value = "optional")]
    comments: CommentMode,
}

impl SampleArgs {
    /// Execute the sample command, printing the task to stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if the input cannot be read or the plugin is missing
    /// or undocumented.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let docs = load_input(&self.input)?;

        let (full_name, data) = find_plugin(&docs, &self.plugin)
            .ok_or_else(|| CliError::UnknownPlugin(self.plugin.clone()))?;
        let doc = data
            .doc
            .as_ref()
            .ok_or_else(|| CliError::Undocumented(full_name.to_owned()))?;

        output.result(&synthesize(full_name, &doc.options, self.comments));
        Ok(())
    }
}

/// Look up a plugin by full name, or by last segment when exactly one matches.
fn find_plugin<'a>(docs: &'a DocOutput, name: &str) -> Option<(&'a str, &'a PluginData)> {
    if let Some((full_name, data)) = docs.get_key_value(name) {
        return Some((full_name.as_str(), data));
    }

    let suffix = format!(".{name}");
    let mut matches = docs.iter().filter(|(full_name, _)| full_name.ends_with(&suffix));
    match (matches.next(), matches.next()) {
        (Some((full_name, data)), None) => Some((full_name.as_str(), data)),
        _ => None,
    }
}
