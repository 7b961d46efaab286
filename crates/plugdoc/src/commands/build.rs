//! `plugdoc build` command implementation.

use std::path::PathBuf;

use clap::Args;
use plugdoc_config::{CliSettings, Config};
use plugdoc_site::SiteBuilder;

use super::load_input;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Path to ansible-doc JSON (from --json or --metadata-dump).
    #[arg(short, long)]
    input: PathBuf,

    /// Output directory for the generated site (overrides config, default: site/).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Site title (overrides config).
    #[arg(short, long)]
    title: Option<String>,

    /// Collection description (overrides config).
    #[arg(short, long)]
    description: Option<String>,

    /// Collection version shown on the index page (overrides config).
    #[arg(long)]
    site_version: Option<String>,

    /// Inline CSS in each page instead of a shared styles.css.
    #[arg(long)]
    inline_styles: bool,

    /// Path to configuration file (default: auto-discover plugdoc.toml).
    #[arg(short, long, env = "PLUGDOC_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose output (log every written file).
    #[arg(short, long)]
    pub verbose: bool,
}

impl BuildArgs {
    /// Execute the build command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or input loading fails, the input has
    /// no documented plugins, or the site cannot be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            title: self.title,
            description: self.description,
            version: self.site_version,
            output_dir: self.output,
            inline_styles: self.inline_styles.then_some(true),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        if let Some(path) = &config.config_path {
            output.info(&format!("Config: {}", path.display()));
        }

        output.info(&format!("Reading {}...", self.input.display()));
        let docs = load_input(&self.input)?;
        let documented = docs.values().filter(|data| data.doc.is_some()).count();
        output.highlight(&format!("Found {documented} plugins"));

        let output_dir = &config.build_resolved.output_dir;
        let report = SiteBuilder::from_config(&config).build(&docs, output_dir)?;

        for (name, reason) in &report.skipped {
            output.warning(&format!("Skipped {name}: {reason}"));
        }
        for file in &report.files {
            output.info(&format!("  {}", file.display()));
        }
        output.success(&format!(
            "Done! {} pages written to {}",
            report.pages.len(),
            output_dir.display()
        ));
        Ok(())
    }
}
