//! plugdoc CLI - plugin documentation renderer.
//!
//! Provides commands for:
//! - `build`: Render ansible-doc JSON into a static HTML site
//! - `sample`: Print a sample task for one plugin

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{BuildArgs, SampleArgs};
use output::Output;

/// plugdoc - render ansible-doc JSON into browsable HTML.
#[derive(Parser)]
#[command(name = "plugdoc", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a static documentation site.
    Build(BuildArgs),
    /// Print a sample task covering every parameter of a plugin.
    Sample(SampleArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let verbose = matches!(&cli.command, Commands::Build(args) if args.verbose);
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Build(args) => args.execute(),
        Commands::Sample(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
