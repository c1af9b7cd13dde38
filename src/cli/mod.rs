pub mod check;
pub mod completions;
pub mod resolve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// swatch - resolve symbolic colours through colour schemes
#[derive(Parser, Debug)]
#[command(name = "swatch")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to the manifest (default: ./swatch.yaml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log resolution and fallback details to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve colour expressions against a scheme
    Resolve(resolve::ResolveArgs),

    /// Check that every scheme covers the expected names
    Check(check::CheckArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Install the stderr log subscriber.
pub fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}
