//! CLI command definitions and handlers.

pub mod analyze;
pub mod models;

use clap::{Parser, Subcommand};

/// Reno Vision - Renovation photo analysis
#[derive(Parser)]
#[command(name = "reno-vision")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Shared analyze arguments (image, output, thresholds).
    #[command(flatten)]
    pub analyze: analyze::AnalyzeArgs,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a renovation photo
    Analyze(analyze::AnalyzeArgs),
    /// Manage ML models
    Models(models::ModelsArgs),
}

/// Process exit codes.
///
/// A skipped image is a distinct, successful termination with its own
/// code so shell pipelines can branch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Analysis completed and a record was written.
    Success = 0,
    /// The image was excluded (contains people).
    Skipped = 1,
    /// Invalid invocation or a pipeline failure.
    Error = 2,
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        Self::from(code as u8)
    }
}
