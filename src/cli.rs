//! CLI interface for grad-match

use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "grad-match")]
#[command(about = "Normalize AI graduate program recommendations and score applicant profiles")]
#[command(long_about = "Turn loosely structured AI model output into canonical recommendation sets and CV analyses, and compute heuristic match scores for applicant profiles")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format: console, json (defaults to the configured format)
    #[arg(short, long, global = true)]
    pub output: Option<String>,

    /// Disable colored console output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Include reasons, requirements and report metadata
    #[arg(short, long, global = true)]
    pub detailed: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Normalize a university recommendation response
    Recommendations {
        /// Response file (JSON, TXT, MD) or - for stdin
        input: PathBuf,

        /// List entries by match score, highest first (console output only)
        #[arg(long)]
        sort: bool,
    },

    /// Validate and display a CV analysis response
    CvAnalysis {
        /// Response file (JSON, TXT, MD) or - for stdin
        input: PathBuf,
    },

    /// Compute match scores for one profile or a list of profiles
    Score {
        /// JSON file holding a profile object or an array of profiles
        input: PathBuf,

        /// Seed the jitter so scores are reproducible
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Print a prompt that asks the model for a parseable response
    Prompt {
        #[arg(value_enum)]
        kind: PromptKind,

        /// Profile JSON (recommendations) or CV text (cv) to fill in
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Preferred field of study
        #[arg(long)]
        field: Option<String>,

        /// Number of programs to ask for
        #[arg(long, default_value_t = 6)]
        max_results: usize,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PromptKind {
    Recommendations,
    Cv,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Print the configuration file location
    Path,

    /// Reset configuration to defaults
    Reset,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<crate::config::OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(crate::config::OutputFormat::Console),
        "json" => Ok(crate::config::OutputFormat::Json),
        _ => Err(format!("Invalid output format: {}. Supported: console, json", format)),
    }
}

/// Validate file extension. `-` (stdin) is always accepted.
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    if path == Path::new(crate::input::manager::STDIN_PATH) {
        return Ok(());
    }

    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}
