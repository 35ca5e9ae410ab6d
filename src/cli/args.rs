//! Command line argument parsing for SkinMatch CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// SkinMatch - skin-type suitability from cosmetic ingredient lists
#[derive(Parser, Debug, Clone)]
#[command(name = "skinmatch")]
#[command(about = "Predict which skin types a cosmetic product suits from its ingredient list")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct SkinMatchArgs {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE", env = "SKINMATCH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Model file, overriding the configured model path
    #[arg(short, long, value_name = "MODEL_FILE")]
    pub model: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl SkinMatchArgs {
    /// Get the effective verbosity level (0 = quiet, 1 = default)
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose.saturating_add(1)
        }
    }

    /// Default log directive for the effective verbosity.
    pub fn log_directive(&self) -> &'static str {
        match self.verbosity() {
            0 => "error",
            1 => "warn",
            2 => "info",
            3 => "debug",
            _ => "trace",
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Predict skin-type suitability for one ingredient list
    Analyze(AnalyzeArgs),

    /// Predict skin-type suitability for every row of a CSV file
    Batch(BatchArgs),

    /// Write the extracted features of every row of a CSV file
    Features(FeaturesArgs),

    /// Train a model from a labeled CSV file
    Train(TrainArgs),
}

/// Arguments for single-text analysis
#[derive(Parser, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Ingredient list, e.g. "Aqua, Glycerin, Niacinamide"
    #[arg(value_name = "TEXT")]
    pub text: String,

    /// Also print the extracted features
    #[arg(long)]
    pub features: bool,
}

/// Arguments for batch prediction
#[derive(Parser, Debug, Clone)]
pub struct BatchArgs {
    /// Input CSV file
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output CSV file
    #[arg(short, long, value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Name of the ingredient text column
    #[arg(long, value_name = "COLUMN")]
    pub text_column: Option<String>,
}

/// Arguments for feature export
#[derive(Parser, Debug, Clone)]
pub struct FeaturesArgs {
    /// Input CSV file
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output CSV file
    #[arg(short, long, value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Name of the ingredient text column
    #[arg(long, value_name = "COLUMN")]
    pub text_column: Option<String>,
}

/// Arguments for training
#[derive(Parser, Debug, Clone)]
pub struct TrainArgs {
    /// Labeled CSV file with an ingredient column and one 0/1 column per skin type
    #[arg(value_name = "DATASET")]
    pub dataset: PathBuf,

    /// Where to save the model (default: configured model path)
    #[arg(short, long, value_name = "MODEL_FILE")]
    pub output: Option<PathBuf>,

    /// Name of the ingredient text column
    #[arg(long, value_name = "COLUMN")]
    pub text_column: Option<String>,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
