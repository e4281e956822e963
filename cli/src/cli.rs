use clap::{Parser, ValueEnum, ValueHint};
use std::path::PathBuf;

#[derive(Parser)]
#[command(about, version, name = "ontometrics")]
/// Descriptive metrics over the OWL/RDF ontologies of a directory
///
/// Every *.ttl file of the input directory is analyzed, files that cannot be parsed are skipped.
pub struct Args {
    /// Directory containing the Turtle files to analyze
    ///
    /// Sub-directories are not visited.
    #[arg(
        short,
        long,
        default_value = "ttl",
        env = "ONTOMETRICS_INPUT_DIR",
        value_hint = ValueHint::DirPath
    )]
    pub input_dir: PathBuf,
    /// File to write the report to
    #[arg(
        short,
        long,
        default_value = "ontology_metrics.xlsx",
        env = "ONTOMETRICS_OUTPUT",
        value_hint = ValueHint::FilePath
    )]
    pub output: PathBuf,
    /// Format of the report
    ///
    /// By default, the format is guessed from the output file extension and falls back to xlsx.
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,
    /// Minimal level of the log events written to stderr
    ///
    /// The RUST_LOG environment variable takes precedence over this option.
    #[arg(long, default_value = "info")]
    pub log_level: String,
    /// Format of the log events
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
pub enum OutputFormat {
    /// Excel workbook with one sheet per table
    Xlsx,
    /// Single CSV table of the per-file and combined metrics
    Csv,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines
    Pretty,
    /// One JSON object per line
    Json,
}
