//! Command-line argument definitions

use std::path::PathBuf;

use clap::Args;

/// Arguments for the probe command
#[derive(Args, Debug)]
pub struct ProbeArgs {
    /// Input video file path
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the suggest command
#[derive(Args, Debug)]
pub struct SuggestArgs {
    /// Input video file path
    #[arg(short, long)]
    pub input: PathBuf,

    /// Number the suggestion until it names a free path
    #[arg(long)]
    pub available: bool,
}

/// Arguments for the trim command
#[derive(Args, Debug)]
pub struct TrimArgs {
    /// Input video file path
    #[arg(short, long)]
    pub input: PathBuf,

    /// Start time (HH:MM:SS.ms, MM:SS.ms, or seconds)
    #[arg(short, long)]
    pub start: String,

    /// End time (HH:MM:SS.ms, MM:SS.ms, or seconds)
    #[arg(short, long)]
    pub end: String,

    /// Output file path (default: <input>_trimmed.<ext>, numbered if taken)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Trim mode: copy, reencode or smart
    #[arg(short, long, default_value = "smart")]
    pub mode: String,

    /// Job id used in progress output and temp file names (default: random)
    #[arg(long)]
    pub job_id: Option<String>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the overwrite command
#[derive(Args, Debug)]
pub struct OverwriteArgs {
    /// Video file to replace
    #[arg(short, long)]
    pub input: PathBuf,

    /// Start time (HH:MM:SS.ms, MM:SS.ms, or seconds)
    #[arg(short, long)]
    pub start: String,

    /// End time (HH:MM:SS.ms, MM:SS.ms, or seconds)
    #[arg(short, long)]
    pub end: String,

    /// Trim mode: copy, reencode or smart
    #[arg(short, long, default_value = "smart")]
    pub mode: String,

    /// Job id used in progress output and temp file names (default: random)
    #[arg(long)]
    pub job_id: Option<String>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}
