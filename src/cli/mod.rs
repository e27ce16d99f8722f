//! CLI module for TrimSafe
//!
//! This module handles command-line argument parsing and command execution.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod args;
pub mod commands;

/// TrimSafe video trimmer
///
/// Cuts a time window out of a video with ffmpeg, by stream copy, re-encode,
/// or stream copy with re-encode fallback, and can replace the original file
/// without ever losing it.
#[derive(Parser, Debug)]
#[command(name = "trimsafe")]
#[command(about = "TrimSafe - trim videos with ffmpeg, safely in place if you want")]
#[command(version)]
#[command(long_about = None)]
pub struct Cli {
    /// Logging level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Configuration file (TOML)
    #[arg(long, global = true, env = "TRIMSAFE_CONFIG")]
    pub config: Option<PathBuf>,

    /// ffmpeg binary name or path
    #[arg(long, global = true)]
    pub ffmpeg: Option<String>,

    /// ffprobe binary name or path
    #[arg(long, global = true)]
    pub ffprobe: Option<String>,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show duration, dimensions, format and frame rate of a video
    Probe(args::ProbeArgs),
    /// Print the default output path for a trim
    Suggest(args::SuggestArgs),
    /// Extract a segment into a new file
    Trim(args::TrimArgs),
    /// Replace a video with a segment of itself
    Overwrite(args::OverwriteArgs),
}
