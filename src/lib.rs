//! TrimSafe video trimmer library
//!
//! Trims a time window out of a video by driving ffmpeg, either by stream
//! copy, by re-encode, or by stream copy with a single re-encode fallback.
//! In-place trims go through a temp file and a backup so the original media
//! is never lost.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config_initialization;
pub mod domain;
pub mod engine;
pub mod error;
pub mod ports;
pub mod utils;

// Re-export commonly used types
pub use app::{DefaultAppContainer, TrimInteractor};
pub use domain::model::{
    OverwriteRequest, ProgressEvent, Strategy, TimeSpec, TrimMode, TrimRequest, TrimResult,
    VideoProbeResult,
};
pub use error::{ErrorKind, TrimSafeError, TrimSafeResult};
