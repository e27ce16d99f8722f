// Adapters - External system implementations

use std::path::PathBuf;

use crate::error::{TrimSafeError, TrimSafeResult};

pub mod exec_ffmpeg;
pub mod fs_local;
pub mod probe_ffprobe;
pub mod toml_config;

// Re-export adapters
pub use exec_ffmpeg::FfmpegExecutor;
pub use fs_local::LocalFsAdapter;
pub use probe_ffprobe::FfprobeAdapter;
pub use toml_config::AppConfig;

/// Locate an external tool by name or path
pub fn resolve_tool(tool: &'static str, binary: &str) -> TrimSafeResult<PathBuf> {
    which::which(binary).map_err(|_| TrimSafeError::ToolNotFound {
        tool,
        binary: binary.to_string(),
    })
}
