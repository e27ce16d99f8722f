// Domain rules - Business logic and policies

use std::path::Path;

use crate::error::{TrimSafeError, TrimSafeResult};

/// Container extensions accepted as trim input (lowercase, without dot)
pub const SUPPORTED_EXTENSIONS: &[&str] = &["mp4", "mov", "mkv", "webm", "avi", "m4v"];

/// Check `0 <= start < end`
pub fn validate_range(start_seconds: f64, end_seconds: f64) -> TrimSafeResult<()> {
    let valid = start_seconds.is_finite()
        && end_seconds.is_finite()
        && start_seconds >= 0.0
        && end_seconds > start_seconds;

    if valid {
        Ok(())
    } else {
        Err(TrimSafeError::InvalidRange {
            start: start_seconds,
            end: end_seconds,
        })
    }
}

/// Case-insensitive extension check against [`SUPPORTED_EXTENSIONS`]
pub fn is_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| ext.eq_ignore_ascii_case(supported))
        })
        .unwrap_or(false)
}

/// Reject paths whose extension is not supported
pub fn validate_extension(path: &Path) -> TrimSafeResult<()> {
    if is_supported_extension(path) {
        Ok(())
    } else {
        Err(TrimSafeError::UnsupportedExtension {
            path: path.to_path_buf(),
        })
    }
}

/// Make a caller-supplied job id safe to embed in a file name
pub fn sanitize_job_id(job_id: &str) -> String {
    let sanitized: String = job_id
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if sanitized.is_empty() {
        "job".to_string()
    } else {
        sanitized
    }
}
