// Domain models - Core types and data structures

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{TrimSafeError, TrimSafeResult};

/// Time specification with precision - represents time in seconds with fractional precision
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct TimeSpec {
    pub seconds: f64,
}

impl TimeSpec {
    /// Create a new TimeSpec from seconds
    pub fn from_seconds(seconds: f64) -> Self {
        Self { seconds }
    }

    /// Parse time string in various formats
    pub fn parse(time_str: &str) -> TrimSafeResult<Self> {
        let trimmed = time_str.trim();
        let invalid = || TrimSafeError::InvalidTime {
            time: time_str.to_string(),
        };

        // Try parsing as seconds (float)
        if let Ok(seconds) = trimmed.parse::<f64>() {
            if seconds < 0.0 || !seconds.is_finite() {
                return Err(invalid());
            }
            return Ok(Self::from_seconds(seconds));
        }

        // Try parsing as HH:MM:SS.ms or MM:SS.ms
        let parts: Vec<&str> = trimmed.split(':').collect();
        let (hours, minutes, seconds_part) = match parts.as_slice() {
            [m, s] => (0u32, *m, *s),
            [h, m, s] => (h.parse::<u32>().map_err(|_| invalid())?, *m, *s),
            _ => return Err(invalid()),
        };

        let minutes = minutes.parse::<u32>().map_err(|_| invalid())?;
        let seconds_part = seconds_part.parse::<f64>().map_err(|_| invalid())?;

        if parts.len() == 3 && minutes >= 60 {
            return Err(invalid());
        }
        if !(0.0..60.0).contains(&seconds_part) {
            return Err(invalid());
        }

        Ok(Self::from_seconds(
            hours as f64 * 3600.0 + minutes as f64 * 60.0 + seconds_part,
        ))
    }

    /// Get seconds value
    pub fn as_seconds(&self) -> f64 {
        self.seconds
    }
}

impl fmt::Display for TimeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", crate::utils::time::format_timestamp(self.seconds))
    }
}

/// Trim mode requested by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrimMode {
    /// Stream copy only
    Copy,
    /// Re-encode only
    Reencode,
    /// Stream copy, falling back to re-encode once on failure
    Smart,
}

impl TrimMode {
    /// Parse trim mode from string
    pub fn parse(mode_str: &str) -> TrimSafeResult<Self> {
        match mode_str.trim().to_lowercase().as_str() {
            "copy" => Ok(Self::Copy),
            "reencode" | "re-encode" => Ok(Self::Reencode),
            "smart" => Ok(Self::Smart),
            _ => Err(TrimSafeError::InvalidMode {
                mode: mode_str.to_string(),
            }),
        }
    }
}

impl FromStr for TrimMode {
    type Err = TrimSafeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for TrimMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Copy => "copy",
            Self::Reencode => "reencode",
            Self::Smart => "smart",
        };
        f.write_str(name)
    }
}

/// Concrete strategy of a single executor invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    Copy,
    Reencode,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Copy => "copy",
            Self::Reencode => "reencode",
        })
    }
}

/// Media metadata reported by the probe tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoProbeResult {
    pub duration_seconds: f64,
    pub width: u32,
    pub height: u32,
    pub format: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frame_rate_hint: Option<f64>,
}

impl VideoProbeResult {
    /// Duration of one frame, if the frame rate is known
    pub fn frame_interval(&self) -> Option<f64> {
        self.frame_rate_hint.map(|fps| 1.0 / fps)
    }
}

/// One trim job: extract `[start_seconds, end_seconds)` of `input_path` into `output_path`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrimRequest {
    pub job_id: String,
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub start_seconds: f64,
    pub end_seconds: f64,
    pub mode: TrimMode,
}

impl TrimRequest {
    /// Create a new trim request
    pub fn new(
        job_id: impl Into<String>,
        input_path: impl Into<PathBuf>,
        output_path: impl Into<PathBuf>,
        start_seconds: f64,
        end_seconds: f64,
        mode: TrimMode,
    ) -> Self {
        Self {
            job_id: job_id.into(),
            input_path: input_path.into(),
            output_path: output_path.into(),
            start_seconds,
            end_seconds,
            mode,
        }
    }

    /// Requested segment length in seconds
    pub fn segment_duration(&self) -> f64 {
        self.end_seconds - self.start_seconds
    }
}

/// In-place trim job; output and backup paths are derived from `input_path`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverwriteRequest {
    pub job_id: String,
    pub input_path: PathBuf,
    pub start_seconds: f64,
    pub end_seconds: f64,
    pub mode: TrimMode,
}

impl OverwriteRequest {
    /// Create a new overwrite request
    pub fn new(
        job_id: impl Into<String>,
        input_path: impl Into<PathBuf>,
        start_seconds: f64,
        end_seconds: f64,
        mode: TrimMode,
    ) -> Self {
        Self {
            job_id: job_id.into(),
            input_path: input_path.into(),
            start_seconds,
            end_seconds,
            mode,
        }
    }

    /// Build the trim request that writes into `output_path`
    pub fn to_trim_request(&self, output_path: &Path) -> TrimRequest {
        TrimRequest {
            job_id: self.job_id.clone(),
            input_path: self.input_path.clone(),
            output_path: output_path.to_path_buf(),
            start_seconds: self.start_seconds,
            end_seconds: self.end_seconds,
            mode: self.mode,
        }
    }
}

/// Outcome of a trim attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrimResult {
    pub ok: bool,
    pub output_path: PathBuf,
    pub used_mode: Strategy,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TrimResult {
    /// Successful attempt
    pub fn success(output_path: impl Into<PathBuf>, used_mode: Strategy) -> Self {
        Self {
            ok: true,
            output_path: output_path.into(),
            used_mode,
            error: None,
        }
    }

    /// Failed attempt carrying the tool's diagnostic text
    pub fn failure(
        output_path: impl Into<PathBuf>,
        used_mode: Strategy,
        error: impl Into<String>,
    ) -> Self {
        Self {
            ok: false,
            output_path: output_path.into(),
            used_mode,
            error: Some(error.into()),
        }
    }
}

/// Progress update correlated to a job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressEvent {
    pub job_id: String,
    pub ratio: f64,
}

#[cfg(test)]
mod tests;
