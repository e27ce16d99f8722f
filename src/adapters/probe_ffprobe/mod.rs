//! FFprobe adapter for media file probing
//!
//! Runs `ffprobe -v quiet -print_format json -show_format -show_streams` and
//! reduces its output to a [`VideoProbeResult`].

use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::process::Command;
use tracing::debug;

use crate::adapters::resolve_tool;
use crate::domain::model::*;
use crate::engine::preflight;
use crate::error::{TrimSafeError, TrimSafeResult};
use crate::ports::*;

/// FFprobe JSON output format.
#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    #[serde(default)]
    format: Option<FfprobeFormat>,
    #[serde(default)]
    streams: Vec<FfprobeStream>,
}

#[derive(Debug, Deserialize)]
struct FfprobeFormat {
    duration: Option<String>,
    format_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FfprobeStream {
    codec_type: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
    avg_frame_rate: Option<String>,
    r_frame_rate: Option<String>,
}

/// FFprobe-based probe adapter
pub struct FfprobeAdapter {
    binary: String,
}

impl FfprobeAdapter {
    /// Create new FFprobe adapter for the given binary name or path
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

#[async_trait]
impl ProbePort for FfprobeAdapter {
    async fn probe(&self, path: &Path) -> TrimSafeResult<VideoProbeResult> {
        preflight::check_source(path)?;
        let program = resolve_tool("ffprobe", &self.binary)?;

        debug!("Running {} on {}", program.display(), path.display());
        let output = Command::new(&program)
            .args([
                "-v",
                "quiet",
                "-print_format",
                "json",
                "-show_format",
                "-show_streams",
            ])
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| TrimSafeError::ToolSpawn {
                tool: "ffprobe",
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let message = if stderr.is_empty() {
                format!("ffprobe exited with {}", output.status)
            } else {
                stderr
            };
            return Err(TrimSafeError::probe_failed(path, message));
        }

        parse_probe_output(path, &output.stdout)
    }
}

/// Reduce ffprobe JSON to a [`VideoProbeResult`]
pub fn parse_probe_output(path: &Path, stdout: &[u8]) -> TrimSafeResult<VideoProbeResult> {
    let probe: FfprobeOutput = serde_json::from_slice(stdout)
        .map_err(|e| TrimSafeError::probe_failed(path, format!("unparseable ffprobe output: {}", e)))?;

    let format = probe.format.as_ref();
    let duration_seconds = format
        .and_then(|f| f.duration.as_deref())
        .and_then(|d| d.trim().parse::<f64>().ok())
        .filter(|d| d.is_finite() && *d >= 0.0)
        .unwrap_or(0.0);
    let format_name = format
        .and_then(|f| f.format_name.clone())
        .unwrap_or_default();

    let video = probe
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("video"));

    let frame_rate_hint = video.and_then(|s| {
        s.avg_frame_rate
            .as_deref()
            .and_then(parse_frame_rate)
            .or_else(|| s.r_frame_rate.as_deref().and_then(parse_frame_rate))
    });

    Ok(VideoProbeResult {
        duration_seconds,
        width: video.and_then(|s| s.width).unwrap_or(0),
        height: video.and_then(|s| s.height).unwrap_or(0),
        format: format_name,
        frame_rate_hint,
    })
}

/// Parse frame rate string (e.g., "30/1" or "29.97"); `None` unless positive
fn parse_frame_rate(s: &str) -> Option<f64> {
    let rate = if let Some((num, den)) = s.split_once('/') {
        let num: f64 = num.trim().parse().ok()?;
        let den: f64 = den.trim().parse().ok()?;
        if den == 0.0 {
            return None;
        }
        num / den
    } else {
        s.trim().parse().ok()?
    };

    (rate.is_finite() && rate > 0.0).then_some(rate)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "streams": [
            {"index": 0, "codec_type": "audio", "codec_name": "aac", "avg_frame_rate": "0/0"},
            {"index": 1, "codec_type": "video", "codec_name": "h264", "width": 1920, "height": 1080,
             "avg_frame_rate": "30000/1001", "r_frame_rate": "30000/1001"},
            {"index": 2, "codec_type": "video", "codec_name": "mjpeg", "width": 320, "height": 240}
        ],
        "format": {"format_name": "mov,mp4,m4a,3gp,3g2,mj2", "duration": "120.040000"}
    }"#;

    #[test]
    fn test_parse_first_video_stream() {
        let probe = parse_probe_output(Path::new("a.mp4"), SAMPLE.as_bytes()).unwrap();
        assert_eq!(probe.width, 1920);
        assert_eq!(probe.height, 1080);
        assert_eq!(probe.format, "mov,mp4,m4a,3gp,3g2,mj2");
        assert!((probe.duration_seconds - 120.04).abs() < 1e-9);
        assert!((probe.frame_rate_hint.unwrap() - 29.97).abs() < 0.01);
    }

    #[test]
    fn test_missing_duration_and_video_default_to_zero() {
        let json = r#"{"streams": [{"codec_type": "audio"}], "format": {"format_name": "matroska,webm"}}"#;
        let probe = parse_probe_output(Path::new("a.mkv"), json.as_bytes()).unwrap();
        assert_eq!(probe.duration_seconds, 0.0);
        assert_eq!(probe.width, 0);
        assert_eq!(probe.height, 0);
        assert_eq!(probe.frame_rate_hint, None);
    }

    #[test]
    fn test_unparseable_output_is_probe_failure() {
        let err = parse_probe_output(Path::new("a.mp4"), b"not json").unwrap_err();
        assert!(matches!(err, TrimSafeError::ProbeFailed { .. }));
    }

    #[tokio::test]
    async fn test_missing_file_rejected_before_launch() {
        let adapter = FfprobeAdapter::new("definitely-not-ffprobe-xyz");
        let err = adapter.probe(Path::new("/no/such/dir/a.mp4")).await.unwrap_err();
        assert!(matches!(err, TrimSafeError::InputNotFound { .. }));
    }

    #[test]
    fn test_parse_frame_rate() {
        assert!((parse_frame_rate("30/1").unwrap() - 30.0).abs() < 0.01);
        assert!((parse_frame_rate("29.97").unwrap() - 29.97).abs() < 0.01);
        assert_eq!(parse_frame_rate("0/0"), None);
        assert_eq!(parse_frame_rate("0"), None);
    }
}
