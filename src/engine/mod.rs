//! Trim orchestration engine

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{TrimSafeError, TrimSafeResult};

pub mod overwrite;
pub mod preflight;
pub mod progress;
pub mod strategy;

pub use overwrite::OverwriteCoordinator;
pub use strategy::TrimStrategySelector;

/// Fixed codec/quality settings for one re-encode target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncodeProfile {
    /// Video encoder
    pub video_codec: String,
    /// Encoder preset, if the encoder has one
    pub preset: Option<String>,
    /// Constant Rate Factor
    pub crf: u8,
    /// Target video bitrate; `"0"` puts libvpx into constant-quality mode
    pub video_bitrate: Option<String>,
    /// Output pixel format
    pub pixel_format: Option<String>,
    /// Audio encoder
    pub audio_codec: String,
    /// Audio bitrate
    pub audio_bitrate: Option<String>,
}

impl EncodeProfile {
    /// H.264/AAC profile used for every container except WebM
    pub fn h264() -> Self {
        Self {
            video_codec: "libx264".to_string(),
            preset: Some("veryfast".to_string()),
            crf: 18,
            video_bitrate: None,
            pixel_format: Some("yuv420p".to_string()),
            audio_codec: "aac".to_string(),
            audio_bitrate: Some("192k".to_string()),
        }
    }

    /// VP9/Opus profile for WebM outputs
    pub fn vp9() -> Self {
        Self {
            video_codec: "libvpx-vp9".to_string(),
            preset: None,
            crf: 32,
            video_bitrate: Some("0".to_string()),
            pixel_format: Some("yuv420p".to_string()),
            audio_codec: "libopus".to_string(),
            audio_bitrate: Some("128k".to_string()),
        }
    }

    /// Highest CRF the encoder accepts
    fn max_crf(&self) -> u8 {
        match self.video_codec.as_str() {
            "libx264" | "libx265" => 51,
            _ => 63,
        }
    }

    /// Validate encoder settings
    pub fn validate(&self) -> TrimSafeResult<()> {
        if self.video_codec.trim().is_empty() || self.audio_codec.trim().is_empty() {
            return Err(TrimSafeError::config("Encoder names cannot be empty"));
        }
        if self.crf > self.max_crf() {
            return Err(TrimSafeError::config(format!(
                "CRF value {} exceeds {} for {}",
                self.crf,
                self.max_crf(),
                self.video_codec
            )));
        }
        Ok(())
    }

    /// Output arguments for this profile
    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec!["-c:v".to_string(), self.video_codec.clone()];

        if let Some(preset) = &self.preset {
            args.extend(["-preset".to_string(), preset.clone()]);
        }
        args.extend(["-crf".to_string(), self.crf.to_string()]);
        if let Some(bitrate) = &self.video_bitrate {
            args.extend(["-b:v".to_string(), bitrate.clone()]);
        }
        if let Some(pix_fmt) = &self.pixel_format {
            args.extend(["-pix_fmt".to_string(), pix_fmt.clone()]);
        }

        args.extend(["-c:a".to_string(), self.audio_codec.clone()]);
        if let Some(bitrate) = &self.audio_bitrate {
            args.extend(["-b:a".to_string(), bitrate.clone()]);
        }

        args
    }
}

/// Re-encode profiles keyed by output container
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReencodeConfig {
    /// Profile for every container without a dedicated entry
    pub default: EncodeProfile,
    /// Profile for `.webm` outputs
    pub webm: EncodeProfile,
}

impl Default for ReencodeConfig {
    fn default() -> Self {
        Self {
            default: EncodeProfile::h264(),
            webm: EncodeProfile::vp9(),
        }
    }
}

impl ReencodeConfig {
    /// Profile matching the output container
    pub fn profile_for(&self, output_path: &Path) -> &EncodeProfile {
        let is_webm = output_path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("webm"))
            .unwrap_or(false);

        if is_webm {
            &self.webm
        } else {
            &self.default
        }
    }

    /// Validate both profiles
    pub fn validate(&self) -> TrimSafeResult<()> {
        self.default.validate()?;
        self.webm.validate()
    }
}
