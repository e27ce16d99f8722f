// TOML config adapter - Typed configuration loaded from TOML files

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::adapters::exec_ffmpeg::DEFAULT_TAIL_LINES;
use crate::engine::ReencodeConfig;
use crate::error::{TrimSafeError, TrimSafeResult};
use crate::utils::logging::LoggingConfig;

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "trimsafe.toml";

/// External tool locations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    /// ffmpeg binary name or path
    pub ffmpeg: String,
    /// ffprobe binary name or path
    pub ffprobe: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            ffmpeg: "ffmpeg".to_string(),
            ffprobe: "ffprobe".to_string(),
        }
    }
}

/// Subprocess handling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionConfig {
    /// Trailing diagnostic lines kept as failure message
    pub diagnostic_tail_lines: usize,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            diagnostic_tail_lines: DEFAULT_TAIL_LINES,
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub tools: ToolsConfig,
    pub reencode: ReencodeConfig,
    pub execution: ExecutionConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Parse configuration from TOML text; missing keys keep their defaults
    pub fn from_toml_str(content: &str) -> TrimSafeResult<Self> {
        toml::from_str(content)
            .map_err(|e| TrimSafeError::config(format!("Failed to parse TOML config: {}", e)))
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> TrimSafeResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            TrimSafeError::config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// Config file to read: `explicit`, else `trimsafe.toml` in the working directory if present
    pub fn resolve_source(explicit: Option<&Path>) -> Option<PathBuf> {
        match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => {
                let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
                fallback.is_file().then_some(fallback)
            }
        }
    }

    /// Defaults, overlaid by the file [`AppConfig::resolve_source`] picks
    pub fn load(explicit: Option<&Path>) -> TrimSafeResult<Self> {
        match Self::resolve_source(explicit) {
            Some(path) => Self::from_file(&path),
            None => Ok(Self::default()),
        }
    }

    /// Apply `TRIMSAFE_*` overrides read through `lookup`
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> TrimSafeResult<usize>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut applied = 0;

        if let Some(value) = lookup("TRIMSAFE_FFMPEG") {
            self.tools.ffmpeg = value;
            applied += 1;
        }
        if let Some(value) = lookup("TRIMSAFE_FFPROBE") {
            self.tools.ffprobe = value;
            applied += 1;
        }
        if let Some(value) = lookup("TRIMSAFE_LOG_LEVEL") {
            self.logging.level = value;
            applied += 1;
        }
        if let Some(value) = lookup("TRIMSAFE_CRF") {
            self.reencode.default.crf = value
                .trim()
                .parse()
                .map_err(|e| TrimSafeError::config(format!("Invalid TRIMSAFE_CRF value: {}", e)))?;
            applied += 1;
        }
        if let Some(value) = lookup("TRIMSAFE_PRESET") {
            self.reencode.default.preset = Some(value);
            applied += 1;
        }

        Ok(applied)
    }

    /// Validate configuration
    pub fn validate(&self) -> TrimSafeResult<()> {
        if self.tools.ffmpeg.trim().is_empty() || self.tools.ffprobe.trim().is_empty() {
            return Err(TrimSafeError::config("Tool binaries cannot be empty"));
        }
        if self.execution.diagnostic_tail_lines == 0 {
            return Err(TrimSafeError::config(
                "diagnostic_tail_lines must be at least 1",
            ));
        }
        self.reencode.validate()?;
        self.logging.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.tools.ffmpeg, "ffmpeg");
        assert_eq!(config.reencode.default.crf, 18);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
            [tools]
            ffmpeg = "/opt/ffmpeg/bin/ffmpeg"

            [logging]
            level = "debug"
            json = true
            "#,
        )
        .unwrap();

        assert_eq!(config.tools.ffmpeg, "/opt/ffmpeg/bin/ffmpeg");
        assert_eq!(config.tools.ffprobe, "ffprobe");
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json);
        assert_eq!(config.reencode, ReencodeConfig::default());
    }

    #[test]
    fn test_reencode_section() {
        let config = AppConfig::from_toml_str(
            r#"
            [reencode.default]
            video_codec = "libx265"
            preset = "medium"
            crf = 24
            audio_codec = "aac"
            "#,
        )
        .unwrap();

        assert_eq!(config.reencode.default.video_codec, "libx265");
        assert_eq!(config.reencode.default.audio_bitrate, None);
        assert_eq!(config.reencode.webm.video_codec, "libvpx-vp9");
    }

    #[test]
    fn test_resolve_source_prefers_explicit_path() {
        let explicit = Path::new("/etc/trimsafe/custom.toml");
        assert_eq!(
            AppConfig::resolve_source(Some(explicit)),
            Some(explicit.to_path_buf())
        );
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let err = AppConfig::load(Some(Path::new("/no/such/trimsafe.toml"))).unwrap_err();
        assert!(matches!(err, TrimSafeError::Config { .. }));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("TRIMSAFE_FFMPEG", "/usr/local/bin/ffmpeg"),
            ("TRIMSAFE_CRF", "23"),
            ("TRIMSAFE_PRESET", "slow"),
        ]
        .into_iter()
        .collect();

        let mut config = AppConfig::default();
        let applied = config
            .apply_env_overrides(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(applied, 3);
        assert_eq!(config.tools.ffmpeg, "/usr/local/bin/ffmpeg");
        assert_eq!(config.reencode.default.crf, 23);
        assert_eq!(config.reencode.default.preset.as_deref(), Some("slow"));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut config = AppConfig::default();
        assert!(config
            .apply_env_overrides(|key| (key == "TRIMSAFE_CRF").then(|| "high".to_string()))
            .is_err());

        let mut config = AppConfig::default();
        config.reencode.default.crf = 60;
        assert!(config.validate().is_err());

        assert!(AppConfig::from_toml_str("[tools\nffmpeg=").is_err());
    }
}
