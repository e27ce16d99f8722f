//! Configuration initialization and hierarchy management

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::adapters::AppConfig;
use crate::cli::Cli;

/// Effective configuration plus where its overrides came from
#[derive(Debug)]
pub struct InitializedConfig {
    pub config: AppConfig,
    /// File the settings were read from, `None` for built-in defaults
    pub source: Option<PathBuf>,
    pub env_overrides: usize,
    pub cli_overrides: usize,
}

impl InitializedConfig {
    /// Report the override counts; call once logging is installed
    pub fn log_summary(&self) {
        match &self.source {
            Some(path) => info!("Loaded configuration from: {}", path.display()),
            None => debug!("No config file found, using defaults"),
        }
        if self.env_overrides > 0 {
            info!("Applied {} environment variable overrides", self.env_overrides);
        }
        if self.cli_overrides > 0 {
            info!("Applied {} CLI configuration overrides", self.cli_overrides);
        }
    }
}

/// Initialize configuration hierarchy following precedence: CLI > Env > File > Defaults
///
/// Runs before the subscriber exists, so anything worth reporting is carried
/// back in [`InitializedConfig`].
pub fn initialize_configuration(cli: &Cli) -> Result<InitializedConfig> {
    let source = AppConfig::resolve_source(cli.config.as_deref());
    let mut config =
        AppConfig::load(source.as_deref()).context("Failed to load configuration file")?;

    let env_overrides = config
        .apply_env_overrides(|key| std::env::var(key).ok())
        .context("Invalid environment override")?;

    let cli_overrides = apply_cli_overrides(&mut config, cli);

    config.validate()?;

    Ok(InitializedConfig {
        config,
        source,
        env_overrides,
        cli_overrides,
    })
}

/// Apply global CLI flags on top of `config`
fn apply_cli_overrides(config: &mut AppConfig, cli: &Cli) -> usize {
    let mut applied = 0;

    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
        applied += 1;
    }
    if cli.log_json {
        config.logging.json = true;
        applied += 1;
    }
    if let Some(ffmpeg) = &cli.ffmpeg {
        config.tools.ffmpeg = ffmpeg.clone();
        applied += 1;
    }
    if let Some(ffprobe) = &cli.ffprobe {
        config.tools.ffprobe = ffprobe.clone();
        applied += 1;
    }

    applied
}
