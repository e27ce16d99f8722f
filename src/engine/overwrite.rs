//! In-place trim: trim to a temp file, then swap it with the original.
//!
//! Ordering is strict:
//!
//! 1. validate input, range and the input's directory
//! 2. pick a free temp path `name.trim-<job>.ext` next to the input
//! 3. pick a free backup path `<input>.bak`
//! 4. trim into the temp path; on failure nothing but the temp file was touched
//! 5. rename original -> backup
//! 6. rename temp -> original
//! 7. delete the backup (best-effort)
//!
//! If step 6 fails the backup is renamed back and the temp file removed. If
//! that rename fails as well, the error names the backup path so the media can
//! be recovered by hand. Renames assume temp, backup and input share one
//! filesystem, which holds because all three live in the same directory.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{error, info, warn};

use crate::domain::model::*;
use crate::domain::rules::{sanitize_job_id, validate_range};
use crate::engine::preflight;
use crate::engine::strategy::TrimStrategySelector;
use crate::error::{TrimSafeError, TrimSafeResult};
use crate::ports::{FsPort, ProgressFn};
use crate::utils::path::{backup_candidate, find_available_output_path, temp_output_candidate};

/// Replaces a file with a trimmed version of itself
pub struct OverwriteCoordinator {
    selector: Arc<TrimStrategySelector>,
    fs_port: Arc<dyn FsPort>,
}

/// Transient paths of one overwrite job
#[derive(Debug, Clone, PartialEq)]
pub struct OverwritePaths {
    pub temp: PathBuf,
    pub backup: PathBuf,
}

impl OverwritePaths {
    /// Resolve collision-free temp and backup paths for `input_path`
    pub fn resolve(input_path: &Path, job_id: &str) -> Self {
        let job = sanitize_job_id(job_id);
        Self {
            temp: find_available_output_path(&temp_output_candidate(input_path, &job)),
            backup: find_available_output_path(&backup_candidate(input_path)),
        }
    }
}

impl OverwriteCoordinator {
    /// Create a new coordinator
    pub fn new(selector: Arc<TrimStrategySelector>, fs_port: Arc<dyn FsPort>) -> Self {
        Self { selector, fs_port }
    }

    /// Trim `request.input_path` in place
    pub async fn overwrite(
        &self,
        request: &OverwriteRequest,
        on_progress: ProgressFn<'_>,
    ) -> TrimSafeResult<TrimResult> {
        let input = &request.input_path;

        validate_range(request.start_seconds, request.end_seconds)?;
        preflight::check_source(input)?;
        preflight::check_destination_dir(input)?;

        let paths = OverwritePaths::resolve(input, &request.job_id);
        info!(
            job_id = %request.job_id,
            temp = %paths.temp.display(),
            backup = %paths.backup.display(),
            "Starting in-place trim of {}",
            input.display()
        );

        let trim_request = request.to_trim_request(&paths.temp);
        let result = match self.selector.trim(&trim_request, on_progress).await {
            Ok(result) => result,
            Err(e) => {
                self.discard(&paths.temp).await;
                return Err(e);
            }
        };

        if !result.ok {
            self.discard(&paths.temp).await;
            return Ok(TrimResult {
                output_path: input.clone(),
                ..result
            });
        }

        if let Err(e) = self.fs_port.rename(input, &paths.backup).await {
            self.discard(&paths.temp).await;
            return Err(TrimSafeError::OverwriteAborted {
                input: input.clone(),
                message: format!(
                    "could not move original to {}: {}",
                    paths.backup.display(),
                    e
                ),
            });
        }
        info!(job_id = %request.job_id, "Original moved to {}", paths.backup.display());

        if let Err(e) = self.fs_port.rename(&paths.temp, input).await {
            return Err(self.roll_back(input, &paths, e).await);
        }
        info!(job_id = %request.job_id, "Trimmed file placed at {}", input.display());

        if let Err(e) = self.fs_port.remove_file(&paths.backup).await {
            warn!(
                job_id = %request.job_id,
                "Could not delete backup {}: {}",
                paths.backup.display(),
                e
            );
        }

        Ok(TrimResult::success(input.clone(), result.used_mode))
    }

    /// Restore the original after the temp -> input rename failed
    async fn roll_back(
        &self,
        input: &Path,
        paths: &OverwritePaths,
        cause: std::io::Error,
    ) -> TrimSafeError {
        error!(
            "Could not move {} to {}: {}; restoring original",
            paths.temp.display(),
            input.display(),
            cause
        );

        match self.fs_port.rename(&paths.backup, input).await {
            Ok(()) => {
                self.discard(&paths.temp).await;
                TrimSafeError::OverwriteAborted {
                    input: input.to_path_buf(),
                    message: format!("could not replace original: {}", cause),
                }
            }
            Err(restore) => {
                error!(
                    "Rollback failed, original remains at {}: {}",
                    paths.backup.display(),
                    restore
                );
                TrimSafeError::OverwriteInconsistent {
                    input: input.to_path_buf(),
                    backup: paths.backup.clone(),
                    message: format!(
                        "could not replace original ({}); restoring it failed ({}); trimmed copy left at {}",
                        cause,
                        restore,
                        paths.temp.display()
                    ),
                }
            }
        }
    }

    /// Best-effort removal of a file this job created
    async fn discard(&self, path: &Path) {
        if !self.fs_port.exists(path).await {
            return;
        }
        if let Err(e) = self.fs_port.remove_file(path).await {
            warn!("Could not remove temporary file {}: {}", path.display(), e);
        }
    }
}
