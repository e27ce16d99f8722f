//! Copy / re-encode / smart dispatch on top of the executor

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::model::*;
use crate::domain::rules::validate_range;
use crate::engine::preflight;
use crate::error::TrimSafeResult;
use crate::ports::{ExecutePort, ProgressFn};

/// Applies the requested [`TrimMode`] using an [`ExecutePort`] as the trim primitive
pub struct TrimStrategySelector {
    execute_port: Arc<dyn ExecutePort>,
}

impl TrimStrategySelector {
    /// Create a new selector
    pub fn new(execute_port: Arc<dyn ExecutePort>) -> Self {
        Self { execute_port }
    }

    /// Validate the request, then run one attempt (copy, reencode) or two (smart).
    ///
    /// In smart mode a failed copy is retried exactly once with re-encoding and
    /// only the re-encode outcome is returned. Cancellation is never retried.
    pub async fn trim(
        &self,
        request: &TrimRequest,
        on_progress: ProgressFn<'_>,
    ) -> TrimSafeResult<TrimResult> {
        validate_range(request.start_seconds, request.end_seconds)?;
        preflight::check_source(&request.input_path)?;
        preflight::check_output_distinct(&request.input_path, &request.output_path)?;
        preflight::check_destination_dir(&request.output_path)?;

        info!(
            job_id = %request.job_id,
            mode = %request.mode,
            "Trimming {} [{:.3}s, {:.3}s) -> {}",
            request.input_path.display(),
            request.start_seconds,
            request.end_seconds,
            request.output_path.display()
        );

        match request.mode {
            TrimMode::Copy => self.attempt(request, Strategy::Copy, on_progress).await,
            TrimMode::Reencode => self.attempt(request, Strategy::Reencode, on_progress).await,
            TrimMode::Smart => {
                let copy = self.attempt(request, Strategy::Copy, on_progress).await?;
                if copy.ok {
                    return Ok(copy);
                }

                warn!(
                    job_id = %request.job_id,
                    "Stream copy failed, falling back to re-encode: {}",
                    copy.error.as_deref().unwrap_or("unknown error")
                );
                self.attempt(request, Strategy::Reencode, on_progress).await
            }
        }
    }

    async fn attempt(
        &self,
        request: &TrimRequest,
        strategy: Strategy,
        on_progress: ProgressFn<'_>,
    ) -> TrimSafeResult<TrimResult> {
        let result = self
            .execute_port
            .execute(request, strategy, on_progress)
            .await?;

        if result.ok {
            info!(job_id = %request.job_id, %strategy, "Trim attempt succeeded");
        } else {
            warn!(job_id = %request.job_id, %strategy, "Trim attempt failed");
        }
        Ok(result)
    }
}
