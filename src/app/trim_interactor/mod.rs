// Trim interactor - Public operation surface of the engine

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::info;

use crate::domain::model::*;
use crate::engine::{OverwriteCoordinator, TrimStrategySelector};
use crate::error::TrimSafeResult;
use crate::ports::*;
use crate::utils::path;

/// Probe, suggest, trim and overwrite. Holds no state between calls.
pub struct TrimInteractor {
    probe_port: Arc<dyn ProbePort>,
    selector: Arc<TrimStrategySelector>,
    coordinator: OverwriteCoordinator,
}

impl TrimInteractor {
    /// Create new trim interactor with injected ports
    pub fn new(
        probe_port: Arc<dyn ProbePort>,
        execute_port: Arc<dyn ExecutePort>,
        fs_port: Arc<dyn FsPort>,
    ) -> Self {
        let selector = Arc::new(TrimStrategySelector::new(execute_port));
        let coordinator = OverwriteCoordinator::new(Arc::clone(&selector), fs_port);

        Self {
            probe_port,
            selector,
            coordinator,
        }
    }

    /// Inspect a media file
    pub async fn probe_video(&self, path: &Path) -> TrimSafeResult<VideoProbeResult> {
        let probe = self.probe_port.probe(path).await?;
        info!(
            "Probed {}: {:.3}s, {}x{}, {}",
            path.display(),
            probe.duration_seconds,
            probe.width,
            probe.height,
            probe.format
        );
        Ok(probe)
    }

    /// Default output name for a trim of `input_path`
    pub fn suggest_output_path(&self, input_path: &Path) -> PathBuf {
        path::suggest_output_path(input_path)
    }

    /// Trim into `request.output_path`
    pub async fn trim_video(
        &self,
        request: &TrimRequest,
        on_progress: ProgressFn<'_>,
    ) -> TrimSafeResult<TrimResult> {
        self.selector.trim(request, on_progress).await
    }

    /// Replace `request.input_path` with its trimmed segment
    pub async fn overwrite_video(
        &self,
        request: &OverwriteRequest,
        on_progress: ProgressFn<'_>,
    ) -> TrimSafeResult<TrimResult> {
        self.coordinator.overwrite(request, on_progress).await
    }
}
