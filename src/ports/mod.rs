// Ports - Interface definitions (contracts)

use std::path::Path;

use async_trait::async_trait;

use crate::domain::model::*;
use crate::error::TrimSafeResult;

/// Progress sink for one executor invocation; receives ratios in `0..=1`.
///
/// Called on the task reading the tool's output, so it must not block.
pub type ProgressFn<'a> = &'a (dyn Fn(f64) + Send + Sync);

/// Port for media file probing
#[async_trait]
pub trait ProbePort: Send + Sync {
    /// Probe media file metadata. Never retries.
    async fn probe(&self, path: &Path) -> TrimSafeResult<VideoProbeResult>;
}

/// Port for a single trim attempt with a fixed strategy
#[async_trait]
pub trait ExecutePort: Send + Sync {
    /// Extract `[start, end)` of the request's input into its output path.
    ///
    /// A non-zero tool exit is an `Ok` result with `ok == false`; `Err` is
    /// reserved for spawn failures and cancellation.
    async fn execute(
        &self,
        request: &TrimRequest,
        strategy: Strategy,
        on_progress: ProgressFn<'_>,
    ) -> TrimSafeResult<TrimResult>;
}

/// Port for the file mutations of the overwrite sequence
#[async_trait]
pub trait FsPort: Send + Sync {
    /// Check if a file exists
    async fn exists(&self, path: &Path) -> bool;

    /// Rename within one filesystem
    async fn rename(&self, from: &Path, to: &Path) -> std::io::Result<()>;

    /// Delete a file
    async fn remove_file(&self, path: &Path) -> std::io::Result<()>;
}
