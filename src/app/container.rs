use std::sync::Arc;

use tokio::sync::watch;

use crate::adapters::{AppConfig, FfmpegExecutor, FfprobeAdapter, LocalFsAdapter};
use crate::app::trim_interactor::TrimInteractor;
use crate::ports::{ExecutePort, FsPort, ProbePort};

/// Wires the default adapters into the interactor
pub struct DefaultAppContainer {
    trim_interactor: Arc<TrimInteractor>,
}

impl DefaultAppContainer {
    pub fn new(config: &AppConfig) -> Self {
        Self::build(config, None)
    }

    /// Same as [`DefaultAppContainer::new`], with running ffmpeg processes
    /// killed once `cancel_rx` turns `true`
    pub fn with_cancel(config: &AppConfig, cancel_rx: watch::Receiver<bool>) -> Self {
        Self::build(config, Some(cancel_rx))
    }

    fn build(config: &AppConfig, cancel_rx: Option<watch::Receiver<bool>>) -> Self {
        let probe_port = Arc::new(FfprobeAdapter::new(config.tools.ffprobe.clone()));

        let mut executor = FfmpegExecutor::new(config.tools.ffmpeg.clone(), config.reencode.clone())
            .with_tail_lines(config.execution.diagnostic_tail_lines);
        if let Some(rx) = cancel_rx {
            executor = executor.with_cancel(rx);
        }
        let execute_port = Arc::new(executor);
        let fs_port = Arc::new(LocalFsAdapter::new());

        let trim_interactor = Arc::new(TrimInteractor::new(
            probe_port as Arc<dyn ProbePort>,
            execute_port as Arc<dyn ExecutePort>,
            fs_port as Arc<dyn FsPort>,
        ));

        Self { trim_interactor }
    }

    pub fn trim_interactor(&self) -> Arc<TrimInteractor> {
        Arc::clone(&self.trim_interactor)
    }
}
