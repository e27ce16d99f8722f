//! FFmpeg execution adapter
//!
//! One [`ExecutePort::execute`] call is one ffmpeg process. Stats lines on
//! stderr drive progress; the remaining diagnostic lines are kept as the
//! failure message.

use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::AsyncReadExt;
use tokio::process::Command;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::adapters::resolve_tool;
use crate::domain::model::*;
use crate::engine::progress::{scan_progress_time, ChunkSplitter, DiagnosticTail, ProgressReporter};
use crate::engine::ReencodeConfig;
use crate::error::{TrimSafeError, TrimSafeResult};
use crate::ports::*;
use crate::utils::time::format_timestamp;

/// Default number of diagnostic lines kept for failure messages
pub const DEFAULT_TAIL_LINES: usize = 40;

/// FFmpeg-based execution adapter
pub struct FfmpegExecutor {
    binary: String,
    reencode: ReencodeConfig,
    tail_lines: usize,
    cancel_rx: Option<watch::Receiver<bool>>,
}

impl FfmpegExecutor {
    /// Create new FFmpeg executor for the given binary name or path
    pub fn new(binary: impl Into<String>, reencode: ReencodeConfig) -> Self {
        Self {
            binary: binary.into(),
            reencode,
            tail_lines: DEFAULT_TAIL_LINES,
            cancel_rx: None,
        }
    }

    /// Keep `lines` diagnostic lines for failure messages
    pub fn with_tail_lines(mut self, lines: usize) -> Self {
        self.tail_lines = lines;
        self
    }

    /// Kill the running process once the flag turns `true`
    pub fn with_cancel(mut self, cancel_rx: watch::Receiver<bool>) -> Self {
        self.cancel_rx = Some(cancel_rx);
        self
    }

    /// Build the ffmpeg arguments for one attempt
    pub fn build_args(&self, request: &TrimRequest, strategy: Strategy) -> Vec<String> {
        let mut args: Vec<String> = vec![
            "-hide_banner".to_string(),
            "-nostdin".to_string(),
            "-y".to_string(),
            // Window before -i: input seeking
            "-ss".to_string(),
            format_timestamp(request.start_seconds),
            "-to".to_string(),
            format_timestamp(request.end_seconds),
            "-i".to_string(),
            request.input_path.to_string_lossy().to_string(),
        ];

        match strategy {
            Strategy::Copy => {
                args.extend(
                    ["-c", "copy", "-avoid_negative_ts", "make_zero"]
                        .iter()
                        .map(|s| s.to_string()),
                );
            }
            Strategy::Reencode => {
                args.extend(self.reencode.profile_for(&request.output_path).to_args());
            }
        }

        args.push(request.output_path.to_string_lossy().to_string());
        args
    }

    fn is_cancelled(&self) -> bool {
        self.cancel_rx
            .as_ref()
            .map(|rx| *rx.borrow())
            .unwrap_or(false)
    }
}

/// Resolves once the cancel flag is set; never resolves without a receiver
async fn cancelled(cancel_rx: &mut Option<watch::Receiver<bool>>) {
    match cancel_rx {
        Some(rx) => loop {
            if *rx.borrow_and_update() {
                return;
            }
            if rx.changed().await.is_err() {
                // Sender gone, nobody can cancel anymore
                std::future::pending::<()>().await;
            }
        },
        None => std::future::pending::<()>().await,
    }
}

#[async_trait]
impl ExecutePort for FfmpegExecutor {
    async fn execute(
        &self,
        request: &TrimRequest,
        strategy: Strategy,
        on_progress: ProgressFn<'_>,
    ) -> TrimSafeResult<TrimResult> {
        if self.is_cancelled() {
            return Err(TrimSafeError::Cancelled);
        }

        let program = resolve_tool("ffmpeg", &self.binary)?;
        let args = self.build_args(request, strategy);
        debug!(job_id = %request.job_id, "Running FFmpeg: {} {}", program.display(), args.join(" "));

        let mut child = Command::new(&program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| TrimSafeError::ToolSpawn {
                tool: "ffmpeg",
                source,
            })?;

        let mut stderr = child.stderr.take().ok_or_else(|| {
            TrimSafeError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "ffmpeg stderr not captured",
            ))
        })?;

        let mut reporter = ProgressReporter::new(request.segment_duration(), on_progress);
        let mut tail = DiagnosticTail::new(self.tail_lines);
        let mut splitter = ChunkSplitter::new();
        let mut cancel_rx = self.cancel_rx.clone();
        let mut buf = [0u8; 4096];

        let mut handle_line = |line: String| match scan_progress_time(&line) {
            Some(elapsed) => reporter.observe(elapsed),
            None => tail.push(line),
        };

        loop {
            tokio::select! {
                read = stderr.read(&mut buf) => {
                    let n = read?;
                    if n == 0 {
                        break;
                    }
                    for line in splitter.push(&buf[..n]) {
                        handle_line(line);
                    }
                }
                _ = cancelled(&mut cancel_rx) => {
                    info!(job_id = %request.job_id, "Cancellation requested, killing ffmpeg");
                    if let Err(e) = child.kill().await {
                        warn!("Failed to kill ffmpeg: {}", e);
                    }
                    return Err(TrimSafeError::Cancelled);
                }
            }
        }
        if let Some(line) = splitter.finish() {
            handle_line(line);
        }
        drop(handle_line);

        let status = child.wait().await?;
        if self.is_cancelled() {
            return Err(TrimSafeError::Cancelled);
        }

        if status.success() {
            reporter.complete();
            debug!(job_id = %request.job_id, %strategy, "FFmpeg finished");
            return Ok(TrimResult::success(request.output_path.clone(), strategy));
        }

        let message = if tail.is_empty() {
            format!("ffmpeg exited with {}", status)
        } else {
            tail.text()
        };
        warn!(job_id = %request.job_id, %strategy, "FFmpeg exited with {}", status);
        Ok(TrimResult::failure(request.output_path.clone(), strategy, message))
    }
}
