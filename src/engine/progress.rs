//! Progress extraction from the transcoder's diagnostic stream

use std::collections::VecDeque;

use crate::ports::ProgressFn;
use crate::utils::time::parse_timestamp;

/// Lower bound for the total duration used as divisor
pub const DURATION_EPSILON: f64 = 1e-3;

/// Splits a byte stream into lines on either `\n` or `\r`.
///
/// ffmpeg rewrites its stats line in place with carriage returns, so a plain
/// newline reader would only see one huge line per run.
#[derive(Debug, Default)]
pub struct ChunkSplitter {
    pending: Vec<u8>,
}

impl ChunkSplitter {
    /// Create an empty splitter
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a chunk, returning every line it completed
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        let mut lines = Vec::new();

        for &byte in chunk {
            if byte == b'\n' || byte == b'\r' {
                self.flush_into(&mut lines);
            } else {
                self.pending.push(byte);
            }
        }

        lines
    }

    /// Return the trailing unterminated line, if any
    pub fn finish(mut self) -> Option<String> {
        let mut lines = Vec::new();
        self.flush_into(&mut lines);
        lines.pop()
    }

    fn flush_into(&mut self, lines: &mut Vec<String>) {
        if self.pending.is_empty() {
            return;
        }
        let line = String::from_utf8_lossy(&self.pending).trim().to_string();
        self.pending.clear();
        if !line.is_empty() {
            lines.push(line);
        }
    }
}

/// Extract the `time=HH:MM:SS(.ms)` value of a stats line, in seconds
pub fn scan_progress_time(line: &str) -> Option<f64> {
    const KEY: &str = "time=";

    // "out_time=" lines from -progress carry the same value; either works
    let idx = line.find(KEY)?;
    let rest = line[idx + KEY.len()..].trim_start();
    let value = rest.split_whitespace().next()?;
    parse_timestamp(value)
}

/// Turns elapsed output time into monotonic ratios for one executor invocation
pub struct ProgressReporter<'a> {
    total_seconds: f64,
    last_ratio: Option<f64>,
    callback: ProgressFn<'a>,
}

impl<'a> ProgressReporter<'a> {
    /// Reporter for a segment of `total_seconds`
    pub fn new(total_seconds: f64, callback: ProgressFn<'a>) -> Self {
        Self {
            total_seconds,
            last_ratio: None,
            callback,
        }
    }

    /// Ratio for an elapsed output time, clamped to `0..=1`
    pub fn ratio_for(&self, elapsed_seconds: f64) -> f64 {
        let ratio = elapsed_seconds / self.total_seconds.max(DURATION_EPSILON);
        if ratio.is_nan() {
            0.0
        } else {
            ratio.clamp(0.0, 1.0)
        }
    }

    /// Report elapsed output time; emits only when the ratio moves forward
    pub fn observe(&mut self, elapsed_seconds: f64) {
        let ratio = self.ratio_for(elapsed_seconds);
        if self.last_ratio.map_or(true, |last| ratio > last) {
            self.last_ratio = Some(ratio);
            (self.callback)(ratio);
        }
    }

    /// Final report after a clean exit
    pub fn complete(&mut self) {
        self.last_ratio = Some(1.0);
        (self.callback)(1.0);
    }
}

/// Keeps the last `capacity` diagnostic lines for failure messages
#[derive(Debug)]
pub struct DiagnosticTail {
    lines: VecDeque<String>,
    capacity: usize,
}

impl DiagnosticTail {
    /// Create a tail keeping at most `capacity` lines
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            lines: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Record a line, dropping the oldest one when full
    pub fn push(&mut self, line: impl Into<String>) {
        if self.lines.len() == self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(line.into());
    }

    /// Captured lines joined with newlines
    pub fn text(&self) -> String {
        self.lines.iter().cloned().collect::<Vec<_>>().join("\n")
    }

    /// Whether nothing was captured
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
