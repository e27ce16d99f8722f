//! End-to-end tests against real ffmpeg/ffprobe binaries
//!
//! Every test returns early when ffmpeg or ffprobe is not on PATH, or when
//! the local ffmpeg cannot produce the H.264 source clip.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::{Arc, Mutex};

use tempfile::TempDir;

use trimsafe::adapters::AppConfig;
use trimsafe::{
    DefaultAppContainer, OverwriteRequest, Strategy, TrimInteractor, TrimMode, TrimRequest,
    TrimSafeError,
};

const SOURCE_SECONDS: u32 = 120;
const SOURCE_FPS: f64 = 25.0;
const KEYFRAME_INTERVAL_FRAMES: u32 = 50;

// Test utilities

fn tools_available() -> bool {
    which::which("ffmpeg").is_ok() && which::which("ffprobe").is_ok()
}

/// Render a synthetic clip with one keyframe every 2 seconds and a sine tone
fn create_test_video(dir: &Path, name: &str) -> Option<PathBuf> {
    let path = dir.join(name);
    let video = format!(
        "testsrc=duration={}:size=160x120:rate={}",
        SOURCE_SECONDS, SOURCE_FPS
    );
    let audio = format!("sine=frequency=440:duration={}", SOURCE_SECONDS);
    let status = Command::new("ffmpeg")
        .args(["-hide_banner", "-loglevel", "error", "-y"])
        .args(["-f", "lavfi", "-i"])
        .arg(&video)
        .args(["-f", "lavfi", "-i"])
        .arg(&audio)
        .args(["-c:v", "libx264", "-preset", "ultrafast", "-pix_fmt", "yuv420p"])
        .arg("-g")
        .arg(KEYFRAME_INTERVAL_FRAMES.to_string())
        .args(["-c:a", "aac", "-shortest"])
        .arg(&path)
        .status()
        .ok()?;

    status.success().then_some(path)
}

fn has_encoders(names: &[&str]) -> bool {
    let Ok(output) = Command::new("ffmpeg")
        .args(["-hide_banner", "-encoders"])
        .output()
    else {
        return false;
    };
    let listing = String::from_utf8_lossy(&output.stdout);
    names.iter().all(|name| {
        listing
            .lines()
            .any(|line| line.split_whitespace().nth(1) == Some(*name))
    })
}

fn interactor() -> Arc<TrimInteractor> {
    DefaultAppContainer::new(&AppConfig::default()).trim_interactor()
}

/// Source clip in a fresh directory, or `None` when the environment can't run these tests
fn setup() -> Option<(TempDir, PathBuf)> {
    if !tools_available() {
        eprintln!("ffmpeg/ffprobe not on PATH, skipping");
        return None;
    }
    let dir = TempDir::new().unwrap();
    match create_test_video(dir.path(), "source.mp4") {
        Some(path) => Some((dir, path)),
        None => {
            eprintln!("could not render H.264 test clip, skipping");
            None
        }
    }
}

fn no_progress() -> impl Fn(f64) + Send + Sync {
    |_| {}
}

// Video + audio stream lengths differ by up to an AAC frame
const DURATION_TOLERANCE: f64 = 1.0 / SOURCE_FPS + 0.06;

#[tokio::test]
async fn test_probe_reports_source_metadata() {
    let Some((_dir, source)) = setup() else { return };

    let probe = interactor().probe_video(&source).await.unwrap();

    assert!((probe.duration_seconds - SOURCE_SECONDS as f64).abs() < 0.5);
    assert_eq!((probe.width, probe.height), (160, 120));
    assert!(probe.format.contains("mp4"));
    let fps = probe.frame_rate_hint.unwrap();
    assert!((fps - SOURCE_FPS).abs() < 0.01);
}

#[tokio::test]
async fn test_reencode_is_frame_accurate() {
    let Some((dir, source)) = setup() else { return };
    let interactor = interactor();
    let output = dir.path().join("cut.mp4");

    let ratios = Mutex::new(Vec::new());
    let sink = |ratio: f64| ratios.lock().unwrap().push(ratio);
    let request = TrimRequest::new("reencode", &source, &output, 10.0, 20.0, TrimMode::Reencode);
    let result = interactor.trim_video(&request, &sink).await.unwrap();

    assert!(result.ok, "trim failed: {:?}", result.error);
    assert_eq!(result.used_mode, Strategy::Reencode);

    let probe = interactor.probe_video(&output).await.unwrap();
    assert!(
        (probe.duration_seconds - 10.0).abs() <= DURATION_TOLERANCE,
        "duration {}",
        probe.duration_seconds
    );

    let ratios = ratios.lock().unwrap();
    assert_eq!(ratios.last().copied(), Some(1.0));
    assert!(ratios.windows(2).all(|w| w[0] <= w[1]));
    assert!(ratios.iter().all(|r| (0.0..=1.0).contains(r)));
}

#[tokio::test]
async fn test_smart_copy_success_is_keyframe_bounded() {
    let Some((dir, source)) = setup() else { return };
    let interactor = interactor();
    let output = dir.path().join("smart.mp4");

    let request = TrimRequest::new("smart", &source, &output, 10.0, 20.0, TrimMode::Smart);
    let result = interactor.trim_video(&request, &no_progress()).await.unwrap();

    assert!(result.ok, "trim failed: {:?}", result.error);
    assert_eq!(result.used_mode, Strategy::Copy);

    // Copy starts at the keyframe at or before `start`; keyframes sit every GOP
    let probe = interactor.probe_video(&output).await.unwrap();
    let gop = KEYFRAME_INTERVAL_FRAMES as f64 / SOURCE_FPS;
    assert!(
        probe.duration_seconds >= 10.0 - DURATION_TOLERANCE
            && probe.duration_seconds <= 10.0 + gop + DURATION_TOLERANCE,
        "duration {}",
        probe.duration_seconds
    );
}

#[tokio::test]
async fn test_smart_fallback_is_frame_accurate() {
    let Some((dir, source)) = setup() else { return };
    if !has_encoders(&["libvpx-vp9", "libopus"]) {
        eprintln!("ffmpeg lacks libvpx-vp9/libopus, skipping");
        return;
    }
    let interactor = interactor();
    // H.264/AAC cannot be stream-copied into WebM, so the copy attempt fails
    let output = dir.path().join("smart.webm");

    let request = TrimRequest::new("fallback", &source, &output, 10.0, 20.0, TrimMode::Smart);
    let result = interactor.trim_video(&request, &no_progress()).await.unwrap();

    assert!(result.ok, "trim failed: {:?}", result.error);
    assert_eq!(result.used_mode, Strategy::Reencode);

    let probe = interactor.probe_video(&output).await.unwrap();
    assert!(
        (probe.duration_seconds - 10.0).abs() <= DURATION_TOLERANCE,
        "duration {}",
        probe.duration_seconds
    );
}

#[tokio::test]
async fn test_smart_on_corrupt_input_reports_reencode_failure() {
    let Some((dir, _source)) = setup() else { return };
    let broken = dir.path().join("broken.mp4");
    fs::write(&broken, vec![0u8; 4096]).unwrap();
    let output = dir.path().join("out.mp4");

    let request = TrimRequest::new("broken", &broken, &output, 0.0, 1.0, TrimMode::Smart);
    let result = interactor().trim_video(&request, &no_progress()).await.unwrap();

    assert!(!result.ok);
    assert_eq!(result.used_mode, Strategy::Reencode);
    assert!(!result.error.unwrap_or_default().trim().is_empty());
}

#[tokio::test]
async fn test_overwrite_in_place() {
    let Some((dir, source)) = setup() else { return };
    let interactor = interactor();

    let request = OverwriteRequest::new("inplace", &source, 5.0, 15.0, TrimMode::Reencode);
    let result = interactor.overwrite_video(&request, &no_progress()).await.unwrap();

    assert!(result.ok);
    assert_eq!(result.output_path, source);

    let probe = interactor.probe_video(&source).await.unwrap();
    assert!((probe.duration_seconds - 10.0).abs() <= DURATION_TOLERANCE);

    let names: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(names, vec!["source.mp4"]);
}

#[tokio::test]
async fn test_missing_ffmpeg_is_tool_error() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in.mp4");
    fs::write(&input, b"not really a video").unwrap();

    let mut config = AppConfig::default();
    config.tools.ffmpeg = "trimsafe-no-such-ffmpeg".to_string();
    config.tools.ffprobe = "trimsafe-no-such-ffprobe".to_string();
    let interactor = DefaultAppContainer::new(&config).trim_interactor();

    let request = TrimRequest::new("j", &input, dir.path().join("out.mp4"), 0.0, 1.0, TrimMode::Smart);
    let err = interactor.trim_video(&request, &no_progress()).await.unwrap_err();
    assert!(matches!(err, TrimSafeError::ToolNotFound { tool: "ffmpeg", .. }));

    let err = interactor.probe_video(&input).await.unwrap_err();
    assert!(matches!(err, TrimSafeError::ToolNotFound { tool: "ffprobe", .. }));
}
