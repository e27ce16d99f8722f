// Unit tests for domain models

use super::*;

#[test]
fn test_time_spec_parse_seconds() {
    assert_eq!(TimeSpec::parse("90.5").unwrap().as_seconds(), 90.5);
    assert_eq!(TimeSpec::parse(" 0 ").unwrap().as_seconds(), 0.0);
}

#[test]
fn test_time_spec_parse_minutes_seconds() {
    assert_eq!(TimeSpec::parse("01:30").unwrap().as_seconds(), 90.0);
    assert_eq!(TimeSpec::parse("1:30.5").unwrap().as_seconds(), 90.5);
}

#[test]
fn test_time_spec_parse_hours() {
    let parsed = TimeSpec::parse("1:02:03.250").unwrap();
    assert!((parsed.as_seconds() - 3723.25).abs() < 1e-9);
}

#[test]
fn test_time_spec_rejects_garbage() {
    assert!(TimeSpec::parse("-5").is_err());
    assert!(TimeSpec::parse("abc").is_err());
    assert!(TimeSpec::parse("1:75").is_err());
    assert!(TimeSpec::parse("1:60:00").is_err());
    assert!(TimeSpec::parse("1:2:3:4").is_err());
}

#[test]
fn test_time_spec_display() {
    assert_eq!(TimeSpec::from_seconds(3723.25).to_string(), "01:02:03.250");
}

#[test]
fn test_trim_mode_parse() {
    assert_eq!(TrimMode::parse("copy").unwrap(), TrimMode::Copy);
    assert_eq!(TrimMode::parse("ReEncode").unwrap(), TrimMode::Reencode);
    assert_eq!(TrimMode::parse("smart").unwrap(), TrimMode::Smart);
    assert!(matches!(
        TrimMode::parse("hybrid"),
        Err(TrimSafeError::InvalidMode { .. })
    ));
}

#[test]
fn test_overwrite_request_to_trim_request() {
    let request = OverwriteRequest::new("job-1", "/media/a.mp4", 1.0, 4.0, TrimMode::Smart);
    let trim = request.to_trim_request(Path::new("/media/a.trim-job-1.mp4"));

    assert_eq!(trim.job_id, "job-1");
    assert_eq!(trim.input_path, PathBuf::from("/media/a.mp4"));
    assert_eq!(trim.output_path, PathBuf::from("/media/a.trim-job-1.mp4"));
    assert_eq!(trim.segment_duration(), 3.0);
    assert_eq!(trim.mode, TrimMode::Smart);
}

#[test]
fn test_trim_result_serializes_camel_case() {
    let result = TrimResult::failure("/out.mp4", Strategy::Copy, "boom");
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["ok"], false);
    assert_eq!(json["usedMode"], "copy");
    assert_eq!(json["outputPath"], "/out.mp4");
    assert_eq!(json["error"], "boom");

    let success = serde_json::to_value(TrimResult::success("/out.mp4", Strategy::Reencode)).unwrap();
    assert!(success.get("error").is_none());
}

#[test]
fn test_probe_result_frame_interval() {
    let probe = VideoProbeResult {
        duration_seconds: 10.0,
        width: 1920,
        height: 1080,
        format: "mov,mp4,m4a,3gp,3g2,mj2".to_string(),
        frame_rate_hint: Some(25.0),
    };
    assert!((probe.frame_interval().unwrap() - 0.04).abs() < 1e-9);
}
