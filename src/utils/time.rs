//! Time parsing and formatting utilities

/// Format seconds as `HH:MM:SS.mmm`, clamping negatives to zero
pub fn format_timestamp(seconds: f64) -> String {
    let seconds = if seconds.is_finite() { seconds.max(0.0) } else { 0.0 };
    let total_ms = (seconds * 1000.0).round() as u64;

    let hours = total_ms / 3_600_000;
    let minutes = (total_ms % 3_600_000) / 60_000;
    let secs = (total_ms % 60_000) / 1000;
    let millis = total_ms % 1000;

    format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, secs, millis)
}

/// Parse an `HH:MM:SS` or `HH:MM:SS.fraction` timestamp into seconds
pub fn parse_timestamp(value: &str) -> Option<f64> {
    let mut parts = value.trim().split(':');
    let hours: f64 = parts.next()?.parse().ok()?;
    let minutes: f64 = parts.next()?.parse().ok()?;
    let seconds: f64 = parts.next()?.parse().ok()?;

    if parts.next().is_some() {
        return None;
    }

    let total = hours.abs() * 3600.0 + minutes * 60.0 + seconds;
    if !total.is_finite() {
        return None;
    }

    // ffmpeg reports slightly negative times like -00:00:00.04 at stream start
    if value.trim_start().starts_with('-') {
        Some(-total)
    } else {
        Some(total)
    }
}
