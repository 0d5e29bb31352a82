//! Rendering of the human-readable status lines written through the sink.
//!
//! The line formats are a fixed contract: callers chain operations by tag
//! and scrape these lines in notebooks and logs, so content (not just
//! presence) matters.

/// Convert a relative duration in seconds into a short human-readable form.
///
/// `None` renders as `-`. Otherwise the representation is picked by
/// magnitude: `999ms` (unless `no_ms` suppresses the millisecond form),
/// `99.9s`, `59:59m`, or `99:59:59h`. Negative durations keep their sign on
/// the leading component.
pub fn human_duration(seconds: Option<f64>, no_ms: bool) -> String {
    let Some(seconds) = seconds else {
        return "-".to_string();
    };

    let milliseconds = (seconds * 1000.0) as i64;
    if milliseconds.abs() < 1000 && !no_ms {
        return format!("{}ms", milliseconds);
    }

    if seconds.abs() < 100.0 {
        return format!("{:.1}s", seconds);
    }

    let minutes = (seconds / 60.0) as i64;
    let rem_seconds = (seconds - minutes as f64 * 60.0).abs() as i64;
    if minutes.abs() < 60 {
        return format!("{}:{:02}m", minutes, rem_seconds);
    }

    let hours = minutes / 60;
    let rem_minutes = (minutes - hours * 60).abs();
    format!("{}:{:02}:{:02}h", hours, rem_minutes, rem_seconds)
}

/// Line written before processing begins.
pub fn start_line(tag: &str, total: usize, workers: usize) -> String {
    format!("{}: Start processing {} items with {} processes...", tag, total, workers)
}

/// Line written while processing: counts, percentage, average time per item
/// so far, and an estimate of the remaining time. Counts are right-aligned
/// to the digit width of `total` so consecutive updates line up.
pub fn progress_line(tag: &str, processed: usize, total: usize, elapsed_secs: f64) -> String {
    let digits = total.max(1).to_string().len();

    let avg = if processed > 0 { Some(elapsed_secs / processed as f64) } else { None };
    let percent = if total > 0 { 100.0 * processed as f64 / total as f64 } else { 0.0 };
    let remaining = match avg {
        Some(a) if a != 0.0 => Some(a * total.saturating_sub(processed) as f64),
        _ => None,
    };

    format!(
        "{}: {:>width$}/{:>width$}, {:4.1}% (avg: {}, rem: {})",
        tag,
        processed,
        total,
        percent,
        human_duration(avg, false),
        human_duration(remaining, true),
        width = digits,
    )
}

/// Line written after processing finished.
pub fn finish_line(tag: &str, total: usize, elapsed_secs: f64) -> String {
    let avg = if total > 0 { Some(elapsed_secs / total as f64) } else { None };
    format!(
        "{}: Finished processing {} items in {} (avg: {})",
        tag,
        total,
        human_duration(Some(elapsed_secs), true),
        human_duration(avg, false),
    )
}

/// Line written instead of all others when the input is empty.
pub fn skip_line(tag: &str) -> String {
    format!("{}: skipping because of empty input", tag)
}
