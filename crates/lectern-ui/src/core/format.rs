//! Human-readable time labels for the player and course summaries.

/// Render `seconds` as `m:ss`, or `h:mm:ss` from one hour up.
///
/// Zero, negative and non-finite inputs render as `0:00`.
#[must_use]
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds <= 0.0 {
        return "0:00".to_string();
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let total = seconds.floor() as u64;
    clock_label(total)
}

/// Render a whole-second duration as a compact label such as `2h 05m` or `14m`.
#[must_use]
pub fn duration_label(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    if hours > 0 {
        format!("{hours}h {minutes:02}m")
    } else if minutes > 0 {
        format!("{minutes}m")
    } else {
        format!("{total_seconds}s")
    }
}

/// `current / total` label for the player's time readout.
#[must_use]
pub fn progress_label(current: f64, total: f64) -> String {
    format!("{} / {}", format_time(current), format_time(total))
}

fn clock_label(total: u64) -> String {
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;
    if hours > 0 {
        format!("{hours}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes}:{secs:02}")
    }
}
