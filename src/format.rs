//! Clock-style formatting for durations given in seconds.

/// Formats seconds as `HH:MM:SS`. Hours keep growing past 99.
#[must_use]
pub fn format_hms(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

/// Formats seconds as `MM:SS`. Minutes keep growing past 59.
#[must_use]
pub fn format_ms(total_seconds: u32) -> String {
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{:02}:{:02}", minutes, seconds)
}
