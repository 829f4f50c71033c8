//! Duration formatting for display.

/// Formats whole minutes as `MM:00`.
pub fn minutes_to_duration(minutes: u32) -> String {
    format!("{minutes:02}:00")
}

/// Formats seconds as `MM:SS`. Hours roll into the minutes column.
pub fn seconds_to_duration(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
