//! Date/time utilities for chatrelay.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// Clock format used when rendering chat lines.
pub const CLOCK_FORMAT: &str = "%H:%M:%S";

/// Format a DateTime<Utc> to the specified timezone.
///
/// Falls back to UTC when the timezone name is not recognised.
pub fn format_utc_datetime(dt: &DateTime<Utc>, timezone: &str, format: &str) -> String {
    let tz: Tz = match timezone.parse() {
        Ok(tz) => tz,
        Err(_) => return dt.format(format).to_string(),
    };
    dt.with_timezone(&tz).format(format).to_string()
}

/// Format a timestamp as `HH:MM:SS` in the given timezone.
pub fn format_clock(dt: &DateTime<Utc>, timezone: &str) -> String {
    format_utc_datetime(dt, timezone, CLOCK_FORMAT)
}
