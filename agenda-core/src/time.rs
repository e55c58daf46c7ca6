//! Clock helpers: minute offsets <-> `HH:MM`.

use chrono::{NaiveTime, Timelike};

use crate::error::SchedulerError;
use crate::task::Minute;

/// Parse `"HH:MM"` (or a bare minute count like `"480"`) into minutes.
pub fn parse_clock(input: &str) -> Result<Minute, SchedulerError> {
    let s = input.trim();
    if let Ok(minutes) = s.parse::<Minute>() {
        return Ok(minutes);
    }
    let t = NaiveTime::parse_from_str(s, "%H:%M").map_err(|_| SchedulerError::InvalidClock {
        input: input.to_string(),
    })?;
    Ok((t.hour() * 60 + t.minute()) as Minute)
}

/// Format minutes as `HH:MM`. Hours are not wrapped past midnight.
pub fn format_clock(minutes: Minute) -> String {
    let sign = if minutes < 0 { "-" } else { "" };
    let m = minutes.abs();
    format!("{sign}{:02}:{:02}", m / 60, m % 60)
}

/// Format a duration as `"<h>h <mm>min"`.
pub fn format_span(minutes: Minute) -> String {
    format!("{}h {:02}min", minutes / 60, minutes % 60)
}
