// src/schedule/time.rs
//! Weekday codes and minute-of-day windows.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::ConstraintError;

/// Last minute of the day (23:59).
pub const LAST_MINUTE: u16 = 24 * 60 - 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Weekday {
    Monday,
    Wednesday,
    Friday,
    Tuesday,
    Thursday,
}

impl Weekday {
    pub const ALL: [Weekday; 5] = [
        Weekday::Monday,
        Weekday::Wednesday,
        Weekday::Friday,
        Weekday::Tuesday,
        Weekday::Thursday,
    ];

    const CODES: [&'static str; 5] = ["Mo", "We", "Fr", "Tu", "Th"];

    /// Two-letter code used by the outlines backend (`Mo`, `Tu`, ...).
    pub fn code(self) -> &'static str {
        Self::CODES[self as usize]
    }

    pub fn from_code(code: &str) -> Result<Self, ConstraintError> {
        Self::CODES
            .iter()
            .position(|c| *c == code)
            .map(|i| Self::ALL[i])
            .ok_or_else(|| ConstraintError::UnknownWeekday(s!(code)))
    }

    /// True if `days` (e.g. `"MoWeFr"` or `"Mo, We"`) mentions this weekday.
    pub fn is_in(self, days: &str) -> bool {
        days.contains(self.code())
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Parse `H:MM` / `HH:MM` into minutes since midnight.
pub fn parse_time(s: &str) -> Result<u16, ConstraintError> {
    let malformed = || ConstraintError::MalformedTime(s!(s));

    let (h, m) = s.split_once(':').ok_or_else(malformed)?;
    let h: u16 = h.trim().parse().map_err(|_| malformed())?;
    let m: u16 = m.trim().parse().map_err(|_| malformed())?;
    if h > 23 || m > 59 {
        return Err(malformed());
    }
    Ok(60 * h + m)
}

/// Render minutes since midnight as `H:MM`.
pub fn format_time(minutes: u16) -> String {
    format!("{}:{:02}", minutes / 60, minutes % 60)
}

/// Half-open `[start, end)` window in minutes since midnight.
/// Invariant: `start < end <= LAST_MINUTE`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "(u16, u16)", into = "(u16, u16)")]
pub struct TimeWindow {
    start: u16,
    end: u16,
}

impl TimeWindow {
    pub fn new(start: u16, end: u16) -> Result<Self, ConstraintError> {
        if start >= end || end > LAST_MINUTE {
            return Err(ConstraintError::MalformedTimeRange(format!(
                "{}-{}",
                format_time(start),
                format_time(end)
            )));
        }
        Ok(Self { start, end })
    }

    /// Build from two clock strings, e.g. `("8:30", "10:20")`.
    pub fn parse(start: &str, end: &str) -> Result<Self, ConstraintError> {
        Self::new(parse_time(start)?, parse_time(end)?)
    }

    pub fn start(&self) -> u16 { self.start }
    pub fn end(&self) -> u16 { self.end }

    /// Touching endpoints do not overlap.
    pub fn overlaps(&self, other: &TimeWindow) -> bool {
        self.start < other.end && self.end > other.start
    }
}

impl TryFrom<(u16, u16)> for TimeWindow {
    type Error = ConstraintError;

    fn try_from((start, end): (u16, u16)) -> Result<Self, Self::Error> {
        Self::new(start, end)
    }
}

impl From<TimeWindow> for (u16, u16) {
    fn from(w: TimeWindow) -> Self {
        (w.start, w.end)
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", format_time(self.start), format_time(self.end))
    }
}
