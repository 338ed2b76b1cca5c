//! Twelve-hour clock times as they appear in course schedules.
//!
//! Catalog times are strings like `"10:00 AM"`, `"09:30pm"` or `"2:00 PM"`.
//! [`TimeOfDay`] is the strict parsed form; the free functions below are the
//! lenient string-level helpers used by the rest of the engine, and never fail.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::{Duration, NaiveTime, Timelike};
use regex::Regex;

use crate::error::{Result, ScheduleError};

/// Length of a class session when a schedule gives only a start time.
pub const DEFAULT_SESSION_MINUTES: i64 = 50;

/// Returned by [`calculate_end_time`] when the start time cannot be read.
pub const FALLBACK_END_TIME: &str = "11:50 AM";

// Unanchored: finds the first `H:MM AM|PM` anywhere in a string. Digits are
// ASCII only.
static TIME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)([0-9]{1,2}):([0-9]{2})\s?(AM|PM)").expect("valid time regex")
});

static STRICT_TIME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*([0-9]{1,2}):([0-9]{2})\s?(AM|PM)\s*$")
        .expect("valid strict time regex")
});

/// A wall-clock time within a single day, at minute precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(NaiveTime);

impl TimeOfDay {
    /// Build from a 24-hour clock reading. Returns `None` when out of range.
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self)
    }

    /// Minutes since midnight (0..1440).
    pub fn minutes(self) -> u32 {
        self.0.num_seconds_from_midnight() / 60
    }

    /// Shift by a number of minutes, wrapping around midnight.
    pub fn plus_minutes(self, minutes: i64) -> Self {
        let (shifted, _) = self.0.overflowing_add_signed(Duration::minutes(minutes));
        Self(shifted)
    }

    /// End of a default-length session starting at this time.
    pub fn session_end(self) -> Self {
        self.plus_minutes(DEFAULT_SESSION_MINUTES)
    }
}

impl FromStr for TimeOfDay {
    type Err = ScheduleError;

    /// Parse `H:MM AM|PM`. The space before the period is optional and the
    /// period is case-insensitive. Hour must be 0-12, minute 0-59.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || ScheduleError::InvalidTime(s.to_string());

        let caps = STRICT_TIME_PATTERN.captures(s).ok_or_else(invalid)?;
        let hour: u32 = caps[1].parse().map_err(|_| invalid())?;
        let minute: u32 = caps[2].parse().map_err(|_| invalid())?;
        if hour > 12 {
            return Err(invalid());
        }

        let pm = caps[3].eq_ignore_ascii_case("PM");
        let hour24 = match (pm, hour) {
            (false, 12) => 0,
            (true, h) if h != 12 => h + 12,
            (_, h) => h,
        };

        Self::from_hm(hour24, minute).ok_or_else(invalid)
    }
}

impl fmt::Display for TimeOfDay {
    /// Canonical form: no leading zero on the hour, one space, uppercase period.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%-I:%M %p"))
    }
}

/// Rewrite the first `H:MM AM|PM` in `s` into canonical form.
///
/// `"09:00am"` becomes `"9:00 AM"`. Text around the match is kept; input with
/// no match is returned unchanged.
pub fn normalize_time(s: &str) -> String {
    TIME_PATTERN
        .replace(s, |caps: &regex::Captures<'_>| {
            let hour = match caps[1].trim_start_matches('0') {
                "" => "0",
                hour => hour,
            };
            format!("{}:{} {}", hour, &caps[2], caps[3].to_ascii_uppercase())
        })
        .into_owned()
}

/// Minutes since midnight for a time string. Malformed input maps to 0.
pub fn time_to_minutes(s: &str) -> u32 {
    match s.parse::<TimeOfDay>() {
        Ok(t) => t.minutes(),
        Err(err) => {
            if !s.is_empty() {
                tracing::debug!(error = %err, "Treating unreadable time as midnight");
            }
            0
        }
    }
}

/// Default end time for a session starting at `start`.
///
/// Adds [`DEFAULT_SESSION_MINUTES`], wrapping past noon and midnight. Falls
/// back to [`FALLBACK_END_TIME`] when `start` cannot be read.
pub fn calculate_end_time(start: &str) -> String {
    match start.parse::<TimeOfDay>() {
        Ok(t) => t.session_end().to_string(),
        Err(err) => {
            tracing::debug!(error = %err, "Using fallback end time");
            FALLBACK_END_TIME.to_string()
        }
    }
}

/// Whether `[start1, end1)` and `[start2, end2)` overlap.
///
/// A missing or empty end time is derived with [`calculate_end_time`].
/// Intervals that only touch (one ends exactly when the other starts) do not
/// overlap.
pub fn times_overlap(start1: &str, end1: Option<&str>, start2: &str, end2: Option<&str>) -> bool {
    let (s1, e1) = interval_minutes(start1, end1);
    let (s2, e2) = interval_minutes(start2, end2);
    s1 < e2 && s2 < e1
}

fn interval_minutes(start: &str, end: Option<&str>) -> (u32, u32) {
    let end = match end {
        Some(e) if !e.is_empty() => time_to_minutes(e),
        _ => time_to_minutes(&calculate_end_time(start)),
    };
    (time_to_minutes(start), end)
}
