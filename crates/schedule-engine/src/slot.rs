//! Schedule-string parsing -- free-text meeting times into weekday slots.
//!
//! A schedule string pairs a day pattern with a time range or start time:
//! `"MWF 10:00-10:50 AM"`, `"TTh 2:00 PM - 3:20 PM"`, `"F 1:00 PM"`. Parsing is
//! best-effort. Anything unreadable yields fewer slots, never an error.
//!
//! # Day patterns
//!
//! Combined patterns are tried longest first and the first hit wins:
//!
//! 1. `MWF` -- Monday, Wednesday, Friday
//! 2. `TTh` or `TuTh` -- Tuesday, Thursday
//! 3. `MW` -- Monday, Wednesday
//!
//! Only when none of these appear are the standalone tokens `M`, `T`, `W`,
//! `Th`, `F` tested, each on its own. A standalone token counts when it is
//! set off by a space (or opens the string). This is a heuristic: a stray
//! capital letter after a space elsewhere in the string also counts.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScheduleError};
use crate::time::normalize_time;

/// One of the five teaching weekdays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl Day {
    /// All weekdays in calendar order.
    pub const ALL: [Day; 5] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for Day {
    type Err = ScheduleError;

    /// Accepts full names and catalog tokens (`M`, `T`, `Tu`, `W`, `Th`, `F`),
    /// case-insensitively.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monday" | "mon" | "m" => Ok(Day::Monday),
            "tuesday" | "tue" | "tu" | "t" => Ok(Day::Tuesday),
            "wednesday" | "wed" | "w" => Ok(Day::Wednesday),
            "thursday" | "thu" | "th" => Ok(Day::Thursday),
            "friday" | "fri" | "f" => Ok(Day::Friday),
            _ => Err(ScheduleError::UnknownDay(s.to_string())),
        }
    }
}

/// A single weekly meeting derived from a schedule string.
///
/// Times are in canonical `H:MM AM|PM` form. `end_time` is `None` when the
/// schedule only gave a start; consumers derive a default end.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    pub day: Day,
    pub start_time: String,
    pub end_time: Option<String>,
}

// `10:00-10:50 AM`: one period shared by both bounds. Digits are ASCII only.
static RANGE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)([0-9]{1,2}:[0-9]{2})-([0-9]{1,2}:[0-9]{2})\s?(AM|PM)")
        .expect("valid range regex")
});

static TIME_WITH_PERIOD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)[0-9]{1,2}:[0-9]{2}\s?(?:AM|PM)").expect("valid time regex")
});

/// A day-pattern rule: when `matches` holds, the schedule meets on `days`.
struct DayRule {
    days: &'static [Day],
    matches: fn(&str) -> bool,
}

const COMBINED_RULES: &[DayRule] = &[
    DayRule {
        days: &[Day::Monday, Day::Wednesday, Day::Friday],
        matches: has_mwf,
    },
    DayRule {
        days: &[Day::Tuesday, Day::Thursday],
        matches: has_tth,
    },
    DayRule {
        days: &[Day::Monday, Day::Wednesday],
        matches: has_mw,
    },
];

const STANDALONE_RULES: &[DayRule] = &[
    DayRule {
        days: &[Day::Monday],
        matches: has_m,
    },
    DayRule {
        days: &[Day::Tuesday],
        matches: has_t,
    },
    DayRule {
        days: &[Day::Wednesday],
        matches: has_w,
    },
    DayRule {
        days: &[Day::Thursday],
        matches: has_th,
    },
    DayRule {
        days: &[Day::Friday],
        matches: has_f,
    },
];

fn has_mwf(s: &str) -> bool {
    s.contains("MWF")
}

fn has_tth(s: &str) -> bool {
    s.contains("TTh") || s.contains("TuTh")
}

fn has_mw(s: &str) -> bool {
    s.contains("MW")
}

fn has_m(s: &str) -> bool {
    spaced_letter(s, 'M')
}

// A lone `T` only counts when no `Th` appears anywhere.
fn has_t(s: &str) -> bool {
    s.contains(" T ") || s.starts_with("T ") || (s.contains(" T") && !s.contains("Th"))
}

fn has_w(s: &str) -> bool {
    spaced_letter(s, 'W')
}

fn has_th(s: &str) -> bool {
    s.contains("Th ") || s.contains(" Th")
}

fn has_f(s: &str) -> bool {
    spaced_letter(s, 'F')
}

/// `letter` opening the string as a word, or anywhere right after a space.
fn spaced_letter(s: &str, letter: char) -> bool {
    let mut chars = s.chars();
    let opens_string = chars.next() == Some(letter) && chars.next() == Some(' ');
    opens_string || s.contains(&format!(" {letter}"))
}

/// Resolve the days a schedule string meets on.
fn meeting_days(schedule: &str) -> Vec<Day> {
    if let Some(rule) = COMBINED_RULES.iter().find(|r| (r.matches)(schedule)) {
        return rule.days.to_vec();
    }
    STANDALONE_RULES
        .iter()
        .filter(|r| (r.matches)(schedule))
        .flat_map(|r| r.days.iter().copied())
        .collect()
}

/// Pull the (start, end) pair out of a schedule string, normalized.
fn meeting_times(schedule: &str) -> (Option<String>, Option<String>) {
    if let Some(caps) = RANGE_PATTERN.captures(schedule) {
        let period = &caps[3];
        let start = normalize_time(&format!("{} {}", &caps[1], period));
        let end = normalize_time(&format!("{} {}", &caps[2], period));
        return (Some(start), Some(end));
    }

    let mut times = TIME_WITH_PERIOD
        .find_iter(schedule)
        .map(|m| normalize_time(m.as_str()));
    (times.next(), times.next())
}

/// Whether a schedule string stands for "no fixed meeting time".
pub fn is_unscheduled(schedule: &str) -> bool {
    schedule.trim().is_empty() || schedule.contains("TBA")
}

/// Parse a schedule string into one [`TimeSlot`] per meeting day.
///
/// Empty strings and anything containing `TBA` yield no slots. A day pattern
/// without a readable start time also yields no slots.
///
/// # Examples
///
/// ```
/// use schedule_engine::{parse_schedule, Day};
///
/// let slots = parse_schedule("TTh 2:00-3:20 PM");
/// assert_eq!(slots.len(), 2);
/// assert_eq!(slots[0].day, Day::Tuesday);
/// assert_eq!(slots[1].start_time, "2:00 PM");
/// assert_eq!(slots[1].end_time.as_deref(), Some("3:20 PM"));
/// ```
pub fn parse_schedule(schedule: &str) -> Vec<TimeSlot> {
    if is_unscheduled(schedule) {
        return Vec::new();
    }

    let (start, end) = meeting_times(schedule);
    let Some(start) = start else {
        tracing::debug!(schedule, "No start time in schedule string");
        return Vec::new();
    };

    let days = meeting_days(schedule);
    if days.is_empty() {
        tracing::debug!(schedule, "No day pattern in schedule string");
    }

    days.into_iter()
        .map(|day| TimeSlot {
            day,
            start_time: start.clone(),
            end_time: end.clone(),
        })
        .collect()
}
