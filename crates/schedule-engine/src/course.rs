//! Course records and the user's enrollment set.
//!
//! [`Course`] mirrors the catalog's JSON shape. Every field is defaulted so
//! partial or legacy records still load; the engine only reads them. A field
//! that is `null` or of the wrong type loads as its default rather than
//! failing the whole record.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A catalog course.
///
/// A course carries either a single `schedule` string or a list of alternative
/// `schedules` (one per lecture section). See [`Course::schedule_strings`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Course {
    #[serde(deserialize_with = "lenient")]
    pub id: String,
    #[serde(deserialize_with = "lenient")]
    pub code: String,
    #[serde(deserialize_with = "lenient")]
    pub title: String,
    #[serde(deserialize_with = "lenient")]
    pub credits: u32,
    #[serde(deserialize_with = "lenient")]
    pub department: String,
    #[serde(deserialize_with = "lenient")]
    pub professor: String,
    #[serde(deserialize_with = "lenient_seq")]
    pub professors: Vec<String>,
    #[serde(deserialize_with = "lenient")]
    pub schedule: Option<String>,
    #[serde(deserialize_with = "lenient_seq")]
    pub schedules: Vec<String>,
    #[serde(deserialize_with = "lenient")]
    pub rating: f64,
    #[serde(deserialize_with = "lenient")]
    pub review_count: u32,
    #[serde(deserialize_with = "lenient")]
    pub workload: f64,
    #[serde(deserialize_with = "lenient")]
    pub difficulty: f64,
    #[serde(deserialize_with = "lenient_seq")]
    pub prerequisites: Vec<String>,
}

/// Decode a field, falling back to its default on `null` or a type mismatch.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(T::default());
    }
    match serde_json::from_value(value) {
        Ok(decoded) => Ok(decoded),
        Err(err) => {
            tracing::debug!(error = %err, "Ignoring malformed field");
            Ok(T::default())
        }
    }
}

/// Decode a list, dropping entries that don't decode. `null` or a non-list
/// value yields an empty list.
fn lenient_seq<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let values: Vec<Value> = lenient(deserializer)?;
    Ok(values
        .into_iter()
        .filter_map(|value| serde_json::from_value(value).ok())
        .collect())
}

impl Course {
    /// All offered schedule strings: `schedules` when non-empty, otherwise the
    /// single `schedule`, otherwise nothing.
    pub fn schedule_strings(&self) -> Vec<&str> {
        if !self.schedules.is_empty() {
            return self.schedules.iter().map(String::as_str).collect();
        }
        self.schedule
            .as_deref()
            .filter(|s| !s.is_empty())
            .into_iter()
            .collect()
    }

    /// Instructors to search against: `professors`, or `professor` when the
    /// list is empty.
    pub fn instructors(&self) -> Vec<&str> {
        if self.professors.is_empty() {
            vec![self.professor.as_str()]
        } else {
            self.professors.iter().map(String::as_str).collect()
        }
    }
}

/// The courses a user has added to their calendar, in insertion order, plus
/// the schedule string pinned for each multi-section course.
///
/// A course id appears at most once. Loading a snapshot with duplicates keeps
/// the first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "EnrollmentSnapshot")]
pub struct Enrollment {
    courses: Vec<Course>,
    selected_schedules: HashMap<String, String>,
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct EnrollmentSnapshot {
    #[serde(deserialize_with = "lenient_seq")]
    courses: Vec<Course>,
    #[serde(deserialize_with = "lenient")]
    selected_schedules: HashMap<String, String>,
}

impl From<EnrollmentSnapshot> for Enrollment {
    fn from(snapshot: EnrollmentSnapshot) -> Self {
        let mut enrollment = Enrollment::new();
        let mut pins = snapshot.selected_schedules;
        for course in snapshot.courses {
            let pinned = pins.remove(&course.id);
            enrollment.add(course, pinned);
        }
        enrollment
    }
}

impl Enrollment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a course, optionally pinned to one of its schedule strings.
    ///
    /// Returns `false` (and changes nothing) if the course is already enrolled.
    pub fn add(&mut self, course: Course, pinned: Option<String>) -> bool {
        if self.contains(&course.id) {
            tracing::debug!(course = %course.code, "Course already enrolled");
            return false;
        }
        if let Some(schedule) = pinned.filter(|s| !s.is_empty()) {
            self.selected_schedules.insert(course.id.clone(), schedule);
        }
        self.courses.push(course);
        true
    }

    /// Remove a course and its pinned schedule. Returns `false` if absent.
    pub fn remove(&mut self, course_id: &str) -> bool {
        let before = self.courses.len();
        self.courses.retain(|c| c.id != course_id);
        self.selected_schedules.remove(course_id);
        self.courses.len() != before
    }

    pub fn contains(&self, course_id: &str) -> bool {
        self.courses.iter().any(|c| c.id == course_id)
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    /// The schedule string pinned for `course_id`, if any.
    pub fn pinned_schedule(&self, course_id: &str) -> Option<&str> {
        self.selected_schedules.get(course_id).map(String::as_str)
    }

    /// Schedule strings that occupy the calendar for an enrolled course.
    ///
    /// The pinned schedule alone when one is set; otherwise every schedule the
    /// course offers.
    pub fn active_schedules<'a>(&'a self, course: &'a Course) -> Vec<&'a str> {
        match self.pinned_schedule(&course.id) {
            Some(pinned) => vec![pinned],
            None => course.schedule_strings(),
        }
    }

    /// Sum of credits across enrolled courses.
    pub fn enrolled_credits(&self) -> u32 {
        self.courses.iter().map(|c| c.credits).sum()
    }

    /// Credits still needed to reach `target`. Negative when over target.
    pub fn remaining_credits(&self, target: u32) -> i64 {
        i64::from(target) - i64::from(self.enrolled_credits())
    }
}
