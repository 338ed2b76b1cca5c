//! Catalog filtering and the open-slot course query.
//!
//! [`courses_for_slot`] answers "what could I take in this cell?": it drops
//! courses already enrolled, applies the attribute filters in
//! [`CourseFilter`], keeps only courses meeting in the selected cell, and
//! tags each survivor with whether it would conflict. Catalog order is kept;
//! [`sort_candidates`] reorders only on request.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::conflict::{conflicts_with, enrolled_slots, matching_slots};
use crate::course::{Course, Enrollment};
use crate::grid::GridCell;

/// Upper bound of the workload scale; a `max_workload` at this value filters
/// nothing.
pub const MAX_WORKLOAD: f64 = 5.0;

/// Tri-state filter on whether a course lists prerequisites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrerequisiteFilter {
    #[default]
    All,
    /// Only courses with at least one prerequisite.
    Yes,
    /// Only courses with none.
    No,
}

impl PrerequisiteFilter {
    fn accepts(self, course: &Course) -> bool {
        match self {
            PrerequisiteFilter::All => true,
            PrerequisiteFilter::Yes => !course.prerequisites.is_empty(),
            PrerequisiteFilter::No => course.prerequisites.is_empty(),
        }
    }
}

/// Attribute filters over catalog courses. All conditions must hold.
///
/// An empty `departments` or `credits` list means "any".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CourseFilter {
    pub departments: Vec<String>,
    pub min_rating: f64,
    pub max_workload: f64,
    pub prerequisites: PrerequisiteFilter,
    pub credits: Vec<u32>,
    /// Case-insensitive substring over title, code and instructors.
    pub search: String,
}

impl Default for CourseFilter {
    fn default() -> Self {
        Self {
            departments: Vec::new(),
            min_rating: 0.0,
            max_workload: MAX_WORKLOAD,
            prerequisites: PrerequisiteFilter::All,
            credits: Vec::new(),
            search: String::new(),
        }
    }
}

impl CourseFilter {
    pub fn matches(&self, course: &Course) -> bool {
        (self.departments.is_empty() || self.departments.contains(&course.department))
            && course.rating >= self.min_rating
            && course.workload <= self.max_workload
            && self.prerequisites.accepts(course)
            && (self.credits.is_empty() || self.credits.contains(&course.credits))
            && self.matches_search(course)
    }

    fn matches_search(&self, course: &Course) -> bool {
        let query = self.search.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        course.title.to_lowercase().contains(&query)
            || course.code.to_lowercase().contains(&query)
            || course
                .instructors()
                .iter()
                .any(|p| p.to_lowercase().contains(&query))
    }

    /// Number of active filter conditions, for a "Filters (n)" badge.
    ///
    /// Each selected department and credit value counts once; rating, workload
    /// and prerequisite count once each when narrowed. Search is not counted.
    pub fn active_count(&self) -> usize {
        self.departments.len()
            + usize::from(self.min_rating > 0.0)
            + usize::from(self.max_workload < MAX_WORKLOAD)
            + usize::from(self.prerequisites != PrerequisiteFilter::All)
            + self.credits.len()
    }

    pub fn toggle_department(&mut self, department: &str) {
        if let Some(pos) = self.departments.iter().position(|d| d == department) {
            self.departments.remove(pos);
        } else {
            self.departments.push(department.to_string());
        }
    }

    pub fn toggle_credit(&mut self, credits: u32) {
        if let Some(pos) = self.credits.iter().position(|&c| c == credits) {
            self.credits.remove(pos);
        } else {
            self.credits.push(credits);
        }
    }

    /// Reset every condition. Search text is kept.
    pub fn clear(&mut self) {
        *self = Self {
            search: std::mem::take(&mut self.search),
            ..Self::default()
        };
    }
}

/// A catalog course offered in the queried cell, tagged with its conflict
/// status against the enrollment.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotCandidate<'a> {
    pub course: &'a Course,
    pub conflicts: bool,
    /// The schedule string that puts the course in the cell. This is what a
    /// caller pins when adding the course. `None` without a selection.
    pub matching_schedule: Option<&'a str>,
}

/// Catalog courses available for the selected cell.
///
/// 1. Courses already in `enrollment` are dropped.
/// 2. `filter` is applied.
/// 3. With a `selection`, only courses with a schedule starting in that cell
///    are kept.
/// 4. Each survivor is tagged with whether it would conflict, as
///    [`has_conflict`](crate::has_conflict) decides.
///
/// Catalog order is preserved.
#[tracing::instrument(skip_all, fields(catalog = catalog.len(), cell = ?selection))]
pub fn courses_for_slot<'a>(
    catalog: &'a [Course],
    filter: &CourseFilter,
    selection: Option<&GridCell>,
    enrollment: &Enrollment,
) -> Vec<SlotCandidate<'a>> {
    // Parsed once per query, not per candidate.
    let existing = enrolled_slots(enrollment);

    let candidates: Vec<SlotCandidate<'a>> = catalog
        .iter()
        .filter(|course| !enrollment.contains(&course.id))
        .filter(|course| filter.matches(course))
        .filter_map(|course| match selection {
            Some(cell) => {
                let (schedule, slots) = matching_slots(course, cell)?;
                Some(SlotCandidate {
                    course,
                    conflicts: conflicts_with(&slots, &existing),
                    matching_schedule: Some(schedule),
                })
            }
            None => Some(SlotCandidate {
                course,
                conflicts: false,
                matching_schedule: None,
            }),
        })
        .collect();

    tracing::trace!(candidates = candidates.len(), "Slot query complete");
    candidates
}

/// Orderings the catalog views offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Highest rated first.
    Rating,
    /// Easiest first.
    Difficulty,
    /// Lightest workload first.
    Workload,
}

impl SortKey {
    fn compare(self, a: &Course, b: &Course) -> Ordering {
        match self {
            SortKey::Rating => b.rating.total_cmp(&a.rating),
            SortKey::Difficulty => a.difficulty.total_cmp(&b.difficulty),
            SortKey::Workload => a.workload.total_cmp(&b.workload),
        }
    }
}

/// Stable sort of query results by `key`; ties keep catalog order.
pub fn sort_candidates(candidates: &mut [SlotCandidate<'_>], key: SortKey) {
    candidates.sort_by(|a, b| key.compare(a.course, b.course));
}

/// Distinct departments in the catalog, sorted.
pub fn departments(catalog: &[Course]) -> Vec<String> {
    catalog
        .iter()
        .map(|c| c.department.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
