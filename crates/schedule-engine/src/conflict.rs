//! Conflict detection between a candidate course and the current enrollment.
//!
//! A candidate is checked through the schedule that puts it in the selected
//! grid cell, not through every section it offers. Enrolled courses count
//! with their active schedules (pinned, or all offered when nothing is
//! pinned). Touching sessions (one ends as the other starts) are not
//! conflicts.

use crate::course::{Course, Enrollment};
use crate::grid::GridCell;
use crate::slot::{parse_schedule, TimeSlot};
use crate::time::times_overlap;

/// The first of `course`'s schedule strings with a slot starting in `cell`.
pub fn find_matching_schedule<'a>(course: &'a Course, cell: &GridCell) -> Option<&'a str> {
    matching_slots(course, cell).map(|(schedule, _)| schedule)
}

/// Like [`find_matching_schedule`], also returning that schedule's parsed
/// slots so callers don't parse it twice.
pub fn matching_slots<'a>(
    course: &'a Course,
    cell: &GridCell,
) -> Option<(&'a str, Vec<TimeSlot>)> {
    course.schedule_strings().into_iter().find_map(|schedule| {
        let slots = parse_schedule(schedule);
        slots
            .iter()
            .any(|slot| cell.matches(slot))
            .then_some((schedule, slots))
    })
}

/// Whether two slots fall on the same day and overlap in time.
///
/// Missing end times default to a 50-minute session.
pub fn slots_conflict(a: &TimeSlot, b: &TimeSlot) -> bool {
    a.day == b.day
        && times_overlap(
            &a.start_time,
            a.end_time.as_deref(),
            &b.start_time,
            b.end_time.as_deref(),
        )
}

/// Every slot the enrollment currently occupies, across all courses.
pub fn enrolled_slots(enrollment: &Enrollment) -> Vec<TimeSlot> {
    enrollment
        .courses()
        .iter()
        .flat_map(|course| enrollment.active_schedules(course))
        .flat_map(parse_schedule)
        .collect()
}

/// Whether adding `candidate` through the `selection` cell would clash with
/// the enrollment.
///
/// Returns `false` when there is no selection, the enrollment is empty, or
/// none of the candidate's schedules meets in the selected cell.
#[tracing::instrument(skip_all, fields(course = %candidate.code))]
pub fn has_conflict(
    candidate: &Course,
    selection: Option<&GridCell>,
    enrollment: &Enrollment,
) -> bool {
    let Some(cell) = selection else {
        return false;
    };
    if enrollment.is_empty() {
        return false;
    }
    let Some((_, new_slots)) = matching_slots(candidate, cell) else {
        return false;
    };

    conflicts_with(&new_slots, &enrolled_slots(enrollment))
}

/// Whether any of `new_slots` clashes with any of `existing`.
///
/// Lets a query that checks many candidates parse the enrollment once.
pub fn conflicts_with(new_slots: &[TimeSlot], existing: &[TimeSlot]) -> bool {
    new_slots
        .iter()
        .any(|new_slot| existing.iter().any(|slot| slots_conflict(new_slot, slot)))
}
