//! The weekly calendar grid: occupied cells and cell selection.
//!
//! The grid is five weekdays by [`GRID_TIMES`] hourly rows. A cell is occupied
//! when an enrolled course has a slot on that day whose start time normalizes
//! to the cell's label. Occupancy is a projection of the [`Enrollment`]; it is
//! rebuilt on demand and holds no state of its own.

use serde::{Deserialize, Serialize};

use crate::course::{Course, Enrollment};
use crate::slot::{parse_schedule, Day, TimeSlot};
use crate::time::normalize_time;

/// Hourly row labels, 8:00 AM through 11:00 PM.
pub const GRID_TIMES: [&str; 16] = [
    "8:00 AM", "9:00 AM", "10:00 AM", "11:00 AM", "12:00 PM", "1:00 PM", "2:00 PM", "3:00 PM",
    "4:00 PM", "5:00 PM", "6:00 PM", "7:00 PM", "8:00 PM", "9:00 PM", "10:00 PM", "11:00 PM",
];

/// A (day, time label) position on the grid. Also used as a query point.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridCell {
    pub day: Day,
    pub time: String,
}

impl GridCell {
    pub fn new(day: Day, time: impl Into<String>) -> Self {
        Self {
            day,
            time: time.into(),
        }
    }

    /// Whether `slot` starts in this cell: same day, start time equal after
    /// normalization.
    pub fn matches(&self, slot: &TimeSlot) -> bool {
        self.starts(slot.day, &slot.start_time)
    }

    fn starts(&self, day: Day, start_time: &str) -> bool {
        day == self.day && normalize_time(start_time) == normalize_time(&self.time)
    }

    /// Every cell of the grid, row by row.
    pub fn all() -> impl Iterator<Item = GridCell> {
        GRID_TIMES
            .iter()
            .flat_map(|time| Day::ALL.into_iter().map(move |day| GridCell::new(day, *time)))
    }
}

/// Display fields for the course in an occupied cell, with placeholders for
/// anything the catalog left blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseSummary {
    pub id: String,
    pub code: String,
    pub title: String,
    pub professor: String,
    pub location: String,
}

impl CourseSummary {
    fn of(course: &Course) -> Self {
        let or = |value: &str, placeholder: &str| {
            if value.is_empty() {
                placeholder.to_string()
            } else {
                value.to_string()
            }
        };
        Self {
            id: course.id.clone(),
            code: or(&course.code, "Unknown"),
            title: or(&course.title, "Unknown Course"),
            professor: or(&course.professor, "TBD"),
            location: "TBD".to_string(),
        }
    }
}

/// One grid cell taken by an enrolled course.
///
/// `course` points back at the full record so a click on the cell can open it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OccupiedCell<'a> {
    /// `"{course id}-{Day}-{start time}"`.
    pub id: String,
    pub day: Day,
    pub start_time: String,
    pub end_time: Option<String>,
    pub summary: CourseSummary,
    pub course: &'a Course,
}

impl OccupiedCell<'_> {
    pub fn slot(&self) -> TimeSlot {
        TimeSlot {
            day: self.day,
            start_time: self.start_time.clone(),
            end_time: self.end_time.clone(),
        }
    }
}

/// Lay every enrolled course onto the grid.
///
/// Each active schedule string (pinned, or all offered when nothing is pinned)
/// contributes one cell per parsed slot. Courses whose schedules don't parse
/// contribute nothing. Output follows enrollment order, then schedule order,
/// then day order.
#[tracing::instrument(skip_all, fields(courses = enrollment.len()))]
pub fn build_occupancy(enrollment: &Enrollment) -> Vec<OccupiedCell<'_>> {
    let mut cells = Vec::new();

    for course in enrollment.courses() {
        let summary = CourseSummary::of(course);
        let before = cells.len();

        for schedule in enrollment.active_schedules(course) {
            for slot in parse_schedule(schedule) {
                cells.push(OccupiedCell {
                    id: format!("{}-{}-{}", course.id, slot.day, slot.start_time),
                    day: slot.day,
                    start_time: slot.start_time,
                    end_time: slot.end_time,
                    summary: summary.clone(),
                    course,
                });
            }
        }

        if cells.len() == before {
            tracing::debug!(course = %course.code, "Enrolled course has no parseable meeting times");
        }
    }

    tracing::trace!(cells = cells.len(), "Built occupancy");
    cells
}

/// The first occupied cell sitting at `cell`, if any.
pub fn occupant<'c, 'a>(
    occupancy: &'c [OccupiedCell<'a>],
    cell: &GridCell,
) -> Option<&'c OccupiedCell<'a>> {
    occupancy.iter().find(|o| cell.starts(o.day, &o.start_time))
}

pub fn is_occupied(occupancy: &[OccupiedCell<'_>], cell: &GridCell) -> bool {
    occupant(occupancy, cell).is_some()
}

/// Outcome of clicking a grid cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CellClick<'a> {
    /// The cell is occupied; the caller should open this course. The
    /// selection is left as it was.
    Open(&'a Course),
    /// The cell is now the query point.
    Selected(GridCell),
    /// The clicked cell was already selected and has been cleared.
    Cleared,
}

/// The current grid query point: either unset or exactly one open cell.
///
/// Owned by the caller and passed to [`has_conflict`](crate::has_conflict) and
/// [`courses_for_slot`](crate::courses_for_slot) as `selection.current()`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotSelection {
    current: Option<GridCell>,
}

impl SlotSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&GridCell> {
        self.current.as_ref()
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    /// Apply a click on `cell`.
    ///
    /// Occupied cells are navigation, not selection. Clicking the selected cell
    /// unsets it; clicking any other open cell selects it.
    pub fn click<'a>(&mut self, cell: GridCell, occupancy: &[OccupiedCell<'a>]) -> CellClick<'a> {
        if let Some(taken) = occupant(occupancy, &cell) {
            return CellClick::Open(taken.course);
        }

        if self.current.as_ref() == Some(&cell) {
            self.current = None;
            CellClick::Cleared
        } else {
            self.current = Some(cell.clone());
            CellClick::Selected(cell)
        }
    }
}
