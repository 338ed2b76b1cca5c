//! # schedule-engine
//!
//! Weekly class-schedule engine for course planning.
//!
//! Course catalogs describe meeting times as free text (`"MWF 10:00-10:50 AM"`,
//! `"TTh 2:00-3:20 PM"`, `"TBA"`). This crate turns those strings into
//! structured day/time slots, lays enrolled courses onto a fixed weekday grid,
//! and answers "which catalog courses meet in this open cell, and would they
//! clash with what I already have?".
//!
//! Everything here is a pure function over caller-supplied snapshots. Bad input
//! degrades to an empty or `false` result; nothing in the query path returns an
//! error or panics.
//!
//! ## Modules
//!
//! - [`time`] — `H:MM AM|PM` parsing, normalization, default end times, overlap
//! - [`slot`] — schedule string → list of [`TimeSlot`]s
//! - [`course`] — [`Course`] records and the [`Enrollment`] set
//! - [`conflict`] — conflict check for a candidate course against an enrollment
//! - [`grid`] — weekday grid, occupied cells, and cell selection
//! - [`filter`] — catalog filtering, slot query, and sorting
//! - [`error`] — Error types for the strict parsers

pub mod conflict;
pub mod course;
pub mod error;
pub mod filter;
pub mod grid;
pub mod slot;
pub mod time;

pub use conflict::{find_matching_schedule, has_conflict, slots_conflict};
pub use course::{Course, Enrollment};
pub use error::ScheduleError;
pub use filter::{
    courses_for_slot, departments, sort_candidates, CourseFilter, PrerequisiteFilter,
    SlotCandidate, SortKey,
};
pub use grid::{build_occupancy, CellClick, GridCell, OccupiedCell, SlotSelection, GRID_TIMES};
pub use slot::{parse_schedule, Day, TimeSlot};
pub use time::{calculate_end_time, normalize_time, time_to_minutes, times_overlap, TimeOfDay};
