//! `coursesched` CLI — query course schedules from JSON snapshots.
//!
//! ## Usage
//!
//! ```sh
//! # Parse schedule strings into weekday slots
//! coursesched parse "MWF 10:00-10:50 AM" "TTh 2:00-3:20 PM"
//!
//! # Show which grid cells an enrollment occupies
//! coursesched occupancy -e enrollment.json
//!
//! # Courses meeting Monday at 9:00 AM, tagged with conflicts
//! coursesched slot -c catalog.json -e enrollment.json --day Monday --time "9:00 AM"
//!
//! # Same, filtered and sorted, as JSON
//! coursesched --format json slot -c catalog.json --department CSCI --min-rating 4 --sort rating
//!
//! # Credit totals
//! coursesched credits -e enrollment.json --target-credits 16
//! ```
//!
//! `RUST_LOG` controls log output on stderr; `-v` raises the default to debug.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use schedule_engine::{
    build_occupancy, courses_for_slot, parse_schedule, sort_candidates, Course, CourseFilter, Day,
    Enrollment, GridCell, PrerequisiteFilter, SortKey, TimeOfDay, TimeSlot,
};
use serde::Serialize;
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "coursesched",
    version,
    about = "Course schedule parsing, grid occupancy and conflict queries"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text, global = true)]
    format: Format,

    /// Log engine decisions at debug level (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse schedule strings into weekday slots
    Parse {
        /// Schedule strings, e.g. "MWF 10:00-10:50 AM"
        #[arg(required = true)]
        schedules: Vec<String>,
    },
    /// List the grid cells occupied by an enrollment
    Occupancy {
        /// Enrollment JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        enrollment: Option<String>,
    },
    /// List catalog courses for a grid cell, tagged with conflicts
    Slot {
        /// Catalog JSON file: an array of courses (reads from stdin if omitted)
        #[arg(short, long)]
        catalog: Option<String>,
        /// Enrollment JSON file (empty enrollment if omitted)
        #[arg(short, long)]
        enrollment: Option<String>,
        /// Day of the selected cell, e.g. "Monday" or "Th"
        #[arg(long, requires = "time")]
        day: Option<Day>,
        /// Time of the selected cell, e.g. "9:00 AM"
        #[arg(long, requires = "day")]
        time: Option<TimeOfDay>,
        #[command(flatten)]
        filter: FilterArgs,
        /// Sort results (catalog order if omitted)
        #[arg(long, value_enum)]
        sort: Option<SortArg>,
    },
    /// Show enrolled and remaining credits
    Credits {
        /// Enrollment JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        enrollment: Option<String>,
        /// Credit goal for the term
        #[arg(long, default_value_t = 0)]
        target_credits: u32,
    },
}

#[derive(clap::Args)]
struct FilterArgs {
    /// Keep only these departments (repeatable)
    #[arg(long = "department")]
    departments: Vec<String>,
    /// Minimum rating
    #[arg(long, default_value_t = 0.0)]
    min_rating: f64,
    /// Maximum workload
    #[arg(long, default_value_t = schedule_engine::filter::MAX_WORKLOAD)]
    max_workload: f64,
    /// Prerequisite requirement
    #[arg(long, value_enum, default_value_t = PrereqArg::All)]
    prerequisites: PrereqArg,
    /// Keep only these credit counts (repeatable)
    #[arg(long = "credits")]
    credits: Vec<u32>,
    /// Search title, code and instructors
    #[arg(long, default_value = "")]
    search: String,
}

#[derive(Clone, Copy, ValueEnum)]
enum PrereqArg {
    All,
    Yes,
    No,
}

#[derive(Clone, Copy, ValueEnum)]
enum SortArg {
    Rating,
    Difficulty,
    Workload,
}

impl From<FilterArgs> for CourseFilter {
    fn from(args: FilterArgs) -> Self {
        CourseFilter {
            departments: args.departments,
            min_rating: args.min_rating,
            max_workload: args.max_workload,
            prerequisites: match args.prerequisites {
                PrereqArg::All => PrerequisiteFilter::All,
                PrereqArg::Yes => PrerequisiteFilter::Yes,
                PrereqArg::No => PrerequisiteFilter::No,
            },
            credits: args.credits,
            search: args.search,
        }
    }
}

impl From<SortArg> for SortKey {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Rating => SortKey::Rating,
            SortArg::Difficulty => SortKey::Difficulty,
            SortArg::Workload => SortKey::Workload,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Parse { schedules } => {
            let parsed: Vec<ParsedSchedule<'_>> = schedules
                .iter()
                .map(|s| ParsedSchedule {
                    schedule: s,
                    slots: parse_schedule(s),
                })
                .collect();
            match cli.format {
                Format::Json => print_json(&parsed)?,
                Format::Text => {
                    for entry in &parsed {
                        println!("{}", entry.schedule);
                        if entry.slots.is_empty() {
                            println!("  (no meeting times)");
                        }
                        for slot in &entry.slots {
                            println!("  {:<10} {}", slot.day, format_span(slot));
                        }
                    }
                }
            }
        }
        Commands::Occupancy { enrollment } => {
            let enrollment = load_enrollment(enrollment.as_deref(), true)?;
            let cells = build_occupancy(&enrollment);
            match cli.format {
                Format::Json => print_json(&cells)?,
                Format::Text => {
                    for cell in &cells {
                        println!(
                            "{:<10} {:<20} {:<10} {}",
                            cell.day,
                            format_span(&cell.slot()),
                            cell.summary.code,
                            cell.summary.title
                        );
                    }
                }
            }
        }
        Commands::Slot {
            catalog,
            enrollment,
            day,
            time,
            filter,
            sort,
        } => {
            let catalog = load_catalog(catalog.as_deref())?;
            let enrollment = load_enrollment(enrollment.as_deref(), false)?;
            let selection = day
                .zip(time)
                .map(|(day, time)| GridCell::new(day, time.to_string()));
            let filter = CourseFilter::from(filter);

            let mut results = courses_for_slot(&catalog, &filter, selection.as_ref(), &enrollment);
            if let Some(key) = sort {
                sort_candidates(&mut results, key.into());
            }

            match cli.format {
                Format::Json => print_json(&results)?,
                Format::Text => {
                    for candidate in &results {
                        let course = candidate.course;
                        let marker = if candidate.conflicts { "CONFLICT" } else { "ok" };
                        let schedule = candidate
                            .matching_schedule
                            .map(str::to_string)
                            .unwrap_or_else(|| course.schedule_strings().join(" | "));
                        println!(
                            "{:<8} {:<10} {:<30} {}",
                            marker, course.code, course.title, schedule
                        );
                    }
                }
            }
        }
        Commands::Credits {
            enrollment,
            target_credits,
        } => {
            let enrollment = load_enrollment(enrollment.as_deref(), true)?;
            let summary = CreditSummary {
                enrolled: enrollment.enrolled_credits(),
                target: target_credits,
                remaining: enrollment.remaining_credits(target_credits),
            };
            match cli.format {
                Format::Json => print_json(&summary)?,
                Format::Text => {
                    println!("Enrolled:   {}", summary.enrolled);
                    println!("Target:     {}", summary.target);
                    println!("Remaining:  {}", summary.remaining);
                }
            }
        }
    }

    Ok(())
}

#[derive(Serialize)]
struct ParsedSchedule<'a> {
    schedule: &'a str,
    slots: Vec<TimeSlot>,
}

#[derive(Serialize)]
struct CreditSummary {
    enrolled: u32,
    target: u32,
    remaining: i64,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// `"10:00 AM - 10:50 AM"`, with a `~` end when derived from the default length.
fn format_span(slot: &TimeSlot) -> String {
    match &slot.end_time {
        Some(end) => format!("{} - {}", slot.start_time, end),
        None => format!(
            "{} - ~{}",
            slot.start_time,
            schedule_engine::calculate_end_time(&slot.start_time)
        ),
    }
}

fn load_catalog(path: Option<&str>) -> Result<Vec<Course>> {
    let raw = read_input(path)?;
    let catalog: Vec<Course> = serde_json::from_str(&raw)
        .context("Failed to parse catalog JSON (expected an array of courses)")?;
    tracing::debug!(courses = catalog.len(), "Loaded catalog");
    Ok(catalog)
}

/// Load an enrollment snapshot. Without a path, read stdin when `stdin_default`
/// is set, otherwise start empty.
fn load_enrollment(path: Option<&str>, stdin_default: bool) -> Result<Enrollment> {
    if path.is_none() && !stdin_default {
        return Ok(Enrollment::new());
    }
    let raw = read_input(path)?;
    let enrollment: Enrollment =
        serde_json::from_str(&raw).context("Failed to parse enrollment JSON")?;
    tracing::debug!(courses = enrollment.len(), "Loaded enrollment");
    Ok(enrollment)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}
