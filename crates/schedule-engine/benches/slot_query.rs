//! Slot query latency over generated catalogs.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use schedule_engine::{
    build_occupancy, courses_for_slot, Course, CourseFilter, Day, Enrollment, GridCell, GRID_TIMES,
};

const PATTERNS: [&str; 5] = ["MWF", "TTh", "MW", "F", "TBA"];

/// A catalog with a spread of day patterns, hours and section counts.
fn generate_catalog(size: usize) -> Vec<Course> {
    (0..size)
        .map(|i| {
            let sections = 1 + i % 3;
            let schedules = (0..sections)
                .map(|s| {
                    let pattern = PATTERNS[(i + s) % PATTERNS.len()];
                    let time = GRID_TIMES[(i * 7 + s) % GRID_TIMES.len()];
                    format!("{pattern} {time}")
                })
                .collect();
            Course {
                id: format!("c{i}"),
                code: format!("DEPT {i}"),
                department: format!("D{}", i % 12),
                credits: 2 + (i % 3) as u32,
                rating: (i % 50) as f64 / 10.0,
                workload: (i % 40) as f64 / 8.0,
                schedules,
                ..Course::default()
            }
        })
        .collect()
}

fn enroll_every(catalog: &[Course], step: usize) -> Enrollment {
    let mut enrollment = Enrollment::new();
    for course in catalog.iter().step_by(step).take(6) {
        enrollment.add(course.clone(), None);
    }
    enrollment
}

fn bench_slot_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("courses_for_slot");
    let cell = GridCell::new(Day::Monday, "9:00 AM");
    let filter = CourseFilter::default();

    for size in [100usize, 1_000, 5_000] {
        let catalog = generate_catalog(size);
        let enrollment = enroll_every(&catalog, 17);

        group.bench_with_input(BenchmarkId::from_parameter(size), &catalog, |b, catalog| {
            b.iter(|| courses_for_slot(black_box(catalog), &filter, Some(&cell), &enrollment))
        });
    }
    group.finish();
}

fn bench_occupancy(c: &mut Criterion) {
    let catalog = generate_catalog(50);
    let enrollment = enroll_every(&catalog, 7);

    c.bench_function("build_occupancy", |b| {
        b.iter(|| build_occupancy(black_box(&enrollment)))
    });
}

criterion_group!(benches, bench_slot_query, bench_occupancy);
criterion_main!(benches);
