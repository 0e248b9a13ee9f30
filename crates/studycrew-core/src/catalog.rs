//! Course catalog filtering and assistant rating display.

use crate::model::{AcademicYear, Course, Semester};

/// Keep the courses that belong to `year` and `semester`.
///
/// The backend is queried with the same filter, but records are matched again
/// here against the year label and semester index they carry.
pub fn filter_courses(courses: &[Course], year: AcademicYear, semester: Semester) -> Vec<Course> {
    courses
        .iter()
        .filter(|c| matches_term(c, year, semester))
        .cloned()
        .collect()
}

/// Whether a course record belongs to the given year and semester.
pub fn matches_term(course: &Course, year: AcademicYear, semester: Semester) -> bool {
    course.year == year.label() && course.semester == semester.index()
}

/// Star breakdown of a 0–5 rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stars {
    pub full: u8,
    pub half: bool,
    pub empty: u8,
}

impl Stars {
    pub fn from_rating(rating: f64) -> Self {
        let rating = if rating.is_finite() {
            rating.clamp(0.0, 5.0)
        } else {
            0.0
        };
        let full = rating.floor() as u8;
        let half = rating.fract() > 0.0;
        let empty = 5 - full - u8::from(half);
        Self { full, half, empty }
    }
}

impl std::fmt::Display for Stars {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for _ in 0..self.full {
            f.write_str("★")?;
        }
        if self.half {
            f.write_str("½")?;
        }
        for _ in 0..self.empty {
            f.write_str("☆")?;
        }
        Ok(())
    }
}
