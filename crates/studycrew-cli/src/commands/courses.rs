//! The `studycrew courses` and `studycrew assistants` commands.

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use comfy_table::{Cell, Table};

use studycrew_client::dashboard::term_courses;
use studycrew_core::access::{assistant_dashboard, student_dashboard};
use studycrew_core::catalog::{filter_courses, Stars};
use studycrew_core::model::{AcademicYear, Course, Semester};
use studycrew_core::traits::StudyCrewApi;

use super::Context;

pub async fn list(
    config: Option<PathBuf>,
    year: Option<String>,
    semester: String,
    assisting: bool,
) -> Result<()> {
    let ctx = Context::open(config)?;
    let semester: Semester = semester.parse().map_err(|e: String| anyhow!(e))?;
    let year: Option<AcademicYear> = year
        .map(|y| y.parse().map_err(|e: String| anyhow!(e)))
        .transpose()?;

    let (year, courses) = match ctx.store.user() {
        Some(user) => {
            let view = if assisting {
                assistant_dashboard(user)?
            } else {
                student_dashboard(user)
            };
            let year = year
                .or(view.initial_year)
                .ok_or_else(|| anyhow!("no years available on this dashboard"))?;
            let courses = term_courses(ctx.api.as_ref(), &view, year, semester).await?;
            (year, courses)
        }
        None => {
            let year = year.ok_or_else(|| anyhow!("--year is required when not signed in"))?;
            let courses = ctx.api.courses(Some(year), Some(semester)).await?;
            (year, filter_courses(&courses, year, semester))
        }
    };

    println!("{year} - {semester}");
    if courses.is_empty() {
        println!("No courses available for {year} - {semester}");
        return Ok(());
    }
    println!("{}", course_table(&courses));
    Ok(())
}

pub async fn assistants(config: Option<PathBuf>, course: String) -> Result<()> {
    let ctx = Context::open(config)?;
    let assistants = ctx.api.assistants_for_course(&course).await?;

    if assistants.is_empty() {
        println!("No assistants available for {course} yet.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Name", "Email", "Rating", "Bio"]);
    for assistant in &assistants {
        let rating = assistant
            .rating
            .map(|r| format!("{} {r:.1}", Stars::from_rating(r)))
            .unwrap_or_else(|| "-".to_string());
        table.add_row(vec![
            Cell::new(&assistant.name),
            Cell::new(&assistant.email),
            Cell::new(rating),
            Cell::new(assistant.bio.as_deref().unwrap_or("")),
        ]);
    }
    println!("Assistants for {course}:\n{table}");
    Ok(())
}

pub(super) fn course_table(courses: &[Course]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Code", "Name", "Credits", "Description"]);
    for course in courses {
        table.add_row(vec![
            Cell::new(&course.code),
            Cell::new(&course.name),
            Cell::new(course.credit_hours()),
            Cell::new(course.description.as_deref().unwrap_or("")),
        ]);
    }
    table
}
