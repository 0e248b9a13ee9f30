//! The `studycrew assigned` and `studycrew assign` commands.

use std::path::PathBuf;

use anyhow::{bail, Result};
use comfy_table::{Cell, Table};

use studycrew_client::dashboard::{load_editor, submit_selection};
use studycrew_core::access::assistant_dashboard;
use studycrew_core::traits::StudyCrewApi;

use super::Context;

pub async fn assigned(config: Option<PathBuf>) -> Result<()> {
    let ctx = Context::open(config)?;
    let user = ctx.user()?;
    assistant_dashboard(&user)?;

    let assigned = ctx.api.assigned_courses(user.id).await?;
    if assigned.is_empty() {
        println!("You are not assisting any courses yet.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Code", "Name", "Year", "Semester", "Special"]);
    for entry in &assigned {
        table.add_row(vec![
            Cell::new(&entry.course.code),
            Cell::new(&entry.course.name),
            Cell::new(&entry.course.year),
            Cell::new(entry.course.semester),
            Cell::new(if entry.is_special { "⭐" } else { "" }),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub async fn execute(
    config: Option<PathBuf>,
    add: Vec<String>,
    remove: Vec<String>,
    special: Vec<String>,
    unspecial: Vec<String>,
) -> Result<()> {
    let ctx = Context::open(config)?;
    let user = ctx.user()?;
    assistant_dashboard(&user)?;

    let mut editor = load_editor(ctx.api.as_ref(), &user).await?;

    for code in &add {
        if !editor.is_selected(code) {
            editor.toggle_course(code);
        }
    }
    for code in &remove {
        if editor.is_selected(code) {
            editor.toggle_course(code);
        }
    }
    for code in &special {
        if !editor.is_special(code) && editor.toggle_special(code).is_none() {
            bail!("{code} is not selected; add it before marking it special");
        }
    }
    for code in &unspecial {
        if editor.is_special(code) {
            editor.toggle_special(code);
        }
    }

    if editor.diff().is_empty() {
        println!("No changes.");
        return Ok(());
    }

    let selected = editor.selection().courses.len();
    println!(
        "{selected} course{} selected",
        if selected == 1 { "" } else { "s" }
    );
    let message = submit_selection(ctx.api.as_ref(), &user, &mut editor).await?;
    println!("{message}");
    Ok(())
}
