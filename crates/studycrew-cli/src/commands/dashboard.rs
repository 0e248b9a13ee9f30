//! The `studycrew dashboard` command.

use std::path::PathBuf;

use anyhow::Result;

use studycrew_core::access::{assistant_dashboard, select_dashboard, DashboardKind};

use super::Context;

pub fn execute(config: Option<PathBuf>, json: bool) -> Result<()> {
    let ctx = Context::open(config)?;
    let user = ctx.user()?;
    let view = select_dashboard(&user);

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    println!("Welcome back, {}!", user.display_name());
    match view.kind {
        DashboardKind::Student => {
            println!("Dashboard: student (pick a course to view available assistants)");
            if let Err(denied) = assistant_dashboard(&user) {
                println!("  Assistant dashboard: {denied}");
            }
        }
        DashboardKind::Assistant => {
            println!("Dashboard: assistant (select courses you want to assist)");
        }
    }

    let years: Vec<String> = view
        .eligible_years
        .iter()
        .map(|y| format!("{} ({})", y, y.number()))
        .collect();
    println!("  Years: {}", years.join(", "));
    if let Some(year) = view.initial_year {
        println!("  Opens on: {} - {}", year, view.initial_semester);
    }
    Ok(())
}
