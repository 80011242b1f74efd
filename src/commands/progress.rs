use anyhow::{anyhow, Result};
use chrono::Utc;
use colored::Colorize;

use crate::context::AppContext;
use crate::models::WeightEntry;

fn target_student(ctx: &AppContext, student: Option<String>) -> Result<String> {
    let user = ctx.auth.require_user()?;
    Ok(student.unwrap_or(user.id))
}

pub async fn show(ctx: &AppContext, student: Option<String>) -> Result<()> {
    let student_id = target_student(ctx, student)?;
    ctx.data.refresh().await?;

    let state = ctx.data.snapshot();
    let progress = state
        .progress
        .get(&student_id)
        .ok_or_else(|| anyhow!("No progress recorded for {}", student_id))?;

    println!("Weight history for {}", student_id);
    println!();
    for entry in &progress.weight {
        println!("  {}  {:.1} kg", entry.date, entry.value);
    }
    for measurement in &progress.measurements {
        println!("  {}: {}", measurement.label, measurement.value);
    }
    Ok(())
}

pub async fn log(
    ctx: &AppContext,
    weight: f64,
    date: Option<String>,
    student: Option<String>,
) -> Result<()> {
    let student_id = target_student(ctx, student)?;
    ctx.data.refresh().await?;

    let date = date.unwrap_or_else(|| Utc::now().format("%Y-%m-%d").to_string());
    let reminder = ctx.data.log_progress(
        &student_id,
        WeightEntry {
            date: date.clone(),
            value: weight,
        },
    );

    println!("{} Recorded {:.1} kg on {}", "✓".green(), weight, date);
    if let Some(reminder) = reminder {
        println!("Next weigh-in reminder: {}", reminder.date.format("%Y-%m-%d"));
    }
    println!(
        "{}",
        "Weigh-ins are kept for this session only and are not written back to the data set."
            .dimmed()
    );
    Ok(())
}
