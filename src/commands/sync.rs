use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::context::AppContext;

#[derive(Args)]
pub struct SyncCommand {
    /// Print the whole snapshot as JSON
    #[arg(long)]
    json: bool,
}

impl SyncCommand {
    pub async fn execute(self, ctx: &AppContext) -> Result<()> {
        let user = ctx.auth.require_user()?;

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(ProgressStyle::default_spinner().template("{spinner} {msg}")?);
        spinner.set_message("Loading data...");
        spinner.enable_steady_tick(Duration::from_millis(100));

        let result = ctx.data.refresh().await;
        spinner.finish_and_clear();
        result?;

        let state = ctx.data.snapshot();

        if self.json {
            let json = serde_json::to_string_pretty(&state).context("Failed to serialize snapshot")?;
            println!("{}", json);
            return Ok(());
        }

        let summary = state.summary();
        println!("{} Dashboard for {} ({})", "✓".green(), user.name.bold(), user.role);
        println!();
        if user.is_trainer() {
            println!("Students:             {}", summary.students);
        }
        println!("Pending workouts:     {}", summary.pending_workouts);
        println!("Completed workouts:   {}", summary.completed_workouts);
        println!("Unread notifications: {}", summary.unread_notifications);
        if let Some(weight) = state.latest_weight(&user.id) {
            println!("Latest weight:        {:.1} kg", weight);
        }
        if let Some(plan) = &state.meal_plan {
            println!("Meal plan:            {}", plan.title);
        }
        if !state.agenda.is_empty() {
            println!();
            println!("Agenda:");
            for event in &state.agenda {
                println!("  {}  {} @ {}", event.date, event.title, event.location);
            }
        }

        Ok(())
    }
}
