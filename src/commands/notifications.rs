use anyhow::Result;
use clap::Args;
use colored::Colorize;

use crate::context::AppContext;

#[derive(Args)]
pub struct NotificationsCommand {
    /// Only show unread notifications
    #[arg(short, long)]
    unread: bool,
}

impl NotificationsCommand {
    pub async fn execute(self, ctx: &AppContext) -> Result<()> {
        ctx.auth.require_user()?;
        ctx.data.refresh().await?;

        let notifications: Vec<_> = ctx
            .data
            .snapshot()
            .notifications
            .into_iter()
            .filter(|n| !self.unread || !n.read)
            .collect();

        if notifications.is_empty() {
            println!("No notifications");
            return Ok(());
        }

        for n in notifications {
            let marker = if n.read { " ".normal() } else { "●".yellow() };
            println!("{} {}  {}", marker, n.date.format("%d/%m %H:%M"), n.title.bold());
            println!("    {}", n.message.replace('\n', "\n    "));
        }
        Ok(())
    }
}
