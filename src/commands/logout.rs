use anyhow::Result;
use colored::Colorize;

use crate::context::AppContext;

pub fn logout(ctx: &AppContext) -> Result<()> {
    match ctx.auth.current_user() {
        Some(user) => {
            ctx.auth.logout()?;
            println!("{} Logged out {}", "✓".green(), user.email);
        }
        None => println!("Not logged in"),
    }
    Ok(())
}
