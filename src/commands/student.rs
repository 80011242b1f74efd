use anyhow::{bail, Result};
use clap::Args;
use colored::Colorize;

use crate::context::AppContext;
use crate::services::NewStudent;

#[derive(Args)]
pub struct AddStudentCommand {
    /// Student's full name
    #[arg(short, long)]
    name: String,

    /// Student's phone number
    #[arg(short, long)]
    phone: String,

    /// Training goal
    #[arg(short, long, default_value = "")]
    goal: String,
}

impl AddStudentCommand {
    pub fn execute(self, ctx: &AppContext) -> Result<()> {
        let user = ctx.auth.require_user()?;
        if !user.is_trainer() {
            bail!("Only trainers can add students");
        }

        let credentials = ctx.data.add_student(NewStudent {
            name: self.name.clone(),
            phone: self.phone,
            goal: self.goal,
        })?;

        println!("{} {} added", "✓".green(), self.name);
        println!();
        println!("Share these credentials with the student:");
        println!("  Email:    {}", credentials.email.bold());
        println!("  Password: {}", credentials.password.bold());
        Ok(())
    }
}
