use anyhow::Result;
use clap::Args;
use colored::Colorize;
use dialoguer::{Input, Password};

use crate::auth::RegisterRequest;
use crate::context::AppContext;

#[derive(Args)]
pub struct RegisterCommand {
    /// Full name
    #[arg(short, long)]
    name: Option<String>,

    /// Phone number
    #[arg(short, long)]
    phone: Option<String>,
}

impl RegisterCommand {
    pub fn execute(self, ctx: &AppContext) -> Result<()> {
        println!("Trainer Link - Create trainer account");
        println!();

        let name = match self.name {
            Some(name) => name,
            None => Input::<String>::new().with_prompt("Name").interact_text()?,
        };
        let phone = match self.phone {
            Some(phone) => phone,
            None => Input::<String>::new().with_prompt("Phone").interact_text()?,
        };
        let password = Password::new().with_prompt("Password").interact()?;
        let confirm_password = Password::new().with_prompt("Confirm password").interact()?;

        let user = ctx.auth.register_account(RegisterRequest {
            name,
            phone,
            password,
            confirm_password,
        })?;

        println!("{} Account created!", "✓".green());
        println!("Login with: {}", user.email.bold());
        Ok(())
    }
}
