use anyhow::Result;
use clap::Args;
use colored::Colorize;
use dialoguer::{Input, Password};

use crate::auth::LoginRequest;
use crate::context::AppContext;

#[derive(Args)]
pub struct LoginCommand {
    /// Account email
    #[arg(short, long)]
    email: Option<String>,

    /// Account password
    #[arg(long, env = "TRAINER_LINK_PASSWORD", hide_env_values = true)]
    password: Option<String>,
}

impl LoginCommand {
    pub async fn execute(self, ctx: &AppContext) -> Result<()> {
        println!("Trainer Link - Login");
        println!();

        let email = match self.email {
            Some(email) => email,
            None => Input::<String>::new().with_prompt("Email").interact_text()?,
        };
        let password = match self.password {
            Some(password) => password,
            None => Password::new().with_prompt("Password").interact()?,
        };

        match ctx.auth.login(&LoginRequest::new(email, password)).await {
            Ok(session) => {
                println!("{} Login successful!", "✓".green());
                println!();
                println!("Welcome, {}!", session.user.name);
                println!("Role: {}", session.user.role);
                Ok(())
            }
            Err(e) => {
                println!("{} Login failed: {}", "✗".red(), e);
                Err(e.into())
            }
        }
    }
}
