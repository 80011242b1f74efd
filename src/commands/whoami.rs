use anyhow::Result;

use crate::context::AppContext;

pub fn whoami(ctx: &AppContext) -> Result<()> {
    match ctx.auth.current_user() {
        Some(user) => {
            println!("{} <{}>", user.name, user.email);
            println!("Id:    {}", user.id);
            println!("Role:  {}", user.role);
            println!("Since: {}", user.created_at.format("%Y-%m-%d"));
        }
        None => println!("Not logged in"),
    }
    Ok(())
}
