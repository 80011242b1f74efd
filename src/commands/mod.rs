mod config_cmd;
mod login;
mod logout;
mod notifications;
mod progress;
mod register;
mod student;
mod sync;
mod whoami;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::Config;
use crate::context::AppContext;

pub use login::LoginCommand;
pub use notifications::NotificationsCommand;
pub use register::RegisterCommand;
pub use student::AddStudentCommand;
pub use sync::SyncCommand;

#[derive(Parser)]
#[command(name = "trainer-link")]
#[command(about = "Trainer and student dashboards over a mock data set", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(long, global = true, env = "TRAINER_LINK_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Login with email and password
    Login(LoginCommand),

    /// Forget the saved session
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Create a trainer account
    Register(RegisterCommand),

    /// Load the dashboard data for the signed-in user
    Sync(SyncCommand),

    /// List notifications
    Notifications(NotificationsCommand),

    /// Manage students
    #[command(subcommand)]
    Student(StudentSubcommands),

    /// Weight progress
    #[command(subcommand)]
    Progress(ProgressSubcommands),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigSubcommands),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand)]
enum StudentSubcommands {
    /// Add a student and generate their login
    Add(AddStudentCommand),
}

#[derive(Subcommand)]
enum ProgressSubcommands {
    /// Show the weight history
    Show {
        /// Student id (defaults to the signed-in user)
        #[arg(short, long)]
        student: Option<String>,
    },

    /// Record a weigh-in for this session
    Log {
        /// Weight in kg
        #[arg(short, long)]
        weight: f64,

        /// Date of the weigh-in (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,

        /// Student id (defaults to the signed-in user)
        #[arg(short, long)]
        student: Option<String>,
    },
}

#[derive(Subcommand)]
enum ConfigSubcommands {
    /// Show current configuration
    Show,

    /// Initialize configuration with defaults
    Init {
        /// Overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

impl Cli {
    pub fn verbose(&self) -> bool {
        self.verbose
    }

    fn config_path(&self) -> Result<PathBuf> {
        match &self.config {
            Some(path) => Ok(path.clone()),
            None => Config::config_file(),
        }
    }

    pub fn load_config(&self) -> Result<Config> {
        Config::load_from(&self.config_path()?)
    }

    pub async fn execute(self, config: Config) -> Result<()> {
        if self.verbose {
            tracing::info!("Verbose mode enabled");
        }

        let config_path = self.config_path()?;

        match self.command {
            Commands::Config(subcmd) => match subcmd {
                ConfigSubcommands::Show => config_cmd::show_config(&config),
                ConfigSubcommands::Init { force } => config_cmd::init_config(&config_path, force),
            },
            Commands::Completions { shell } => {
                generate_completions(shell);
                Ok(())
            }
            command => {
                let ctx = AppContext::from_config(config)?;
                let result = run(command, &ctx).await;
                ctx.shutdown()?;
                result
            }
        }
    }
}

async fn run(command: Commands, ctx: &AppContext) -> Result<()> {
    ctx.auth.restore()?;

    match command {
        Commands::Login(cmd) => cmd.execute(ctx).await,
        Commands::Logout => logout::logout(ctx),
        Commands::Whoami => whoami::whoami(ctx),
        Commands::Register(cmd) => cmd.execute(ctx),
        Commands::Sync(cmd) => cmd.execute(ctx).await,
        Commands::Notifications(cmd) => cmd.execute(ctx).await,
        Commands::Student(StudentSubcommands::Add(cmd)) => cmd.execute(ctx),
        Commands::Progress(subcmd) => match subcmd {
            ProgressSubcommands::Show { student } => progress::show(ctx, student).await,
            ProgressSubcommands::Log {
                weight,
                date,
                student,
            } => progress::log(ctx, weight, date, student).await,
        },
        Commands::Config(_) | Commands::Completions { .. } => Ok(()),
    }
}

fn generate_completions(shell: clap_complete::Shell) {
    use clap::CommandFactory;
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}
