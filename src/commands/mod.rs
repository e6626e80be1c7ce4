pub mod category;
pub mod database;
pub mod settings;
pub mod stats;
pub mod task;
pub mod template;

use crate::libs::messages::macros::is_debug_mode;
use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Manage tasks")]
    Task(task::TaskArgs),
    #[command(about = "Manage categories")]
    Category(category::CategoryArgs),
    #[command(about = "Manage task templates")]
    Template(template::TemplateArgs),
    #[command(about = "Show or change settings")]
    Settings(settings::SettingsArgs),
    #[command(about = "Daily completion statistics")]
    Stats(stats::StatsArgs),
    #[command(about = "Database maintenance")]
    Db(database::DbArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn menu() -> Result<()> {
        if is_debug_mode() {
            let filter = tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug"));
            let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
        }

        let cli = Self::parse();
        match cli.command {
            Commands::Task(args) => task::cmd(args),
            Commands::Category(args) => category::cmd(args),
            Commands::Template(args) => template::cmd(args),
            Commands::Settings(args) => settings::cmd(args),
            Commands::Stats(args) => stats::cmd(args),
            Commands::Db(args) => database::cmd(args),
        }
    }
}
