use crate::{
    db::{
        db::Db,
        migrations::{get_db_version, MigrationManager},
    },
    libs::messages::Message,
    msg_error, msg_info, msg_print, msg_success,
};
use anyhow::Result;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm};

#[derive(Debug, Args)]
pub struct DbArgs {
    #[command(subcommand)]
    command: Option<DbCommand>,
}

#[derive(Debug, Subcommand)]
enum DbCommand {
    /// Show the current schema version
    Status,
    /// Show the applied migration history
    History,
    /// Destroy the database and recreate it empty at the current schema
    Reset {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

pub fn cmd(args: DbArgs) -> Result<()> {
    match args.command {
        Some(DbCommand::History) => handle_history(),
        Some(DbCommand::Reset { yes }) => handle_reset(yes),
        Some(DbCommand::Status) | None => handle_status(),
    }
}

fn handle_status() -> Result<()> {
    // Opening the handle applies any pending migrations.
    let db = Db::new()?;
    let version = get_db_version(&db.conn)?;

    msg_print!(Message::DatabaseVersion(version));
    msg_info!(Message::DatabaseUpToDate);
    Ok(())
}

fn handle_history() -> Result<()> {
    let db = Db::new()?;
    let manager = MigrationManager::new();
    let history = manager.get_migration_history(&db.conn)?;

    msg_print!(Message::MigrationHistory, true);
    for (version, name, applied_at) in history {
        println!("  v{}: {} (applied: {})", version, name, applied_at);
    }
    Ok(())
}

fn handle_reset(yes: bool) -> Result<()> {
    if !yes {
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfirmResetDatabase.to_string())
            .default(false)
            .interact()?;
        if !confirmed {
            msg_info!(Message::OperationCancelled);
            return Ok(());
        }
    }

    if Db::new()?.reset() {
        msg_success!(Message::DatabaseResetCompleted);
    } else {
        msg_error!(Message::DatabaseResetFailed);
    }
    Ok(())
}
