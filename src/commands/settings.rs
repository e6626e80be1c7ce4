use crate::{
    db::{db::Db, settings::Settings},
    libs::{messages::Message, view::View},
    msg_error, msg_print, msg_success,
};
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct SettingsArgs {
    #[command(subcommand)]
    command: Option<SettingsCommand>,
}

#[derive(Debug, Subcommand)]
enum SettingsCommand {
    /// Show the current settings
    Show,
    /// Change one setting
    Set {
        /// Setting key: theme, locale, date_format, default_view, calendar_view or week_start
        key: String,
        /// New value
        value: String,
    },
}

pub fn cmd(args: SettingsArgs) -> Result<()> {
    match args.command {
        Some(SettingsCommand::Set { key, value }) => handle_set(key, value),
        Some(SettingsCommand::Show) | None => handle_show(),
    }
}

fn handle_show() -> Result<()> {
    let db = Db::new()?;
    let settings = Settings::new(&db).get()?;

    msg_print!(Message::SettingsHeader, true);
    View::settings(&settings)?;
    Ok(())
}

fn handle_set(key: String, value: String) -> Result<()> {
    let db = Db::new()?;
    let mut repo = Settings::new(&db);
    let mut settings = repo.get()?;

    match key.as_str() {
        "theme" => match value.as_str() {
            "light" | "dark" => settings.theme = value,
            _ => {
                msg_error!(Message::InvalidSettingValue(key, value));
                return Ok(());
            }
        },
        "locale" => settings.locale = value,
        "date_format" => settings.date_format = value,
        "default_view" => match value.as_str() {
            "list" | "calendar" => settings.default_view = value,
            _ => {
                msg_error!(Message::InvalidSettingValue(key, value));
                return Ok(());
            }
        },
        "calendar_view" => match value.as_str() {
            "month" | "week" | "day" => settings.calendar_view = value,
            _ => {
                msg_error!(Message::InvalidSettingValue(key, value));
                return Ok(());
            }
        },
        "week_start" => match value.parse::<u8>() {
            Ok(day) if day <= 6 => settings.week_start = day,
            _ => {
                msg_error!(Message::InvalidWeekStart(value));
                return Ok(());
            }
        },
        _ => {
            msg_error!(Message::UnknownSettingKey(key));
            return Ok(());
        }
    }

    repo.save(&settings)?;
    msg_success!(Message::SettingsSaved);
    Ok(())
}
