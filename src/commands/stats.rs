use crate::{
    libs::{
        messages::Message,
        state::{AppState, STATS_WINDOW_DAYS},
        view::View,
    },
    msg_info, msg_print, msg_success,
};
use anyhow::Result;
use chrono::Local;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct StatsArgs {
    #[command(subcommand)]
    command: Option<StatsCommand>,
}

#[derive(Debug, Subcommand)]
enum StatsCommand {
    /// Recompute and show today's statistics
    Today,
    /// Show the trailing statistics window
    Window,
    /// Recompute today's statistics without showing them
    Recompute,
}

pub fn cmd(args: StatsArgs) -> Result<()> {
    let mut state = AppState::new()?;

    match args.command {
        Some(StatsCommand::Today) => handle_today(&mut state),
        Some(StatsCommand::Recompute) => handle_recompute(&mut state),
        Some(StatsCommand::Window) | None => handle_window(&mut state),
    }
}

fn handle_today(state: &mut AppState) -> Result<()> {
    state.recompute_stats()?;

    let today = Local::now().date_naive();
    match state.stats_window.iter().find(|day| day.date == today) {
        Some(day) => {
            msg_print!(Message::StatsHeader(today.to_string()), true);
            View::stats(std::slice::from_ref(day))?;
        }
        None => msg_info!(Message::NoStatsForDate(today.to_string())),
    }
    Ok(())
}

fn handle_window(state: &mut AppState) -> Result<()> {
    // Refresh today's row so the window never ends on stale data.
    state.recompute_stats()?;

    if state.stats_window.is_empty() {
        msg_info!(Message::NoStatsForDate(Local::now().date_naive().to_string()));
        return Ok(());
    }

    msg_print!(Message::StatsWindowHeader(STATS_WINDOW_DAYS as usize), true);
    View::stats(&state.stats_window)?;
    Ok(())
}

fn handle_recompute(state: &mut AppState) -> Result<()> {
    state.recompute_stats()?;
    msg_success!(Message::StatsRecomputed(Local::now().date_naive().to_string()));
    Ok(())
}
