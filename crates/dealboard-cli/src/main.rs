//! Dealboard CLI Application
//!
//! Command-line front end for the dealboard sales pipeline.

mod args;
mod cli;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands, ShowBoardArgs};
use clap::Parser;
use cli::Cli;
use dealboard_core::{display::Mask, AccessPolicy, CrmBuilder};
use log::info;
use renderer::TerminalRenderer;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        demo,
        user,
        team,
        command,
    } = Args::parse();

    let crm = CrmBuilder::new()
        .with_database_path(database_file)
        .with_user(user)
        .with_team(&team)
        .build()
        .await
        .context("Failed to open the pipeline")?;

    let renderer = TerminalRenderer::new(!no_color);
    let cli = Cli::new(
        crm,
        renderer,
        Mask::from_demo_flag(demo),
        AccessPolicy::team(&team),
    );

    info!("Dealboard started");

    match command {
        Some(Contact { command }) => cli.handle_contact_command(command).await,
        Some(Deal { command }) => cli.handle_deal_command(command).await,
        Some(Board { command }) => cli.handle_board_command(command).await,
        Some(Activity { command }) => cli.handle_activity_command(command).await,
        Some(Calendar(args)) => cli.show_calendar(&args).await,
        Some(Dashboard) => cli.show_dashboard().await,
        Some(Goals(args)) => cli.show_goals(&args).await,
        None => {
            cli.show_board(&ShowBoardArgs {
                narrow: false,
                column: None,
            })
            .await
        }
    }
}
