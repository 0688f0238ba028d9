//! Roam CLI
//!
//! Command-line front end for composing, saving and tracking trips.

mod args;
mod cli;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use renderer::TerminalRenderer;
use roam_core::{Caller, StoreBuilder};
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        user,
        command,
    } = Args::parse();

    let store = StoreBuilder::new()
        .with_database_path(database_file)
        .build()
        .await
        .context("Failed to open trip database")?;

    info!(
        "Roam started for user {user}, database {}",
        store.database_path().display()
    );

    let cli = Cli::new(store, TerminalRenderer::new(!no_color), Caller::new(user));

    match command {
        Some(Destination { command }) => cli.handle_destination_command(command).await,
        Some(Catalog { command }) => cli.handle_catalog_command(command).await,
        Some(Trip { command }) => cli.handle_trip_command(command).await,
        None => cli.list_trips().await,
    }
}
