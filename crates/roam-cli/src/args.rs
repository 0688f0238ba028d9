use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{CatalogCommands, DestinationCommands, TripCommands};

/// Compose trips from a destination catalog and track them from the terminal
///
/// Roam lets you browse destinations, pick places, activities and dishes,
/// see the budget add up, and save the result as a trip that can later be
/// started and completed.
#[derive(Parser)]
#[command(version, about, name = "roam")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/roam/roam.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    /// User on whose behalf trips are created and read
    #[arg(long, global = true, default_value = "local")]
    pub user: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Browse destinations and their catalogs
    #[command(alias = "d")]
    Destination {
        #[command(subcommand)]
        command: DestinationCommands,
    },
    /// Load catalog data
    Catalog {
        #[command(subcommand)]
        command: CatalogCommands,
    },
    /// Compose, inspect and advance trips
    #[command(alias = "t")]
    Trip {
        #[command(subcommand)]
        command: TripCommands,
    },
}
