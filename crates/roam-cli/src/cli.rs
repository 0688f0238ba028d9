//! Command-line argument definitions and the command handlers behind them.
//!
//! Argument structs carry the clap derives and convert into core types, so
//! `roam-core` stays free of CLI concerns:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params / Options → roam-core
//! ```

use std::{fmt::Display, path::PathBuf, sync::Arc, time::Duration};

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use log::{debug, info, warn};
use roam_core::{
    display::{
        CatalogView, CompositionView, Destinations, OperationStatus, TransitionResult,
        TripSummaries,
    },
    params::Id,
    AttachFailurePolicy, Caller, CatalogSeed, CatalogSnapshot, CatalogSource, Category,
    CompositionSession, Hydrator, ItemRef, LifecycleController, SqliteStore, SubmitOptions,
    SubmitOutcome, TripOrchestrator, TripStore,
};
use tokio_util::sync::CancellationToken;

use crate::renderer::TerminalRenderer;

/// Show a destination with its catalog
#[derive(Args)]
pub struct ShowDestinationArgs {
    #[arg(help = "Unique identifier of the destination to show")]
    pub id: u64,
}

impl From<ShowDestinationArgs> for Id {
    fn from(val: ShowDestinationArgs) -> Self {
        Id { id: val.id }
    }
}

#[derive(Subcommand)]
pub enum DestinationCommands {
    /// List all destinations
    #[command(aliases = ["l", "ls"])]
    List,
    /// Show a destination with its places, activities and dishes
    #[command(alias = "s")]
    Show(ShowDestinationArgs),
}

/// Import catalog data from a JSON file
///
/// The file holds `destinations`, `places`, `activities` and `culinary`
/// lists with explicit ids. Existing rows with the same id are updated.
#[derive(Args)]
pub struct ImportCatalogArgs {
    #[arg(help = "Path to a catalog JSON file")]
    pub file: PathBuf,
}

#[derive(Subcommand)]
pub enum CatalogCommands {
    /// Import destinations and catalog items from a JSON file
    Import(ImportCatalogArgs),
}

/// Compose a trip for a destination and save it
///
/// Every listed item is selected, the budget is shown, and the trip is
/// created with all selected items attached. Press Ctrl-C to cancel a
/// submission that is in progress.
#[derive(Args)]
pub struct ComposeTripArgs {
    #[arg(help = "Destination to compose the trip for")]
    pub destination_id: u64,
    #[arg(
        short,
        long = "place",
        value_delimiter = ',',
        help = "Place IDs to include, as a comma-separated list"
    )]
    pub places: Vec<u64>,
    #[arg(
        short,
        long = "activity",
        value_delimiter = ',',
        help = "Activity IDs to include, as a comma-separated list"
    )]
    pub activities: Vec<u64>,
    #[arg(
        short,
        long = "dish",
        value_delimiter = ',',
        help = "Dish IDs to include, as a comma-separated list"
    )]
    pub dishes: Vec<u64>,
    /// Trip name, defaults to "Trip to <destination>"
    #[arg(short, long)]
    pub name: Option<String>,
    /// Show the composition and budget without saving anything
    #[arg(long)]
    pub dry_run: bool,
    /// Seconds to wait for each request before giving up on it
    #[arg(long, default_value_t = 10)]
    pub timeout_secs: u64,
    /// Delete the trip again if any item fails to attach
    #[arg(long)]
    pub delete_on_failure: bool,
}

impl ComposeTripArgs {
    /// Selected items in the order they were given, per category.
    fn items(&self) -> impl Iterator<Item = ItemRef> + '_ {
        let places = self.places.iter().map(|&id| ItemRef::new(Category::Place, id));
        let activities = self
            .activities
            .iter()
            .map(|&id| ItemRef::new(Category::Activity, id));
        let dishes = self
            .dishes
            .iter()
            .map(|&id| ItemRef::new(Category::Culinary, id));
        places.chain(activities).chain(dishes)
    }
}

impl From<&ComposeTripArgs> for SubmitOptions {
    fn from(val: &ComposeTripArgs) -> Self {
        let policy = if val.delete_on_failure {
            AttachFailurePolicy::DeleteTrip
        } else {
            AttachFailurePolicy::KeepPartial
        };
        SubmitOptions::default()
            .with_request_timeout(Duration::from_secs(val.timeout_secs))
            .with_failure_policy(policy)
    }
}

/// Show a trip with everything attached to it
#[derive(Args)]
pub struct ShowTripArgs {
    #[arg(help = "Unique identifier of the trip to show")]
    pub id: u64,
}

impl From<ShowTripArgs> for Id {
    fn from(val: ShowTripArgs) -> Self {
        Id { id: val.id }
    }
}

/// Move a trip one step forward: planned → ongoing → completed
#[derive(Args)]
pub struct AdvanceTripArgs {
    #[arg(help = "Unique identifier of the trip to advance")]
    pub id: u64,
}

impl From<AdvanceTripArgs> for Id {
    fn from(val: AdvanceTripArgs) -> Self {
        Id { id: val.id }
    }
}

#[derive(Subcommand)]
pub enum TripCommands {
    /// Compose and save a new trip
    #[command(alias = "c")]
    Compose(ComposeTripArgs),
    /// List your trips
    #[command(aliases = ["l", "ls"])]
    List,
    /// Show a trip with its places, activities and dishes
    #[command(alias = "s")]
    Show(ShowTripArgs),
    /// Move a trip to its next status
    #[command(alias = "a")]
    Advance(AdvanceTripArgs),
}

/// Runs commands against a store on behalf of one caller.
pub struct Cli {
    store: SqliteStore,
    renderer: TerminalRenderer,
    caller: Caller,
}

impl Cli {
    pub fn new(store: SqliteStore, renderer: TerminalRenderer, caller: Caller) -> Self {
        Self {
            store,
            renderer,
            caller,
        }
    }

    fn show(&self, value: impl Display) -> Result<()> {
        self.renderer.render(&value.to_string())
    }

    pub async fn handle_destination_command(&self, command: DestinationCommands) -> Result<()> {
        match command {
            DestinationCommands::List => {
                let destinations = self
                    .store
                    .list_destinations()
                    .await
                    .context("Failed to list destinations")?;
                self.show(Destinations(destinations))
            }
            DestinationCommands::Show(args) => {
                let Id { id } = args.into();
                let snapshot = CatalogSnapshot::load(&self.store, id).await?;
                self.show(CatalogView::new(&snapshot))
            }
        }
    }

    pub async fn handle_catalog_command(&self, command: CatalogCommands) -> Result<()> {
        match command {
            CatalogCommands::Import(args) => {
                let raw = std::fs::read_to_string(&args.file)
                    .with_context(|| format!("Failed to read {}", args.file.display()))?;
                let seed: CatalogSeed = serde_json::from_str(&raw)
                    .with_context(|| format!("Invalid catalog file {}", args.file.display()))?;

                let rows = self.store.import_catalog(seed).await?;
                info!("Imported {rows} catalog rows from {}", args.file.display());
                self.renderer.render_status(&OperationStatus::success(format!(
                    "Imported {rows} catalog row(s) from {}",
                    args.file.display()
                )))
            }
        }
    }

    pub async fn handle_trip_command(&self, command: TripCommands) -> Result<()> {
        match command {
            TripCommands::Compose(args) => self.compose_trip(args).await,
            TripCommands::List => self.list_trips().await,
            TripCommands::Show(args) => {
                let Id { id } = args.into();
                let details = Hydrator::new(&self.store).hydrate(&self.caller, id).await?;
                self.show(details)
            }
            TripCommands::Advance(args) => {
                let Id { id } = args.into();
                self.advance_trip(id).await
            }
        }
    }

    pub async fn list_trips(&self) -> Result<()> {
        let trips = self
            .store
            .list_trips(&self.caller)
            .await
            .context("Failed to list trips")?;
        self.show(TripSummaries(trips))
    }

    async fn compose_trip(&self, args: ComposeTripArgs) -> Result<()> {
        let snapshot = CatalogSnapshot::load(&self.store, args.destination_id).await?;
        let mut session = CompositionSession::new(self.caller.clone(), Arc::new(snapshot));

        for item in args.items() {
            // A repeated id would deselect the item again
            if session.selection().contains(item) {
                debug!("Ignoring repeated {} {}", item.category, item.id);
                continue;
            }
            session.toggle(item.category, item.id)?;
        }
        if let Some(name) = &args.name {
            session.rename(name.as_str())?;
        }

        self.show(CompositionView(&session))?;
        if args.dry_run {
            return Ok(());
        }

        let token = CancellationToken::new();
        let interrupt = tokio::spawn({
            let token = token.clone();
            async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    warn!("Interrupted, cancelling submission");
                    token.cancel();
                }
            }
        });

        let options = SubmitOptions::from(&args);
        let result = TripOrchestrator::new(&self.store, options)
            .submit(&mut session, &token)
            .await;
        interrupt.abort();
        let report = match result {
            Ok(report) => report,
            Err(e) if e.is_retryable() => {
                return Err(anyhow::Error::new(e)
                    .context("Nothing was saved; run the same command again to retry"));
            }
            Err(e) => return Err(e.into()),
        };

        println!();
        self.renderer.render_status(&OperationStatus::from(&report))?;
        println!();
        self.show(&report)?;

        match report.outcome() {
            SubmitOutcome::Complete => Ok(()),
            SubmitOutcome::Partial => bail!(
                "{} of {} item(s) could not be attached to trip {}",
                report.failures().count(),
                report.attachments.len(),
                report.trip.id
            ),
            SubmitOutcome::Cancelled => bail!("Submission of trip {} was cancelled", report.trip.id),
            SubmitOutcome::Compensated => bail!("Trip {} was not saved", report.trip.id),
        }
    }

    async fn advance_trip(&self, id: u64) -> Result<()> {
        let (transition, details) = LifecycleController::new(&self.store, &self.caller)
            .advance(id)
            .await?;
        self.show(TransitionResult {
            from: transition.from(),
            details,
        })
    }
}
