//! Core library for Roam: composing, budgeting and persisting trips.
//!
//! A traveler opens a destination, toggles places, activities and dishes, and
//! watches the budget update as they go. Submitting the composition creates a
//! trip and attaches every selected item to it; the trip can then be read
//! back and moved through its lifecycle.
//!
//! ```text
//! CatalogSnapshot ──▶ CompositionSession ──▶ TripOrchestrator ──▶ Hydrator
//!                     (selection, budget)    (create, attach)     (read back)
//!                                                                    ▲
//!                                            LifecycleController ────┘
//! ```
//!
//! All I/O goes through the [`store::CatalogSource`] and [`store::TripStore`]
//! traits. [`store::SqliteStore`] implements both on a local database file.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use roam_core::{
//!     CatalogSnapshot, Caller, Category, CompositionSession, StoreBuilder, SubmitOptions,
//!     TripOrchestrator,
//! };
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = StoreBuilder::new()
//!     .with_database_path(Some("roam.db"))
//!     .build()
//!     .await?;
//!
//! let snapshot = CatalogSnapshot::load(&store, 1).await?;
//! let mut session = CompositionSession::new(Caller::new("alice"), Arc::new(snapshot));
//! session.toggle(Category::Activity, 4)?;
//! println!("Budget so far: {}", session.budget().total);
//!
//! let report = TripOrchestrator::new(&store, SubmitOptions::default())
//!     .submit(&mut session, &CancellationToken::new())
//!     .await?;
//! println!("{:?}", report.outcome());
//! # Ok(())
//! # }
//! ```

pub mod budget;
pub mod db;
pub mod display;
pub mod error;
pub mod hydrator;
pub mod lifecycle;
pub mod models;
pub mod orchestrator;
pub mod params;
pub mod selection;
pub mod snapshot;
pub mod store;

// Re-export commonly used types
pub use budget::BudgetBreakdown;
pub use db::Database;
pub use error::{Result, RoamError};
pub use hydrator::{Hydrator, JoinRecord};
pub use lifecycle::{available_transition, LifecycleController};
pub use models::{
    Activity, CatalogItem, CatalogSeed, Category, CulinaryItem, Destination, ItemRef, Money,
    Place, SubmissionPhase, Transition, Trip, TripDetails, TripItem, TripStatus, TripSummary,
};
pub use orchestrator::{
    AttachFailurePolicy, AttachOutcome, AttachStatus, SubmitOptions, SubmitOutcome, SubmitReport,
    TripOrchestrator,
};
pub use params::Caller;
pub use selection::{CompositionSession, SelectionSet};
pub use snapshot::CatalogSnapshot;
pub use store::{CatalogSource, SqliteStore, StoreBuilder, TripDetailsResponse, TripStore};
