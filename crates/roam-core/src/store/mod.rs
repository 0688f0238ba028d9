//! Backing store abstraction for the catalog read API and the trip read/write
//! API.
//!
//! The composition workflow only talks to these traits, so the SQLite store in
//! [`sqlite`] can be swapped for a remote API client or a test double without
//! touching the orchestrator, lifecycle controller or hydrator.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Orchestrator   │    │   TripStore /   │    │   SqliteStore   │
//! │  Lifecycle      │───▶│  CatalogSource  │───▶│  (db/ queries)  │
//! │  Hydrator       │    │    (traits)     │    │                 │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    error::Result,
    models::{Activity, CulinaryItem, Destination, Place, Trip, TripItem, TripSummary},
    params::{AttachItem, Caller, CreateTrip, UpdateTripStatus},
};

pub mod builder;
pub mod sqlite;

pub use builder::StoreBuilder;
pub use sqlite::SqliteStore;

/// Read-only access to destinations and their catalog items.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// All destinations, ordered by name.
    async fn list_destinations(&self) -> Result<Vec<Destination>>;

    /// A single destination, or `None` if it does not exist.
    async fn get_destination(&self, id: u64) -> Result<Option<Destination>>;

    async fn list_places(&self, destination_id: u64) -> Result<Vec<Place>>;

    async fn list_activities(&self, destination_id: u64) -> Result<Vec<Activity>>;

    async fn list_culinary(&self, destination_id: u64) -> Result<Vec<CulinaryItem>>;
}

/// Trip read/write operations, always scoped to the calling user.
#[async_trait]
pub trait TripStore: Send + Sync {
    /// Creates a trip in the `planned` status.
    async fn create_trip(&self, caller: &Caller, request: &CreateTrip) -> Result<Trip>;

    /// Links one catalog item to an existing trip.
    async fn attach_item(&self, caller: &Caller, request: &AttachItem) -> Result<TripItem>;

    /// Reads a trip with its raw item records, or `None` if the caller has no
    /// such trip.
    async fn get_trip_details(
        &self,
        caller: &Caller,
        trip_id: u64,
    ) -> Result<Option<TripDetailsResponse>>;

    /// Applies a forward status change. The store is the source of truth for
    /// whether the transition is still valid.
    async fn update_trip_status(&self, caller: &Caller, request: &UpdateTripStatus)
        -> Result<Trip>;

    /// Removes a trip and its items.
    async fn delete_trip(&self, caller: &Caller, trip_id: u64) -> Result<()>;

    /// The caller's trips, newest first.
    async fn list_trips(&self, caller: &Caller) -> Result<Vec<TripSummary>>;
}

/// Trip details as returned by a backing store, before normalisation.
///
/// Item records may be flat catalog rows or join rows nesting the catalog row
/// under its category key, and a category list may be missing altogether.
/// [`crate::hydrator`] turns this into a [`crate::models::TripDetails`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TripDetailsResponse {
    pub trip: Trip,
    #[serde(default)]
    pub places: Option<Vec<Value>>,
    #[serde(default)]
    pub activities: Option<Vec<Value>>,
    #[serde(default)]
    pub culinary: Option<Vec<Value>>,
}
