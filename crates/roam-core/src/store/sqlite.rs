//! SQLite-backed implementation of the store traits.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use tokio::task;

use super::{CatalogSource, TripDetailsResponse, TripStore};
use crate::{
    db::Database,
    error::{RoamError, Result},
    models::{
        Activity, CatalogSeed, Category, CulinaryItem, Destination, Place, Trip, TripItem,
        TripSummary,
    },
    params::{AttachItem, Caller, CreateTrip, UpdateTripStatus},
};

/// Store backed by a local SQLite file.
///
/// Each operation opens its own connection on the blocking thread pool, so the
/// store is cheap to clone and safe to share between tasks.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pub(crate) db_path: PathBuf,
}

impl SqliteStore {
    pub(crate) fn new(db_path: PathBuf) -> Self {
        Self { db_path }
    }

    /// Path of the database file.
    pub fn database_path(&self) -> &Path {
        &self.db_path
    }

    /// Runs `f` against a fresh connection on the blocking pool.
    async fn with_db<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
    {
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            f(&mut db)
        })
        .await
        .map_err(RoamError::join)?
    }

    /// Upserts a catalog seed, returning the number of rows written.
    pub async fn import_catalog(&self, seed: CatalogSeed) -> Result<usize> {
        let count = self.with_db(move |db| db.import_catalog(&seed)).await?;
        log::info!("Imported {count} catalog rows");
        Ok(count)
    }
}

#[async_trait]
impl CatalogSource for SqliteStore {
    async fn list_destinations(&self) -> Result<Vec<Destination>> {
        self.with_db(|db| db.list_destinations()).await
    }

    async fn get_destination(&self, id: u64) -> Result<Option<Destination>> {
        self.with_db(move |db| db.get_destination(id)).await
    }

    async fn list_places(&self, destination_id: u64) -> Result<Vec<Place>> {
        self.with_db(move |db| db.list_places(destination_id)).await
    }

    async fn list_activities(&self, destination_id: u64) -> Result<Vec<Activity>> {
        self.with_db(move |db| db.list_activities(destination_id))
            .await
    }

    async fn list_culinary(&self, destination_id: u64) -> Result<Vec<CulinaryItem>> {
        self.with_db(move |db| db.list_culinary(destination_id)).await
    }
}

#[async_trait]
impl TripStore for SqliteStore {
    async fn create_trip(&self, caller: &Caller, request: &CreateTrip) -> Result<Trip> {
        let user_id = caller.user_id().to_string();
        let request = request.clone();

        let trip = self
            .with_db(move |db| {
                db.create_trip(
                    &user_id,
                    request.destination_id,
                    &request.name,
                    request.total_budget,
                )
            })
            .await?;
        log::debug!("Created trip {} for user {}", trip.id, trip.user_id);
        Ok(trip)
    }

    async fn attach_item(&self, caller: &Caller, request: &AttachItem) -> Result<TripItem> {
        let user_id = caller.user_id().to_string();
        let trip_id = request.trip_id;
        let item = request.item;

        self.with_db(move |db| db.attach_item(&user_id, trip_id, item))
            .await
    }

    async fn get_trip_details(
        &self,
        caller: &Caller,
        trip_id: u64,
    ) -> Result<Option<TripDetailsResponse>> {
        let user_id = caller.user_id().to_string();

        self.with_db(move |db| {
            let Some(trip) = db.get_trip(&user_id, trip_id)? else {
                return Ok(None);
            };

            let records = |category: Category| -> Result<Option<Vec<Value>>> {
                db.trip_item_records(trip_id, category).map(Some)
            };

            Ok(Some(TripDetailsResponse {
                places: records(Category::Place)?,
                activities: records(Category::Activity)?,
                culinary: records(Category::Culinary)?,
                trip,
            }))
        })
        .await
    }

    async fn update_trip_status(
        &self,
        caller: &Caller,
        request: &UpdateTripStatus,
    ) -> Result<Trip> {
        let user_id = caller.user_id().to_string();
        let trip_id = request.trip_id;
        let transition = request.transition;

        self.with_db(move |db| db.update_trip_status(&user_id, trip_id, transition))
            .await
    }

    async fn delete_trip(&self, caller: &Caller, trip_id: u64) -> Result<()> {
        let user_id = caller.user_id().to_string();

        self.with_db(move |db| db.delete_trip(&user_id, trip_id))
            .await
    }

    async fn list_trips(&self, caller: &Caller) -> Result<Vec<TripSummary>> {
        let user_id = caller.user_id().to_string();

        self.with_db(move |db| db.list_trips(&user_id)).await
    }
}
