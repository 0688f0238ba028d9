#![allow(dead_code)]

use std::{
    sync::atomic::{AtomicUsize, Ordering},
    time::Duration,
};

use async_trait::async_trait;
use roam_core::{
    params::{AttachItem, Caller, CreateTrip, UpdateTripStatus},
    Activity, CatalogSeed, CulinaryItem, Destination, Money, Place, RoamError, SqliteStore,
    StoreBuilder, Trip, TripDetailsResponse, TripItem, TripStore, TripSummary,
};
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;

pub const GOA: u64 = 1;
pub const MANALI: u64 = 2;

/// Helper function to create a test store backed by a temporary database
pub async fn create_test_store() -> (TempDir, SqliteStore) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let store = StoreBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create store");
    (temp_dir, store)
}

/// Test store with the sample catalog already imported
pub async fn create_seeded_store() -> (TempDir, SqliteStore) {
    let (temp_dir, store) = create_test_store().await;
    store
        .import_catalog(sample_catalog())
        .await
        .expect("Failed to import catalog");
    (temp_dir, store)
}

fn destination(id: u64, name: &str, flight: i64, stay: i64, food: i64) -> Destination {
    Destination {
        id,
        name: name.to_string(),
        country: Some("India".to_string()),
        category: None,
        climate: None,
        best_season: None,
        flight_cost: Some(Money(flight)),
        stay_cost: Some(Money(stay)),
        food_cost: Some(Money(food)),
        description: None,
        image_url: None,
    }
}

fn place(id: u64, destination_id: u64, name: &str, fee: Option<i64>) -> Place {
    Place {
        id,
        destination_id,
        name: name.to_string(),
        description: None,
        entry_fee: fee.map(Money),
        best_time_to_visit: None,
        image_url: None,
    }
}

fn activity(id: u64, destination_id: u64, name: &str, cost: i64) -> Activity {
    Activity {
        id,
        destination_id,
        name: name.to_string(),
        description: None,
        kind: None,
        estimated_cost: Some(Money(cost)),
        cost_type: Some("optional".to_string()),
        duration_hours: Some(2.0),
    }
}

fn dish(id: u64, destination_id: u64, name: &str, price: i64) -> CulinaryItem {
    CulinaryItem {
        id,
        destination_id,
        dish_name: name.to_string(),
        description: None,
        avg_price: Some(Money(price)),
        image_url: None,
    }
}

/// Goa (flight 20000, stay 5000, food 2000) with two items per category, and
/// Manali with a single place.
pub fn sample_catalog() -> CatalogSeed {
    CatalogSeed {
        destinations: vec![
            destination(GOA, "Goa", 20000, 5000, 2000),
            destination(MANALI, "Manali", 8000, 4000, 1000),
        ],
        places: vec![
            place(10, GOA, "Fort Aguada", None),
            place(11, GOA, "Basilica of Bom Jesus", Some(100)),
            place(40, MANALI, "Hadimba Temple", Some(50)),
        ],
        activities: vec![
            activity(20, GOA, "Scuba diving", 1500),
            activity(21, GOA, "Parasailing", 800),
        ],
        culinary: vec![dish(30, GOA, "Fish curry", 300), dish(31, GOA, "Bebinca", 200)],
    }
}

/// Wraps a store and injects failures, delays and cancellation into trip
/// requests. Call numbers are 1-based and counted per operation.
pub struct FaultyStore {
    inner: SqliteStore,
    fail_creates: Vec<usize>,
    create_delay: Option<Duration>,
    fail_attaches: Vec<usize>,
    attach_delays: Vec<(usize, Duration)>,
    cancel_after_attach: Option<(usize, CancellationToken)>,
    fail_deletes: bool,
    creates: AtomicUsize,
    attaches: AtomicUsize,
    deletes: AtomicUsize,
}

impl FaultyStore {
    pub fn new(inner: SqliteStore) -> Self {
        Self {
            inner,
            fail_creates: Vec::new(),
            create_delay: None,
            fail_attaches: Vec::new(),
            attach_delays: Vec::new(),
            cancel_after_attach: None,
            fail_deletes: false,
            creates: AtomicUsize::new(0),
            attaches: AtomicUsize::new(0),
            deletes: AtomicUsize::new(0),
        }
    }

    pub fn fail_create(mut self, call: usize) -> Self {
        self.fail_creates.push(call);
        self
    }

    pub fn delay_create(mut self, delay: Duration) -> Self {
        self.create_delay = Some(delay);
        self
    }

    pub fn fail_attach(mut self, call: usize) -> Self {
        self.fail_attaches.push(call);
        self
    }

    pub fn delay_attach(mut self, call: usize, delay: Duration) -> Self {
        self.attach_delays.push((call, delay));
        self
    }

    /// Cancels `token` once attach call `call` has completed.
    pub fn cancel_after_attach(mut self, call: usize, token: CancellationToken) -> Self {
        self.cancel_after_attach = Some((call, token));
        self
    }

    pub fn fail_deletes(mut self) -> Self {
        self.fail_deletes = true;
        self
    }

    pub fn create_calls(&self) -> usize {
        self.creates.load(Ordering::SeqCst)
    }

    pub fn attach_calls(&self) -> usize {
        self.attaches.load(Ordering::SeqCst)
    }

    pub fn delete_calls(&self) -> usize {
        self.deletes.load(Ordering::SeqCst)
    }

    pub fn inner(&self) -> &SqliteStore {
        &self.inner
    }
}

fn injected(what: &str) -> RoamError {
    RoamError::Configuration {
        message: format!("injected {what} failure"),
    }
}

#[async_trait]
impl TripStore for FaultyStore {
    async fn create_trip(&self, caller: &Caller, request: &CreateTrip) -> roam_core::Result<Trip> {
        let call = self.creates.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(delay) = self.create_delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_creates.contains(&call) {
            return Err(injected("create"));
        }
        self.inner.create_trip(caller, request).await
    }

    async fn attach_item(
        &self,
        caller: &Caller,
        request: &AttachItem,
    ) -> roam_core::Result<TripItem> {
        let call = self.attaches.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some((_, delay)) = self.attach_delays.iter().find(|(n, _)| *n == call) {
            tokio::time::sleep(*delay).await;
        }
        if self.fail_attaches.contains(&call) {
            return Err(injected("attach"));
        }

        let item = self.inner.attach_item(caller, request).await?;
        if let Some((n, token)) = &self.cancel_after_attach {
            if *n == call {
                token.cancel();
            }
        }
        Ok(item)
    }

    async fn get_trip_details(
        &self,
        caller: &Caller,
        trip_id: u64,
    ) -> roam_core::Result<Option<TripDetailsResponse>> {
        self.inner.get_trip_details(caller, trip_id).await
    }

    async fn update_trip_status(
        &self,
        caller: &Caller,
        request: &UpdateTripStatus,
    ) -> roam_core::Result<Trip> {
        self.inner.update_trip_status(caller, request).await
    }

    async fn delete_trip(&self, caller: &Caller, trip_id: u64) -> roam_core::Result<()> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        if self.fail_deletes {
            return Err(injected("delete"));
        }
        self.inner.delete_trip(caller, trip_id).await
    }

    async fn list_trips(&self, caller: &Caller) -> roam_core::Result<Vec<TripSummary>> {
        self.inner.list_trips(caller).await
    }
}
