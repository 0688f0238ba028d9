//! Catalog read queries and catalog import.

use rusqlite::{params, OptionalExtension, Row};

use crate::{
    error::{DatabaseResultExt, RoamError, Result},
    models::{Activity, CatalogSeed, Category, CulinaryItem, Destination, ItemRef, Money, Place},
};

pub(crate) const DESTINATION_COLUMNS: &str = "id, name, country, category, climate, best_season, estimated_flight_cost, estimated_stay_cost, estimated_food_cost, description, image_url";
pub(crate) const PLACE_COLUMNS: &str =
    "id, destination_id, name, description, entry_fee, best_time_to_visit, image_url";
pub(crate) const ACTIVITY_COLUMNS: &str =
    "id, destination_id, name, description, type, estimated_cost, cost_type, duration_hours";
pub(crate) const CULINARY_COLUMNS: &str =
    "id, destination_id, dish_name, description, avg_price, image_url";

const CHECK_DESTINATION_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM destinations WHERE id = ?1)";
const CHECK_PLACE_EXISTS_SQL: &str =
    "SELECT EXISTS(SELECT 1 FROM places WHERE id = ?1 AND destination_id = ?2)";
const CHECK_ACTIVITY_EXISTS_SQL: &str =
    "SELECT EXISTS(SELECT 1 FROM activities WHERE id = ?1 AND destination_id = ?2)";
const CHECK_CULINARY_EXISTS_SQL: &str =
    "SELECT EXISTS(SELECT 1 FROM culinary WHERE id = ?1 AND destination_id = ?2)";

const UPSERT_DESTINATION_SQL: &str = "INSERT INTO destinations (id, name, country, category, climate, best_season, estimated_flight_cost, estimated_stay_cost, estimated_food_cost, description, image_url) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11) ON CONFLICT(id) DO UPDATE SET name = excluded.name, country = excluded.country, category = excluded.category, climate = excluded.climate, best_season = excluded.best_season, estimated_flight_cost = excluded.estimated_flight_cost, estimated_stay_cost = excluded.estimated_stay_cost, estimated_food_cost = excluded.estimated_food_cost, description = excluded.description, image_url = excluded.image_url";
const UPSERT_PLACE_SQL: &str = "INSERT INTO places (id, destination_id, name, description, entry_fee, best_time_to_visit, image_url) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7) ON CONFLICT(id) DO UPDATE SET destination_id = excluded.destination_id, name = excluded.name, description = excluded.description, entry_fee = excluded.entry_fee, best_time_to_visit = excluded.best_time_to_visit, image_url = excluded.image_url";
const UPSERT_ACTIVITY_SQL: &str = "INSERT INTO activities (id, destination_id, name, description, type, estimated_cost, cost_type, duration_hours) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8) ON CONFLICT(id) DO UPDATE SET destination_id = excluded.destination_id, name = excluded.name, description = excluded.description, type = excluded.type, estimated_cost = excluded.estimated_cost, cost_type = excluded.cost_type, duration_hours = excluded.duration_hours";
const UPSERT_CULINARY_SQL: &str = "INSERT INTO culinary (id, destination_id, dish_name, description, avg_price, image_url) VALUES (?1, ?2, ?3, ?4, ?5, ?6) ON CONFLICT(id) DO UPDATE SET destination_id = excluded.destination_id, dish_name = excluded.dish_name, description = excluded.description, avg_price = excluded.avg_price, image_url = excluded.image_url";

fn money(value: Option<i64>) -> Option<Money> {
    value.map(Money)
}

fn amount(value: Option<Money>) -> Option<i64> {
    value.map(Money::amount)
}

impl super::Database {
    /// Builds a Destination from a row selected with [`DESTINATION_COLUMNS`].
    fn build_destination_from_row(row: &Row) -> rusqlite::Result<Destination> {
        Ok(Destination {
            id: row.get::<_, i64>(0)? as u64,
            name: row.get(1)?,
            country: row.get(2)?,
            category: row.get(3)?,
            climate: row.get(4)?,
            best_season: row.get(5)?,
            flight_cost: money(row.get(6)?),
            stay_cost: money(row.get(7)?),
            food_cost: money(row.get(8)?),
            description: row.get(9)?,
            image_url: row.get(10)?,
        })
    }

    /// Builds a Place from [`PLACE_COLUMNS`] starting at column `offset`.
    pub(crate) fn build_place_from_row(row: &Row, offset: usize) -> rusqlite::Result<Place> {
        Ok(Place {
            id: row.get::<_, i64>(offset)? as u64,
            destination_id: row.get::<_, i64>(offset + 1)? as u64,
            name: row.get(offset + 2)?,
            description: row.get(offset + 3)?,
            entry_fee: money(row.get(offset + 4)?),
            best_time_to_visit: row.get(offset + 5)?,
            image_url: row.get(offset + 6)?,
        })
    }

    /// Builds an Activity from [`ACTIVITY_COLUMNS`] starting at column `offset`.
    pub(crate) fn build_activity_from_row(row: &Row, offset: usize) -> rusqlite::Result<Activity> {
        Ok(Activity {
            id: row.get::<_, i64>(offset)? as u64,
            destination_id: row.get::<_, i64>(offset + 1)? as u64,
            name: row.get(offset + 2)?,
            description: row.get(offset + 3)?,
            kind: row.get(offset + 4)?,
            estimated_cost: money(row.get(offset + 5)?),
            cost_type: row.get(offset + 6)?,
            duration_hours: row.get(offset + 7)?,
        })
    }

    /// Builds a CulinaryItem from [`CULINARY_COLUMNS`] starting at column `offset`.
    pub(crate) fn build_culinary_from_row(
        row: &Row,
        offset: usize,
    ) -> rusqlite::Result<CulinaryItem> {
        Ok(CulinaryItem {
            id: row.get::<_, i64>(offset)? as u64,
            destination_id: row.get::<_, i64>(offset + 1)? as u64,
            dish_name: row.get(offset + 2)?,
            description: row.get(offset + 3)?,
            avg_price: money(row.get(offset + 4)?),
            image_url: row.get(offset + 5)?,
        })
    }

    /// Lists all destinations ordered by name.
    pub fn list_destinations(&self) -> Result<Vec<Destination>> {
        let sql = format!("SELECT {DESTINATION_COLUMNS} FROM destinations ORDER BY name, id");
        let mut stmt = self
            .connection
            .prepare(&sql)
            .db_context("Failed to prepare query")?;

        let destinations = stmt
            .query_map([], Self::build_destination_from_row)
            .db_context("Failed to query destinations")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch destinations")?;

        Ok(destinations)
    }

    /// Retrieves a destination by its ID.
    pub fn get_destination(&self, id: u64) -> Result<Option<Destination>> {
        let sql = format!("SELECT {DESTINATION_COLUMNS} FROM destinations WHERE id = ?1");
        self.connection
            .query_row(&sql, params![id as i64], Self::build_destination_from_row)
            .optional()
            .db_context("Failed to query destination")
    }

    /// Lists the places of a destination in ID order.
    pub fn list_places(&self, destination_id: u64) -> Result<Vec<Place>> {
        let sql =
            format!("SELECT {PLACE_COLUMNS} FROM places WHERE destination_id = ?1 ORDER BY id");
        let mut stmt = self
            .connection
            .prepare(&sql)
            .db_context("Failed to prepare query")?;

        let places = stmt
            .query_map(params![destination_id as i64], |row| {
                Self::build_place_from_row(row, 0)
            })
            .db_context("Failed to query places")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch places")?;

        Ok(places)
    }

    /// Lists the activities of a destination in ID order.
    pub fn list_activities(&self, destination_id: u64) -> Result<Vec<Activity>> {
        let sql = format!(
            "SELECT {ACTIVITY_COLUMNS} FROM activities WHERE destination_id = ?1 ORDER BY id"
        );
        let mut stmt = self
            .connection
            .prepare(&sql)
            .db_context("Failed to prepare query")?;

        let activities = stmt
            .query_map(params![destination_id as i64], |row| {
                Self::build_activity_from_row(row, 0)
            })
            .db_context("Failed to query activities")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch activities")?;

        Ok(activities)
    }

    /// Lists the culinary items of a destination in ID order.
    pub fn list_culinary(&self, destination_id: u64) -> Result<Vec<CulinaryItem>> {
        let sql = format!(
            "SELECT {CULINARY_COLUMNS} FROM culinary WHERE destination_id = ?1 ORDER BY id"
        );
        let mut stmt = self
            .connection
            .prepare(&sql)
            .db_context("Failed to prepare query")?;

        let culinary = stmt
            .query_map(params![destination_id as i64], |row| {
                Self::build_culinary_from_row(row, 0)
            })
            .db_context("Failed to query culinary items")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch culinary items")?;

        Ok(culinary)
    }

    /// Whether a destination row exists.
    pub(crate) fn destination_exists(
        connection: &rusqlite::Connection,
        id: u64,
    ) -> Result<bool> {
        connection
            .query_row(CHECK_DESTINATION_EXISTS_SQL, params![id as i64], |row| {
                row.get(0)
            })
            .db_context("Failed to check destination existence")
    }

    /// Whether the catalog row behind an item reference exists and is offered
    /// at `destination_id`.
    pub(crate) fn catalog_item_exists(
        connection: &rusqlite::Connection,
        item: ItemRef,
        destination_id: u64,
    ) -> Result<bool> {
        let sql = match item.category {
            Category::Place => CHECK_PLACE_EXISTS_SQL,
            Category::Activity => CHECK_ACTIVITY_EXISTS_SQL,
            Category::Culinary => CHECK_CULINARY_EXISTS_SQL,
        };
        connection
            .query_row(sql, params![item.id as i64, destination_id as i64], |row| {
                row.get(0)
            })
            .db_context("Failed to check catalog item existence")
    }

    /// Upserts every row of a catalog seed in a single transaction.
    ///
    /// Returns the number of rows written.
    pub fn import_catalog(&mut self, seed: &CatalogSeed) -> Result<usize> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        for d in &seed.destinations {
            if d.name.trim().is_empty() {
                return Err(RoamError::invalid_input("destinations.name")
                    .with_reason(format!("Destination {} has an empty name", d.id)));
            }
            tx.execute(
                UPSERT_DESTINATION_SQL,
                params![
                    d.id as i64,
                    d.name,
                    d.country,
                    d.category,
                    d.climate,
                    d.best_season,
                    amount(d.flight_cost),
                    amount(d.stay_cost),
                    amount(d.food_cost),
                    d.description,
                    d.image_url
                ],
            )
            .db_context("Failed to import destination")?;
        }

        for p in &seed.places {
            tx.execute(
                UPSERT_PLACE_SQL,
                params![
                    p.id as i64,
                    p.destination_id as i64,
                    p.name,
                    p.description,
                    amount(p.entry_fee),
                    p.best_time_to_visit,
                    p.image_url
                ],
            )
            .db_context("Failed to import place")?;
        }

        for a in &seed.activities {
            tx.execute(
                UPSERT_ACTIVITY_SQL,
                params![
                    a.id as i64,
                    a.destination_id as i64,
                    a.name,
                    a.description,
                    a.kind,
                    amount(a.estimated_cost),
                    a.cost_type,
                    a.duration_hours
                ],
            )
            .db_context("Failed to import activity")?;
        }

        for c in &seed.culinary {
            tx.execute(
                UPSERT_CULINARY_SQL,
                params![
                    c.id as i64,
                    c.destination_id as i64,
                    c.dish_name,
                    c.description,
                    amount(c.avg_price),
                    c.image_url
                ],
            )
            .db_context("Failed to import culinary item")?;
        }

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(seed.len())
    }
}
