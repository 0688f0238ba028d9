//! Trip CRUD operations and item join queries.

use jiff::Timestamp;
use rusqlite::{params, types::Type, OptionalExtension, Row};
use serde::Serialize;
use serde_json::{Map, Value};

use super::catalog_queries::{ACTIVITY_COLUMNS, CULINARY_COLUMNS, PLACE_COLUMNS};
use crate::{
    error::{DatabaseResultExt, RoamError, Result},
    models::{Category, ItemRef, Money, Transition, Trip, TripItem, TripStatus, TripSummary},
};

const INSERT_TRIP_SQL: &str = "INSERT INTO trips (user_id, destination_id, name, status, total_budget, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)";
const SELECT_TRIP_SQL: &str = "SELECT id, user_id, destination_id, name, status, total_budget, created_at, updated_at FROM trips WHERE id = ?1 AND user_id = ?2";
const CHECK_TRIP_OWNED_SQL: &str =
    "SELECT EXISTS(SELECT 1 FROM trips WHERE id = ?1 AND user_id = ?2)";
const SELECT_TRIP_DESTINATION_SQL: &str =
    "SELECT destination_id FROM trips WHERE id = ?1 AND user_id = ?2";
const CHECK_ITEM_ATTACHED_SQL: &str = "SELECT EXISTS(SELECT 1 FROM trip_items WHERE trip_id = ?1 AND category = ?2 AND item_id = ?3)";
const INSERT_TRIP_ITEM_SQL: &str =
    "INSERT INTO trip_items (trip_id, category, item_id, created_at) VALUES (?1, ?2, ?3, ?4)";
const UPDATE_TRIP_STATUS_SQL: &str = "UPDATE trips SET status = ?1, updated_at = ?2 WHERE id = ?3 AND user_id = ?4 AND status = ?5";
const SELECT_TRIP_STATUS_SQL: &str = "SELECT status FROM trips WHERE id = ?1 AND user_id = ?2";
const DELETE_TRIP_ITEMS_SQL: &str = "DELETE FROM trip_items WHERE trip_id = ?1";
const DELETE_TRIP_SQL: &str = "DELETE FROM trips WHERE id = ?1 AND user_id = ?2";
const SELECT_TRIP_SUMMARIES_SQL: &str = "SELECT t.id, t.user_id, t.destination_id, t.name, t.status, t.total_budget, t.created_at, t.updated_at, d.name, (SELECT COUNT(*) FROM trip_items ti WHERE ti.trip_id = t.id) FROM trips t LEFT JOIN destinations d ON d.id = t.destination_id WHERE t.user_id = ?1 ORDER BY t.id DESC";

fn parse_timestamp(row: &Row, idx: usize) -> rusqlite::Result<Timestamp> {
    row.get::<_, String>(idx)?
        .parse::<Timestamp>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn parse_status(row: &Row, idx: usize) -> rusqlite::Result<TripStatus> {
    let status_str: String = row.get(idx)?;
    status_str.parse::<TripStatus>().map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            Type::Text,
            format!("Invalid trip status: {status_str}").into(),
        )
    })
}

/// Join query for one category: junction columns first, catalog columns from
/// index 2, NULL catalog columns when the catalog row is gone.
fn join_sql(category: Category) -> String {
    let (table, columns) = match category {
        Category::Place => ("places", PLACE_COLUMNS),
        Category::Activity => ("activities", ACTIVITY_COLUMNS),
        Category::Culinary => ("culinary", CULINARY_COLUMNS),
    };
    let qualified = columns
        .split(", ")
        .map(|c| format!("c.{c}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "SELECT ti.id, ti.item_id, {qualified} FROM trip_items ti LEFT JOIN {table} c ON c.id = ti.item_id WHERE ti.trip_id = ?1 AND ti.category = ?2 ORDER BY ti.id"
    )
}

impl super::Database {
    /// Helper function to construct a Trip from a database row
    fn build_trip_from_row(row: &Row) -> rusqlite::Result<Trip> {
        Ok(Trip {
            id: row.get::<_, i64>(0)? as u64,
            user_id: row.get(1)?,
            destination_id: row.get::<_, i64>(2)? as u64,
            name: row.get(3)?,
            status: parse_status(row, 4)?,
            total_budget: Money(row.get(5)?),
            created_at: parse_timestamp(row, 6)?,
            updated_at: parse_timestamp(row, 7)?,
        })
    }

    /// Creates a new trip in the `planned` status.
    pub fn create_trip(
        &mut self,
        user_id: &str,
        destination_id: u64,
        name: &str,
        total_budget: Money,
    ) -> Result<Trip> {
        if name.trim().is_empty() {
            return Err(RoamError::invalid_input("name").with_reason("Trip name must not be empty"));
        }

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        if !Self::destination_exists(&tx, destination_id)? {
            return Err(RoamError::DestinationNotFound { id: destination_id });
        }

        let now = Timestamp::now();
        let now_str = now.to_string();

        tx.execute(
            INSERT_TRIP_SQL,
            params![
                user_id,
                destination_id as i64,
                name,
                TripStatus::Planned.as_str(),
                total_budget.amount(),
                &now_str,
                &now_str
            ],
        )
        .db_context("Failed to insert trip")?;

        let id = tx.last_insert_rowid() as u64;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(Trip {
            id,
            user_id: user_id.into(),
            destination_id,
            name: name.into(),
            status: TripStatus::Planned,
            total_budget,
            created_at: now,
            updated_at: now,
        })
    }

    /// Retrieves a trip owned by `user_id`.
    pub fn get_trip(&self, user_id: &str, id: u64) -> Result<Option<Trip>> {
        self.connection
            .query_row(
                SELECT_TRIP_SQL,
                params![id as i64, user_id],
                Self::build_trip_from_row,
            )
            .optional()
            .db_context("Failed to query trip")
    }

    /// Links a catalog item to a trip owned by `user_id`.
    pub fn attach_item(&mut self, user_id: &str, trip_id: u64, item: ItemRef) -> Result<TripItem> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let destination_id: i64 = tx
            .query_row(
                SELECT_TRIP_DESTINATION_SQL,
                params![trip_id as i64, user_id],
                |row| row.get(0),
            )
            .optional()
            .db_context("Failed to check trip existence")?
            .ok_or(RoamError::TripNotFound { id: trip_id })?;

        // Only items offered at the trip's destination may be attached
        if !Self::catalog_item_exists(&tx, item, destination_id as u64)? {
            return Err(RoamError::UnknownCatalogItem {
                category: item.category,
                id: item.id,
            });
        }

        let already: bool = tx
            .query_row(
                CHECK_ITEM_ATTACHED_SQL,
                params![trip_id as i64, item.category.as_str(), item.id as i64],
                |row| row.get(0),
            )
            .db_context("Failed to check existing attachment")?;
        if already {
            return Err(RoamError::invalid_input("item").with_reason(format!(
                "{} {} is already attached to trip {trip_id}",
                item.category.as_str(),
                item.id
            )));
        }

        let now = Timestamp::now();
        tx.execute(
            INSERT_TRIP_ITEM_SQL,
            params![
                trip_id as i64,
                item.category.as_str(),
                item.id as i64,
                now.to_string()
            ],
        )
        .db_context("Failed to insert trip item")?;

        let id = tx.last_insert_rowid() as u64;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(TripItem {
            id,
            trip_id,
            item,
            created_at: now,
        })
    }

    /// Raw join records for one category of a trip.
    ///
    /// Each record nests the catalog row under the category key, or `null`
    /// when the catalog row no longer exists:
    /// `{ "id": 3, "trip_id": 1, "place_id": 9, "places": { ... } }`.
    pub fn trip_item_records(&self, trip_id: u64, category: Category) -> Result<Vec<Value>> {
        let sql = join_sql(category);
        let mut stmt = self
            .connection
            .prepare(&sql)
            .db_context("Failed to prepare query")?;
        let params = params![trip_id as i64, category.as_str()];

        let records = match category {
            Category::Place => {
                let rows = stmt
                    .query_map(params, |row| {
                        Self::join_row(row, |r| Self::build_place_from_row(r, 2))
                    })
                    .db_context("Failed to query trip places")?
                    .collect::<std::result::Result<Vec<_>, _>>()
                    .db_context("Failed to fetch trip places")?;
                Self::nest_records(trip_id, category, rows)?
            }
            Category::Activity => {
                let rows = stmt
                    .query_map(params, |row| {
                        Self::join_row(row, |r| Self::build_activity_from_row(r, 2))
                    })
                    .db_context("Failed to query trip activities")?
                    .collect::<std::result::Result<Vec<_>, _>>()
                    .db_context("Failed to fetch trip activities")?;
                Self::nest_records(trip_id, category, rows)?
            }
            Category::Culinary => {
                let rows = stmt
                    .query_map(params, |row| {
                        Self::join_row(row, |r| Self::build_culinary_from_row(r, 2))
                    })
                    .db_context("Failed to query trip culinary items")?
                    .collect::<std::result::Result<Vec<_>, _>>()
                    .db_context("Failed to fetch trip culinary items")?;
                Self::nest_records(trip_id, category, rows)?
            }
        };

        Ok(records)
    }

    /// Reads the junction columns of a join row and the catalog row, if any.
    fn join_row<T>(
        row: &Row,
        build: impl FnOnce(&Row) -> rusqlite::Result<T>,
    ) -> rusqlite::Result<(u64, u64, Option<T>)> {
        let junction_id = row.get::<_, i64>(0)? as u64;
        let item_id = row.get::<_, i64>(1)? as u64;
        let resolved = row.get::<_, Option<i64>>(2)?;
        let item = match resolved {
            Some(_) => Some(build(row)?),
            None => None,
        };
        Ok((junction_id, item_id, item))
    }

    fn nest_records<T: Serialize>(
        trip_id: u64,
        category: Category,
        rows: Vec<(u64, u64, Option<T>)>,
    ) -> Result<Vec<Value>> {
        rows.into_iter()
            .map(|(junction_id, item_id, item)| {
                let mut record = Map::new();
                record.insert("id".into(), Value::from(junction_id));
                record.insert("trip_id".into(), Value::from(trip_id));
                record.insert(category.reference_key().into(), Value::from(item_id));
                let nested = match item {
                    Some(item) => serde_json::to_value(item)?,
                    None => Value::Null,
                };
                record.insert(category.nested_key().into(), nested);
                Ok(Value::Object(record))
            })
            .collect()
    }

    /// Applies a forward status transition with a compare-and-set on the
    /// current status.
    pub fn update_trip_status(
        &mut self,
        user_id: &str,
        trip_id: u64,
        transition: Transition,
    ) -> Result<Trip> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let now_str = Timestamp::now().to_string();
        let rows_affected = tx
            .execute(
                UPDATE_TRIP_STATUS_SQL,
                params![
                    transition.to().as_str(),
                    &now_str,
                    trip_id as i64,
                    user_id,
                    transition.from().as_str()
                ],
            )
            .db_context("Failed to update trip status")?;

        if rows_affected == 0 {
            let current: Option<String> = tx
                .query_row(SELECT_TRIP_STATUS_SQL, params![trip_id as i64, user_id], |row| {
                    row.get(0)
                })
                .optional()
                .db_context("Failed to query trip status")?;

            return Err(match current {
                None => RoamError::TripNotFound { id: trip_id },
                Some(status) => RoamError::StatusTransitionRejected {
                    trip_id,
                    reason: format!(
                        "trip is {status}, cannot move from {} to {}",
                        transition.from().as_str(),
                        transition.to().as_str()
                    ),
                },
            });
        }

        let trip = tx
            .query_row(
                SELECT_TRIP_SQL,
                params![trip_id as i64, user_id],
                Self::build_trip_from_row,
            )
            .db_context("Failed to query updated trip")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(trip)
    }

    /// Permanently deletes a trip and its items.
    pub fn delete_trip(&mut self, user_id: &str, trip_id: u64) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let owned: bool = tx
            .query_row(CHECK_TRIP_OWNED_SQL, params![trip_id as i64, user_id], |row| {
                row.get(0)
            })
            .db_context("Failed to check trip existence")?;
        if !owned {
            return Err(RoamError::TripNotFound { id: trip_id });
        }

        // Cascade covers this, but only with foreign keys enabled on the connection
        tx.execute(DELETE_TRIP_ITEMS_SQL, params![trip_id as i64])
            .db_context("Failed to delete trip items")?;
        tx.execute(DELETE_TRIP_SQL, params![trip_id as i64, user_id])
            .db_context("Failed to delete trip")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(())
    }

    /// Lists the trips of `user_id`, newest first, with item counts.
    pub fn list_trips(&self, user_id: &str) -> Result<Vec<TripSummary>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_TRIP_SUMMARIES_SQL)
            .db_context("Failed to prepare query")?;

        let summaries = stmt
            .query_map(params![user_id], |row| {
                let trip = Self::build_trip_from_row(row)?;
                let destination_name: Option<String> = row.get(8)?;
                let item_count: i64 = row.get(9)?;
                Ok(TripSummary::from_trip(trip, destination_name, item_count as u32))
            })
            .db_context("Failed to query trips")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch trips")?;

        Ok(summaries)
    }
}
