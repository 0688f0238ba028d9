//! Database operations and SQLite management for the catalog and trips.
//!
//! This module provides the low-level, synchronous database operations behind
//! [`crate::store::SqliteStore`]. Catalog reads live in [`catalog_queries`],
//! trip writes and reads in [`trip_queries`].

use std::path::Path;

use rusqlite::Connection;

use crate::error::{DatabaseResultExt, Result};

pub mod catalog_queries;
pub mod migrations;
pub mod trip_queries;

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Creates a new database connection and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}
