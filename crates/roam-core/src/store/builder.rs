//! Opening the trip and catalog database behind a [`SqliteStore`].

use std::path::{Path, PathBuf};

use tokio::task;

use super::SqliteStore;
use crate::{
    db::Database,
    error::{RoamError, Result},
};

/// Locates the trip and catalog database and prepares its schema.
#[derive(Debug, Clone)]
pub struct StoreBuilder {
    database_path: Option<PathBuf>,
}

impl StoreBuilder {
    /// Builder that falls back to the per-user data directory.
    pub fn new() -> Self {
        Self {
            database_path: None,
        }
    }

    /// Stores trips and the imported catalog in `path` instead.
    ///
    /// Without a path the database lives at `$XDG_DATA_HOME/roam/roam.db`,
    /// usually `~/.local/share/roam/roam.db`.
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Opens the store, creating the database file with its destination,
    /// catalog and trip tables on first use.
    ///
    /// # Errors
    ///
    /// Returns `RoamError::FileSystem` if the parent directory cannot be created
    /// Returns `RoamError::Database` if schema initialization fails
    pub async fn build(self) -> Result<SqliteStore> {
        let db_path = match self.database_path {
            Some(path) => path,
            None => Self::default_database_path()?,
        };

        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| RoamError::FileSystem {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        let db_path_clone = db_path.clone();
        task::spawn_blocking(move || {
            let _db = Database::new(&db_path_clone)?;
            Ok::<(), RoamError>(())
        })
        .await
        .map_err(RoamError::join)??;

        log::debug!("Using database at {}", db_path.display());
        Ok(SqliteStore::new(db_path))
    }

    /// `roam/roam.db` under the user's data directory.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("roam")
            .place_data_file("roam.db")
            .map_err(|e| RoamError::XdgDirectory(e.to_string()))
    }
}

impl Default for StoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}
