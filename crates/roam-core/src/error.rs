//! Error types for the Roam core library.

use std::path::PathBuf;

use thiserror::Error;

use crate::models::{Category, SubmissionPhase};

/// Error type for every fallible operation in the trip composition workflow.
#[derive(Error, Debug)]
pub enum RoamError {
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// Destination not found for the given ID
    #[error("Destination with ID {id} not found")]
    DestinationNotFound { id: u64 },
    /// Trip not found for the given ID (or not owned by the caller)
    #[error("Trip with ID {id} not found")]
    TripNotFound { id: u64 },
    /// A catalog item reference that does not resolve
    #[error("No {category} with ID {id} in the catalog")]
    UnknownCatalogItem { category: Category, id: u64 },
    /// Trip creation did not succeed; no items were attached
    #[error("Trip creation failed: {reason}")]
    CreateFailed { reason: String },
    /// A lifecycle status update was refused
    #[error("Status change for trip {trip_id} rejected: {reason}")]
    StatusTransitionRejected { trip_id: u64, reason: String },
    /// The composition session cannot be modified in its current phase
    #[error("Composition session is {phase}; selection and submission are locked")]
    SessionLocked { phase: SubmissionPhase },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration and runtime plumbing errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    /// Create a new database error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> RoamError {
        RoamError::Database {
            message: self.message,
            source,
        }
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> RoamError {
        RoamError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl RoamError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Wraps a blocking task join failure.
    pub(crate) fn join(error: tokio::task::JoinError) -> Self {
        RoamError::Configuration {
            message: format!("Task join error: {error}"),
        }
    }

    /// Whether this error is one the user can fix by retrying the same request.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            RoamError::CreateFailed { .. } | RoamError::Database { .. }
        )
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| RoamError::database(message).with_source(e))
    }
}

/// Result type alias for Roam operations
pub type Result<T> = std::result::Result<T, RoamError>;
