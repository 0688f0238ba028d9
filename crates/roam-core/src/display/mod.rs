//! Display formatting for models and workflow results.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]).
//! Collections and results that need context of their own get small wrapper
//! types, so the same data can be shown as a list row, a detail page or a
//! submission report.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │    Wrappers     │    │    Markdown     │
//! │ (Trip, Budget)  │───▶│ (TripSummaries, │───▶│     Output      │
//! │                 │    │  CatalogView)   │    │   (terminal)    │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ```rust
//! use roam_core::display::OperationStatus;
//!
//! let status = OperationStatus::success("Trip 3 is now ongoing");
//! assert_eq!(status.to_string(), "Success: Trip 3 is now ongoing\n");
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;
pub mod status;

pub use collections::{Destinations, TripLine, TripSummaries};
pub use datetime::{LocalDate, LocalDateTime};
pub use results::{CatalogView, CompositionView, TransitionResult};
pub use status::{OperationStatus, StatusKind};
