//! Data models for destinations, catalog items and trips.
//!
//! Display implementations for these models live in
//! [`crate::display::models`], keeping data structures separate from
//! presentation.
//!
//! # Examples
//!
//! ```rust
//! use roam_core::models::{Activity, CatalogItem, Money};
//!
//! let activity = Activity {
//!     id: 1,
//!     destination_id: 1,
//!     name: "Scuba diving".to_string(),
//!     description: None,
//!     kind: Some("water sports".to_string()),
//!     estimated_cost: Some(Money(1500)),
//!     cost_type: None,
//!     duration_hours: Some(3.0),
//! };
//! assert_eq!(activity.cost(), Money(1500));
//! ```

pub mod catalog;
pub mod destination;
pub mod details;
pub mod money;
pub mod status;
pub mod summary;
pub mod trip;

#[cfg(test)]
mod tests;

pub use catalog::{Activity, CatalogItem, CatalogSeed, Category, CulinaryItem, ItemRef, Place};
pub use destination::Destination;
pub use details::TripDetails;
pub use money::Money;
pub use status::{SubmissionPhase, Transition, TripStatus};
pub use summary::TripSummary;
pub use trip::{Trip, TripItem};
