//! Request parameter structures for Roam operations.
//!
//! These structures carry no interface-specific derives. The CLI defines its
//! own clap argument structs and converts them into these types, so the core
//! stays independent of how a request was entered:
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │    │  Core Params    │    │   TripStore /   │
//! │  (clap derives) │───▶│ (serde only)    │───▶│  CatalogSource  │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! Every trip request is issued on behalf of a [`Caller`]. Authentication is
//! handled elsewhere; the core only forwards the established identity.

use serde::{Deserialize, Serialize};

use crate::models::{ItemRef, Money, Transition};

/// Identity of the user on whose behalf requests are issued.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Caller {
    user_id: String,
}

impl Caller {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }
}

/// Generic parameters for operations requiring just an ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Id {
    /// The ID of the resource to operate on
    pub id: u64,
}

/// Parameters for creating a trip.
///
/// New trips always start in the `planned` status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTrip {
    /// Destination the trip is composed for
    pub destination_id: u64,
    /// Budget total at submission time
    pub total_budget: Money,
    /// Display name of the trip
    pub name: String,
}

/// Parameters for attaching one catalog item to a trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttachItem {
    pub trip_id: u64,
    #[serde(flatten)]
    pub item: ItemRef,
}

/// Parameters for a lifecycle status change.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateTripStatus {
    pub trip_id: u64,
    pub transition: Transition,
}
