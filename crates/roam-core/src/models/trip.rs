//! Trip and trip item model definitions.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{ItemRef, Money, TripStatus};

/// A persisted, user-owned composition of a destination and selected items.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Trip {
    /// Unique identifier for the trip
    pub id: u64,

    /// Identity of the owning user
    pub user_id: String,

    /// Destination the trip was composed for
    pub destination_id: u64,

    /// Display name, "Trip to <destination>" unless renamed
    pub name: String,

    /// Lifecycle status
    #[serde(default)]
    pub status: TripStatus,

    /// Budget total captured at submission time; never recomputed
    pub total_budget: Money,

    /// Timestamp when the trip was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp of the last status change (UTC)
    pub updated_at: Timestamp,
}

/// Junction record linking a trip to one catalog item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TripItem {
    pub id: u64,
    pub trip_id: u64,
    #[serde(flatten)]
    pub item: ItemRef,
    pub created_at: Timestamp,
}
