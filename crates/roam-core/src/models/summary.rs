//! Trip summary types for list views.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{Money, Trip, TripDetails, TripStatus};

/// Summary information about a trip with its attached item count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripSummary {
    /// Trip ID
    pub id: u64,
    /// Display name of the trip
    pub name: String,
    /// Destination the trip belongs to
    pub destination_id: u64,
    /// Destination name, when the destination still exists
    pub destination_name: Option<String>,
    /// Lifecycle status
    pub status: TripStatus,
    /// Budget captured at submission
    pub total_budget: Money,
    /// Creation timestamp
    pub created_at: Timestamp,
    /// Number of attached items across all categories
    pub item_count: u32,
}

impl TripSummary {
    /// Create a TripSummary from a Trip and its item count
    pub fn from_trip(trip: Trip, destination_name: Option<String>, item_count: u32) -> Self {
        Self {
            id: trip.id,
            name: trip.name,
            destination_id: trip.destination_id,
            destination_name,
            status: trip.status,
            total_budget: trip.total_budget,
            created_at: trip.created_at,
            item_count,
        }
    }
}

impl From<&TripDetails> for TripSummary {
    fn from(details: &TripDetails) -> Self {
        Self::from_trip(details.trip.clone(), None, details.item_count() as u32)
    }
}
