//! Destination model definition.

use serde::{Deserialize, Serialize};

use super::Money;

/// A travel destination with its base cost estimates.
///
/// Destinations are managed outside of Roam and are read-only for the whole
/// of a composition session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Destination {
    /// Unique identifier for the destination
    pub id: u64,

    /// Display name, e.g. "Goa"
    pub name: String,

    pub country: Option<String>,

    /// Free-form category such as "beach" or "adventure"
    pub category: Option<String>,

    pub climate: Option<String>,

    pub best_season: Option<String>,

    /// Estimated return flight cost
    #[serde(rename = "estimated_flight_cost", default)]
    pub flight_cost: Option<Money>,

    /// Estimated accommodation cost for the stay
    #[serde(rename = "estimated_stay_cost", default)]
    pub stay_cost: Option<Money>,

    /// Estimated food cost for the stay
    #[serde(rename = "estimated_food_cost", default)]
    pub food_cost: Option<Money>,

    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Destination {
    /// Sum of the three base cost estimates, absent estimates counting as zero.
    pub fn base_cost(&self) -> Money {
        Money::or_zero(self.flight_cost)
            + Money::or_zero(self.stay_cost)
            + Money::or_zero(self.food_cost)
    }
}
