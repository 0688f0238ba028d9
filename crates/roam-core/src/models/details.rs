//! Hydrated trip view.

use serde::{Deserialize, Serialize};

use super::{Activity, CatalogItem, CulinaryItem, Money, Place, Trip};

/// A trip with its attached items resolved to catalog records.
///
/// The three category lists are always present; an empty category is an
/// empty list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TripDetails {
    pub trip: Trip,
    #[serde(default)]
    pub places: Vec<Place>,
    #[serde(default)]
    pub activities: Vec<Activity>,
    #[serde(default)]
    pub culinary: Vec<CulinaryItem>,
    /// Attached items whose catalog record could not be resolved
    #[serde(default)]
    pub gaps: usize,
}

impl TripDetails {
    /// A trip with nothing attached.
    pub fn empty(trip: Trip) -> Self {
        Self {
            trip,
            places: Vec::new(),
            activities: Vec::new(),
            culinary: Vec::new(),
            gaps: 0,
        }
    }

    /// Number of resolved items across all categories.
    pub fn item_count(&self) -> usize {
        self.places.len() + self.activities.len() + self.culinary.len()
    }

    /// Sum of the cost fields of the resolved items.
    pub fn items_cost(&self) -> Money {
        self.places.iter().map(CatalogItem::cost).sum::<Money>()
            + self.activities.iter().map(CatalogItem::cost).sum::<Money>()
            + self.culinary.iter().map(CatalogItem::cost).sum::<Money>()
    }
}
