//! Read-only catalog data for one destination view.

use serde::Serialize;

use crate::{
    error::{RoamError, Result},
    models::{Activity, CatalogItem, Category, CulinaryItem, Destination, ItemRef, Money, Place},
    store::CatalogSource,
};

/// A destination and its catalog items, fetched once when a destination view
/// opens and never mutated afterwards.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CatalogSnapshot {
    pub destination: Destination,
    pub places: Vec<Place>,
    pub activities: Vec<Activity>,
    pub culinary: Vec<CulinaryItem>,
}

impl CatalogSnapshot {
    /// Fetches the destination and its three item lists concurrently.
    ///
    /// # Errors
    ///
    /// Returns `RoamError::DestinationNotFound` if the destination does not
    /// exist, or whatever the source reports for a failed read.
    pub async fn load<S>(source: &S, destination_id: u64) -> Result<Self>
    where
        S: CatalogSource + ?Sized,
    {
        let (destination, places, activities, culinary) = tokio::try_join!(
            source.get_destination(destination_id),
            source.list_places(destination_id),
            source.list_activities(destination_id),
            source.list_culinary(destination_id),
        )?;

        let destination = destination.ok_or(RoamError::DestinationNotFound { id: destination_id })?;

        log::debug!(
            "Loaded catalog for {}: {} places, {} activities, {} dishes",
            destination.name,
            places.len(),
            activities.len(),
            culinary.len()
        );

        Ok(Self {
            destination,
            places,
            activities,
            culinary,
        })
    }

    /// Cost of a catalog item, or `None` if the snapshot has no such item.
    pub fn cost_of(&self, item: ItemRef) -> Option<Money> {
        match item.category {
            Category::Place => find(&self.places, item.id).map(CatalogItem::cost),
            Category::Activity => find(&self.activities, item.id).map(CatalogItem::cost),
            Category::Culinary => find(&self.culinary, item.id).map(CatalogItem::cost),
        }
    }

    /// Display name of a catalog item.
    pub fn label_of(&self, item: ItemRef) -> Option<&str> {
        match item.category {
            Category::Place => find(&self.places, item.id).map(CatalogItem::label),
            Category::Activity => find(&self.activities, item.id).map(CatalogItem::label),
            Category::Culinary => find(&self.culinary, item.id).map(CatalogItem::label),
        }
    }

    pub fn contains(&self, item: ItemRef) -> bool {
        self.cost_of(item).is_some()
    }
}

fn find<T: CatalogItem>(items: &[T], id: u64) -> Option<&T> {
    items.iter().find(|item| item.id() == id)
}
