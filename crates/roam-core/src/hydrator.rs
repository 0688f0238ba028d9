//! Read-side reconstruction of a composed trip.
//!
//! Backing stores return item records either flat (the catalog row itself) or
//! as join rows nesting the catalog row one level under its category key. Both
//! shapes are decoded into a [`JoinRecord`] at the boundary; everything after
//! that only sees resolved catalog items.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    error::{RoamError, Result},
    models::{Category, TripDetails},
    params::Caller,
    store::{TripDetailsResponse, TripStore},
};

/// One raw item record after decoding.
#[derive(Debug, Clone, PartialEq)]
pub enum JoinRecord<T> {
    /// The record is the catalog item itself.
    Flat(T),
    /// The record nests the catalog item under its category key; `None` when
    /// the nested value is null.
    Nested(Option<T>),
}

impl<T: DeserializeOwned> JoinRecord<T> {
    /// Decodes a raw record, looking for a nested item under `nested_key`.
    pub fn decode(value: Value, nested_key: &str) -> Result<Self> {
        match value {
            Value::Object(mut fields) if fields.contains_key(nested_key) => {
                match fields.remove(nested_key).unwrap_or(Value::Null) {
                    Value::Null => Ok(JoinRecord::Nested(None)),
                    nested => Ok(JoinRecord::Nested(Some(serde_json::from_value(nested)?))),
                }
            }
            flat => Ok(JoinRecord::Flat(serde_json::from_value(flat)?)),
        }
    }

    /// The resolved item, if any.
    pub fn into_item(self) -> Option<T> {
        match self {
            JoinRecord::Flat(item) => Some(item),
            JoinRecord::Nested(item) => item,
        }
    }
}

/// Decodes one category list. Returns the resolved items and the number of
/// records that could not be resolved.
fn resolve<T: DeserializeOwned>(
    records: Option<Vec<Value>>,
    category: Category,
) -> (Vec<T>, usize) {
    let Some(records) = records else {
        log::debug!("No {} list in trip response", category.nested_key());
        return (Vec::new(), 0);
    };

    let mut items = Vec::with_capacity(records.len());
    let mut gaps = 0;
    for record in records {
        match JoinRecord::<T>::decode(record, category.nested_key()) {
            Ok(decoded) => match decoded.into_item() {
                Some(item) => items.push(item),
                None => gaps += 1,
            },
            Err(e) => {
                log::warn!("Skipping undecodable {} record: {e}", category.as_str());
                gaps += 1;
            }
        }
    }
    (items, gaps)
}

/// Normalises a store response into a display-ready trip.
///
/// Category lists are always present in the result, and every record that
/// does not resolve to a catalog item is counted in `gaps` instead.
pub fn normalize(response: TripDetailsResponse) -> TripDetails {
    let (places, place_gaps) = resolve(response.places, Category::Place);
    let (activities, activity_gaps) = resolve(response.activities, Category::Activity);
    let (culinary, culinary_gaps) = resolve(response.culinary, Category::Culinary);

    let gaps = place_gaps + activity_gaps + culinary_gaps;
    if gaps > 0 {
        log::warn!("Trip {} has {gaps} unresolved item(s)", response.trip.id);
    }

    TripDetails {
        trip: response.trip,
        places,
        activities,
        culinary,
        gaps,
    }
}

/// Reads trips back from a [`TripStore`] for display.
pub struct Hydrator<'a, S: ?Sized> {
    store: &'a S,
}

impl<'a, S: TripStore + ?Sized> Hydrator<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Reads a trip and resolves its attached items.
    ///
    /// # Errors
    ///
    /// Returns `RoamError::TripNotFound` if the caller has no such trip.
    pub async fn hydrate(&self, caller: &Caller, trip_id: u64) -> Result<TripDetails> {
        let response = self
            .store
            .get_trip_details(caller, trip_id)
            .await?
            .ok_or(RoamError::TripNotFound { id: trip_id })?;

        Ok(normalize(response))
    }
}
