//! Forward-only status progression for persisted trips.

use crate::{
    error::{RoamError, Result},
    hydrator::Hydrator,
    models::{Transition, Trip, TripDetails},
    params::{Caller, UpdateTripStatus},
    store::TripStore,
};

/// The transition offered for a trip in its current status, if any.
///
/// `completed` trips have none; there is no way to move a trip backwards.
pub fn available_transition(trip: &Trip) -> Option<Transition> {
    trip.status.next_transition()
}

/// Moves trips through `planned → ongoing → completed` on behalf of a caller.
pub struct LifecycleController<'a, S: ?Sized> {
    store: &'a S,
    caller: &'a Caller,
}

impl<'a, S: TripStore + ?Sized> LifecycleController<'a, S> {
    pub fn new(store: &'a S, caller: &'a Caller) -> Self {
        Self { store, caller }
    }

    /// Issues one status update and reads the trip back.
    ///
    /// # Errors
    ///
    /// Returns `RoamError::StatusTransitionRejected` if the trip is no longer in
    /// the transition's starting status, and `RoamError::TripNotFound` if the
    /// caller has no such trip.
    pub async fn apply(&self, trip_id: u64, transition: Transition) -> Result<TripDetails> {
        log::debug!(
            "Moving trip {trip_id} from {} to {}",
            transition.from().as_str(),
            transition.to().as_str()
        );

        let request = UpdateTripStatus {
            trip_id,
            transition,
        };
        self.store.update_trip_status(self.caller, &request).await?;

        log::info!("Trip {trip_id} is now {}", transition.to().as_str());
        Hydrator::new(self.store).hydrate(self.caller, trip_id).await
    }

    /// Takes the trip one step forward from whatever status it has now.
    ///
    /// Returns the transition that was applied with the trip as read back.
    pub async fn advance(&self, trip_id: u64) -> Result<(Transition, TripDetails)> {
        let current = Hydrator::new(self.store).hydrate(self.caller, trip_id).await?;

        let transition =
            available_transition(&current.trip).ok_or_else(|| RoamError::StatusTransitionRejected {
                trip_id,
                reason: format!("trip is already {}", current.trip.status.as_str()),
            })?;

        let details = self.apply(trip_id, transition).await?;
        Ok((transition, details))
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;
    use crate::models::{Money, TripStatus};

    fn trip(status: TripStatus) -> Trip {
        Trip {
            id: 1,
            user_id: "alice".to_string(),
            destination_id: 1,
            name: "Trip to Goa".to_string(),
            status,
            total_budget: Money(1000),
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[test]
    fn test_transitions_only_move_forward() {
        let planned = available_transition(&trip(TripStatus::Planned)).unwrap();
        assert_eq!(planned.from(), TripStatus::Planned);
        assert_eq!(planned.to(), TripStatus::Ongoing);

        let ongoing = available_transition(&trip(TripStatus::Ongoing)).unwrap();
        assert_eq!(ongoing.to(), TripStatus::Completed);

        assert!(available_transition(&trip(TripStatus::Completed)).is_none());
    }

    #[test]
    fn test_no_transition_leads_back_to_planned() {
        for status in [
            TripStatus::Planned,
            TripStatus::Ongoing,
            TripStatus::Completed,
        ] {
            if let Some(t) = status.next_transition() {
                assert_ne!(t.to(), TripStatus::Planned);
                assert_ne!(t.to(), t.from());
            }
        }
    }
}
