//! Turns a finished composition session into a persisted trip.
//!
//! Submission runs `Idle → Creating → Attaching → Done` on the session. A
//! failed create moves the session to `Failed` and leaves the selection as it
//! was, so the traveler can simply submit again. Once the trip exists every
//! selected item is attached one request at a time and each result is
//! recorded in the [`SubmitReport`]; a failing attachment never stops the
//! remaining ones.

use std::{future::Future, time::Duration};

use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::{
    budget::BudgetBreakdown,
    error::{RoamError, Result},
    hydrator::Hydrator,
    models::{ItemRef, SubmissionPhase, Trip, TripDetails},
    params::{AttachItem, Caller, CreateTrip},
    selection::CompositionSession,
    store::TripStore,
};

/// Default time allowed for a single create or attach request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// What to do with a created trip when some attachments did not succeed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttachFailurePolicy {
    /// Keep the trip with the items that were attached.
    #[default]
    KeepPartial,
    /// Delete the trip so the submission can be retried from scratch.
    DeleteTrip,
}

/// Submission settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitOptions {
    pub request_timeout: Duration,
    pub failure_policy: AttachFailurePolicy,
}

impl Default for SubmitOptions {
    fn default() -> Self {
        Self {
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            failure_policy: AttachFailurePolicy::default(),
        }
    }
}

impl SubmitOptions {
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_failure_policy(mut self, policy: AttachFailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }
}

/// Result of one attach request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AttachStatus {
    Attached,
    Failed { reason: String },
    TimedOut,
    /// Never issued because the submission was cancelled first.
    Skipped,
}

impl AttachStatus {
    pub fn is_attached(&self) -> bool {
        matches!(self, AttachStatus::Attached)
    }
}

/// A selected item and what happened when attaching it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttachOutcome {
    pub item: ItemRef,
    #[serde(flatten)]
    pub status: AttachStatus,
}

/// Overall classification of a submission that created a trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitOutcome {
    /// Every selected item was attached.
    Complete,
    /// The trip exists but some items are missing from it.
    Partial,
    /// Cancellation stopped the attach phase; the trip was kept.
    Cancelled,
    /// The trip was deleted again after an incomplete attach phase.
    Compensated,
}

/// Aggregate result of a submission.
#[derive(Debug, Clone, Serialize)]
pub struct SubmitReport {
    /// The trip as created
    pub trip: Trip,
    /// Budget the trip total was taken from
    pub budget: BudgetBreakdown,
    /// One entry per selected item, in attach order
    pub attachments: Vec<AttachOutcome>,
    pub cancelled: bool,
    /// The trip was deleted by the failure policy
    pub compensated: bool,
    /// The trip as read back after submission, when it was kept and could be
    /// read
    pub details: Option<TripDetails>,
}

impl SubmitReport {
    pub fn outcome(&self) -> SubmitOutcome {
        if self.compensated {
            SubmitOutcome::Compensated
        } else if self.cancelled {
            SubmitOutcome::Cancelled
        } else if self.attachments.iter().all(|a| a.status.is_attached()) {
            SubmitOutcome::Complete
        } else {
            SubmitOutcome::Partial
        }
    }

    /// Items that were attached.
    pub fn attached(&self) -> impl Iterator<Item = ItemRef> + '_ {
        self.attachments
            .iter()
            .filter(|a| a.status.is_attached())
            .map(|a| a.item)
    }

    /// Items that were not attached, with the reason.
    pub fn failures(&self) -> impl Iterator<Item = &AttachOutcome> + '_ {
        self.attachments.iter().filter(|a| !a.status.is_attached())
    }
}

/// A request raced against cancellation and its timeout.
#[derive(Debug)]
enum Guarded<T> {
    Value(T),
    TimedOut,
    Cancelled,
}

async fn await_guarded<T, F>(token: &CancellationToken, timeout: Duration, fut: F) -> Guarded<T>
where
    F: Future<Output = T>,
{
    tokio::select! {
        biased;
        _ = token.cancelled() => Guarded::Cancelled,
        result = tokio::time::timeout(timeout, fut) => match result {
            Ok(value) => Guarded::Value(value),
            Err(_) => Guarded::TimedOut,
        },
    }
}

/// Persists composition sessions through a [`TripStore`].
pub struct TripOrchestrator<'a, S: ?Sized> {
    store: &'a S,
    options: SubmitOptions,
}

impl<'a, S: TripStore + ?Sized> TripOrchestrator<'a, S> {
    pub fn new(store: &'a S, options: SubmitOptions) -> Self {
        Self { store, options }
    }

    /// Creates a trip for the session and attaches every selected item.
    ///
    /// # Errors
    ///
    /// Returns `RoamError::SessionLocked` if the session is not in an editable
    /// phase, and `RoamError::CreateFailed` if the trip could not be created
    /// (including timeout and cancellation). No item is attached in that case.
    pub async fn submit(
        &self,
        session: &mut CompositionSession,
        token: &CancellationToken,
    ) -> Result<SubmitReport> {
        session.ensure_editable()?;

        let budget = *session.budget();
        let caller = session.caller().clone();
        let selected: Vec<ItemRef> = session.selection().iter().collect();

        session.set_phase(SubmissionPhase::Creating);
        let trip = match self.create(session, &budget, token).await {
            Ok(trip) => trip,
            Err(e) => {
                session.set_phase(SubmissionPhase::Failed);
                return Err(e);
            }
        };

        session.set_phase(SubmissionPhase::Attaching);
        let mut attachments = Vec::with_capacity(selected.len());
        let mut cancelled = false;

        for item in selected {
            if cancelled || token.is_cancelled() {
                cancelled = true;
                attachments.push(AttachOutcome {
                    item,
                    status: AttachStatus::Skipped,
                });
                continue;
            }

            let status = self.attach(&caller, trip.id, item, token).await;
            if matches!(status, AttachStatus::Failed { .. }) && token.is_cancelled() {
                cancelled = true;
            }
            attachments.push(AttachOutcome { item, status });
        }

        let incomplete = attachments.iter().any(|a| !a.status.is_attached());
        let compensated = incomplete
            && self.options.failure_policy == AttachFailurePolicy::DeleteTrip
            && self.compensate(&caller, trip.id).await;

        if compensated {
            session.set_phase(SubmissionPhase::Idle);
        } else {
            session.set_phase(SubmissionPhase::Done);
        }

        let details = if compensated || cancelled {
            None
        } else {
            match Hydrator::new(self.store).hydrate(&caller, trip.id).await {
                Ok(details) => Some(details),
                Err(e) => {
                    log::warn!("Could not read back trip {}: {e}", trip.id);
                    None
                }
            }
        };

        let report = SubmitReport {
            trip,
            budget,
            attachments,
            cancelled,
            compensated,
            details,
        };
        log::info!(
            "Submitted trip {}: {:?}, {} attached, {} not attached",
            report.trip.id,
            report.outcome(),
            report.attached().count(),
            report.failures().count()
        );
        Ok(report)
    }

    async fn create(
        &self,
        session: &CompositionSession,
        budget: &BudgetBreakdown,
        token: &CancellationToken,
    ) -> Result<Trip> {
        let request = CreateTrip {
            destination_id: session.snapshot().destination.id,
            total_budget: budget.total,
            name: session.trip_name(),
        };
        log::debug!(
            "Creating trip {:?} for destination {} with budget {}",
            request.name,
            request.destination_id,
            request.total_budget.amount()
        );

        let create = self.store.create_trip(session.caller(), &request);
        match await_guarded(token, self.options.request_timeout, create).await {
            Guarded::Value(Ok(trip)) => Ok(trip),
            Guarded::Value(Err(e)) => Err(RoamError::CreateFailed {
                reason: e.to_string(),
            }),
            Guarded::TimedOut => Err(RoamError::CreateFailed {
                reason: format!(
                    "no response within {}s",
                    self.options.request_timeout.as_secs_f64()
                ),
            }),
            Guarded::Cancelled => Err(RoamError::CreateFailed {
                reason: "submission was cancelled".to_string(),
            }),
        }
    }

    async fn attach(
        &self,
        caller: &Caller,
        trip_id: u64,
        item: ItemRef,
        token: &CancellationToken,
    ) -> AttachStatus {
        let request = AttachItem { trip_id, item };
        log::debug!("Attaching {} {} to trip {trip_id}", item.category.as_str(), item.id);

        let attach = self.store.attach_item(caller, &request);
        let status = match await_guarded(token, self.options.request_timeout, attach).await {
            Guarded::Value(Ok(_)) => AttachStatus::Attached,
            Guarded::Value(Err(e)) => AttachStatus::Failed {
                reason: e.to_string(),
            },
            Guarded::TimedOut => AttachStatus::TimedOut,
            // The store may still complete the abandoned request
            Guarded::Cancelled => AttachStatus::Failed {
                reason: "cancelled while in flight".to_string(),
            },
        };

        if !status.is_attached() {
            log::warn!(
                "Attaching {} {} to trip {trip_id} did not succeed: {status:?}",
                item.category.as_str(),
                item.id
            );
        }
        status
    }

    /// Deletes a trip left incomplete. Returns whether the deletion succeeded.
    async fn compensate(&self, caller: &Caller, trip_id: u64) -> bool {
        log::warn!("Deleting incomplete trip {trip_id}");

        let delete = self.store.delete_trip(caller, trip_id);
        match tokio::time::timeout(self.options.request_timeout, delete).await {
            Ok(Ok(())) => true,
            Ok(Err(e)) => {
                log::warn!("Could not delete incomplete trip {trip_id}: {e}");
                false
            }
            Err(_) => {
                log::warn!("Deleting incomplete trip {trip_id} timed out");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, TripStatus};

    fn report(statuses: Vec<AttachStatus>) -> SubmitReport {
        SubmitReport {
            trip: Trip {
                id: 1,
                user_id: "alice".to_string(),
                destination_id: 1,
                name: "Trip to Goa".to_string(),
                status: TripStatus::Planned,
                total_budget: Money(100),
                created_at: jiff::Timestamp::UNIX_EPOCH,
                updated_at: jiff::Timestamp::UNIX_EPOCH,
            },
            budget: BudgetBreakdown::default(),
            attachments: statuses
                .into_iter()
                .enumerate()
                .map(|(i, status)| AttachOutcome {
                    item: ItemRef::place(i as u64 + 1),
                    status,
                })
                .collect(),
            cancelled: false,
            compensated: false,
            details: None,
        }
    }

    #[test]
    fn test_outcome_classification() {
        assert_eq!(report(vec![]).outcome(), SubmitOutcome::Complete);
        assert_eq!(
            report(vec![AttachStatus::Attached, AttachStatus::Attached]).outcome(),
            SubmitOutcome::Complete
        );

        let partial = report(vec![AttachStatus::Attached, AttachStatus::TimedOut]);
        assert_eq!(partial.outcome(), SubmitOutcome::Partial);
        assert_eq!(partial.attached().collect::<Vec<_>>(), vec![ItemRef::place(1)]);
        assert_eq!(partial.failures().count(), 1);

        let mut cancelled = report(vec![AttachStatus::Attached, AttachStatus::Skipped]);
        cancelled.cancelled = true;
        assert_eq!(cancelled.outcome(), SubmitOutcome::Cancelled);

        cancelled.compensated = true;
        assert_eq!(cancelled.outcome(), SubmitOutcome::Compensated);
    }

    #[test]
    fn test_options_builder() {
        let options = SubmitOptions::default()
            .with_request_timeout(Duration::from_millis(250))
            .with_failure_policy(AttachFailurePolicy::DeleteTrip);

        assert_eq!(options.request_timeout, Duration::from_millis(250));
        assert_eq!(options.failure_policy, AttachFailurePolicy::DeleteTrip);
        assert_eq!(
            SubmitOptions::default().request_timeout,
            DEFAULT_REQUEST_TIMEOUT
        );
    }

    #[tokio::test]
    async fn test_await_guarded_prefers_cancellation() {
        let token = CancellationToken::new();
        token.cancel();

        let result = await_guarded(&token, Duration::from_secs(1), async { 7 }).await;
        assert!(matches!(result, Guarded::Cancelled));
    }

    #[tokio::test]
    async fn test_await_guarded_times_out() {
        let token = CancellationToken::new();

        let result = await_guarded(
            &token,
            Duration::from_millis(10),
            tokio::time::sleep(Duration::from_secs(5)),
        )
        .await;
        assert!(matches!(result, Guarded::TimedOut));
    }
}
