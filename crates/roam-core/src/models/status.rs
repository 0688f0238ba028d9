//! Status enumerations for trips and composition sessions.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Type-safe enumeration of trip statuses.
///
/// Trips move strictly forward: `planned → ongoing → completed`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TripStatus {
    /// Trip has been composed but not started
    #[default]
    Planned,

    /// Traveler is on the trip
    Ongoing,

    /// Trip is over
    Completed,
}

impl FromStr for TripStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "planned" => Ok(TripStatus::Planned),
            "ongoing" => Ok(TripStatus::Ongoing),
            "completed" => Ok(TripStatus::Completed),
            _ => Err(format!("Invalid trip status: {s}")),
        }
    }
}

impl TripStatus {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            TripStatus::Planned => "planned",
            TripStatus::Ongoing => "ongoing",
            TripStatus::Completed => "completed",
        }
    }

    /// The only transition offered from this status, if any.
    ///
    /// ```rust
    /// use roam_core::models::TripStatus;
    ///
    /// let t = TripStatus::Planned.next_transition().unwrap();
    /// assert_eq!(t.to(), TripStatus::Ongoing);
    /// assert!(TripStatus::Completed.next_transition().is_none());
    /// ```
    pub fn next_transition(self) -> Option<Transition> {
        let to = match self {
            TripStatus::Planned => TripStatus::Ongoing,
            TripStatus::Ongoing => TripStatus::Completed,
            TripStatus::Completed => return None,
        };
        Some(Transition { from: self, to })
    }

    /// Whether no further transition exists.
    pub fn is_terminal(self) -> bool {
        self.next_transition().is_none()
    }

    /// Get status with consistent icon formatting for display.
    pub fn with_icon(&self) -> &'static str {
        match self {
            TripStatus::Planned => "○ Planned",
            TripStatus::Ongoing => "➤ Ongoing",
            TripStatus::Completed => "✓ Completed",
        }
    }
}

/// A forward status change for a trip.
///
/// Values can only be obtained from [`TripStatus::next_transition`], so a
/// backward move or a move out of `completed` cannot be expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Transition {
    from: TripStatus,
    to: TripStatus,
}

impl Transition {
    /// Status the trip must currently have.
    pub fn from(&self) -> TripStatus {
        self.from
    }

    /// Status the trip will have afterwards.
    pub fn to(&self) -> TripStatus {
        self.to
    }
}

/// Phase of a composition session's submission.
///
/// `Idle → Creating → Attaching → Done`, with `Failed` reachable only from
/// `Creating`. A failed session may be submitted again.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionPhase {
    #[default]
    Idle,
    Creating,
    Attaching,
    Done,
    Failed,
}

impl SubmissionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionPhase::Idle => "idle",
            SubmissionPhase::Creating => "creating",
            SubmissionPhase::Attaching => "attaching",
            SubmissionPhase::Done => "done",
            SubmissionPhase::Failed => "failed",
        }
    }

    /// The selection may still be edited and submitted.
    pub fn is_editable(self) -> bool {
        matches!(self, SubmissionPhase::Idle | SubmissionPhase::Failed)
    }
}
