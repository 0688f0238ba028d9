//! Collection wrapper types for displaying groups of domain objects.

use std::{fmt, ops::Index};

use super::datetime::LocalDate;
use crate::models::{Destination, Money, TripSummary};

/// Newtype wrapper for displaying a caller's trips.
///
/// # Examples
///
/// ```rust
/// use roam_core::{
///     display::TripSummaries,
///     models::{Money, TripStatus, TripSummary},
/// };
/// use jiff::Timestamp;
///
/// let trip = TripSummary {
///     id: 1,
///     name: "Trip to Goa".to_string(),
///     destination_id: 3,
///     destination_name: Some("Goa".to_string()),
///     status: TripStatus::Planned,
///     total_budget: Money(28800),
///     created_at: Timestamp::now(),
///     item_count: 2,
/// };
///
/// let output = TripSummaries(vec![trip]).to_string();
/// assert!(output.contains("Trip to Goa"));
/// assert!(output.contains("₹28,800"));
/// ```
pub struct TripSummaries(pub Vec<TripSummary>);

impl TripSummaries {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TripSummary> {
        self.0.iter()
    }

    /// Sum of the budgets of all listed trips.
    pub fn total_budget(&self) -> Money {
        self.0.iter().map(|t| t.total_budget).sum()
    }
}

impl Index<usize> for TripSummaries {
    type Output = TripSummary;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl<'a> IntoIterator for &'a TripSummaries {
    type Item = &'a TripSummary;
    type IntoIter = std::slice::Iter<'a, TripSummary>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for TripSummaries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No trips found.")
        } else {
            for trip in &self.0 {
                write!(f, "{trip}")?;
            }
            Ok(())
        }
    }
}

/// Newtype wrapper for displaying destinations as a table.
pub struct Destinations(pub Vec<Destination>);

impl Destinations {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for Destinations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No destinations found. Import a catalog first.");
        }

        writeln!(f, "| ID | Destination | Country | Best season | Base cost |")?;
        writeln!(f, "|-:|:-|:-|:-|-:|")?;
        for d in &self.0 {
            writeln!(
                f,
                "| {} | {} | {} | {} | {} |",
                d.id,
                d.name,
                d.country.as_deref().unwrap_or("-"),
                d.best_season.as_deref().unwrap_or("-"),
                d.base_cost()
            )?;
        }
        Ok(())
    }
}

/// Single-line rendering of a trip, for compact listings.
pub struct TripLine<'a>(pub &'a TripSummary);

impl<'a> fmt::Display for TripLine<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let trip = self.0;
        write!(
            f,
            "{}. {} [{}] {} ({} items, {})",
            trip.id,
            trip.name,
            trip.status,
            trip.total_budget,
            trip.item_count,
            LocalDate(&trip.created_at)
        )
    }
}
