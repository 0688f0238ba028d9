//! Display implementations for domain models.
//!
//! Kept apart from the model definitions so the data structures carry no
//! presentation logic. Everything renders as markdown for the terminal
//! renderer.

use std::fmt;

use super::datetime::LocalDateTime;
use crate::{
    budget::BudgetBreakdown,
    models::{
        Activity, CatalogItem, Category, CulinaryItem, Destination, Money, Place, SubmissionPhase,
        Trip, TripDetails, TripStatus, TripSummary,
    },
};

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.0.unsigned_abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{sign}₹{grouped}")
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for TripStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for SubmissionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn optional_cost(cost: Option<Money>) -> String {
    match cost {
        Some(cost) => cost.to_string(),
        None => "n/a".to_string(),
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.country {
            Some(country) => writeln!(f, "# {}. {}, {country}", self.id, self.name)?,
            None => writeln!(f, "# {}. {}", self.id, self.name)?,
        }
        writeln!(f)?;

        if let Some(category) = &self.category {
            writeln!(f, "- Category: {category}")?;
        }
        if let Some(climate) = &self.climate {
            writeln!(f, "- Climate: {climate}")?;
        }
        if let Some(season) = &self.best_season {
            writeln!(f, "- Best season: {season}")?;
        }
        writeln!(f, "- Flight: {}", optional_cost(self.flight_cost))?;
        writeln!(f, "- Stay: {}", optional_cost(self.stay_cost))?;
        writeln!(f, "- Food: {}", optional_cost(self.food_cost))?;

        if let Some(desc) = &self.description {
            writeln!(f)?;
            writeln!(f, "{desc}")?;
        }

        Ok(())
    }
}

impl fmt::Display for Place {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "- **{}** (ID: {}) {}", self.name, self.id, self.cost())?;
        if let Some(when) = &self.best_time_to_visit {
            write!(f, ", best visited {when}")?;
        }
        writeln!(f)
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "- **{}** (ID: {}) {}", self.name, self.id, self.cost())?;
        if let Some(kind) = &self.kind {
            write!(f, ", {kind}")?;
        }
        if let Some(hours) = self.duration_hours {
            write!(f, ", {hours}h")?;
        }
        writeln!(f)
    }
}

impl fmt::Display for CulinaryItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "- **{}** (ID: {}) {}", self.dish_name, self.id, self.cost())
    }
}

impl fmt::Display for Trip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}. {}", self.id, self.name)?;
        writeln!(f)?;
        writeln!(f, "- Status: {}", self.status.with_icon())?;
        writeln!(f, "- Budget: {}", self.total_budget)?;
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        if self.updated_at != self.created_at {
            writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))?;
        }
        Ok(())
    }
}

/// Writes one category section of a hydrated trip.
fn fmt_section<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    title: &str,
    items: &[T],
) -> fmt::Result {
    writeln!(f, "\n## {title} ({})", items.len())?;
    writeln!(f)?;
    if items.is_empty() {
        writeln!(f, "None selected.")?;
    }
    for item in items {
        write!(f, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for TripDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.trip)?;

        fmt_section(f, "Places", &self.places)?;
        fmt_section(f, "Activities", &self.activities)?;
        fmt_section(f, "Culinary", &self.culinary)?;

        if self.gaps > 0 {
            writeln!(
                f,
                "\n*{} attached item(s) are no longer in the catalog.*",
                self.gaps
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for TripSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {} (ID: {})", self.name, self.id)?;
        writeln!(f)?;

        match &self.destination_name {
            Some(name) => writeln!(f, "- **Destination**: {name}")?,
            None => writeln!(f, "- **Destination**: #{}", self.destination_id)?,
        }
        writeln!(f, "- **Status**: {}", self.status.with_icon())?;
        writeln!(f, "- **Budget**: {}", self.total_budget)?;
        writeln!(f, "- **Items**: {}", self.item_count)?;
        writeln!(f, "- **Created**: {}", LocalDateTime(&self.created_at))?;
        writeln!(f)?;

        Ok(())
    }
}

impl fmt::Display for BudgetBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "| Item | Cost |")?;
        writeln!(f, "|:-|-:|")?;
        writeln!(f, "| Flight | {} |", self.flight_cost)?;
        writeln!(f, "| Stay | {} |", self.stay_cost)?;
        writeln!(f, "| Food | {} |", self.food_cost)?;
        for category in Category::ALL {
            let label = match category {
                Category::Place => "Places",
                Category::Activity => "Activities",
                Category::Culinary => "Culinary",
            };
            writeln!(f, "| {label} | {} |", self.subtotal(category))?;
        }
        writeln!(f, "| **Total** | **{}** |", self.total)
    }
}
