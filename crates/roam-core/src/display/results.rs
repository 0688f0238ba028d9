//! Wrapper types for displaying workflow results.

use std::fmt;

use crate::{
    models::{CatalogItem, Category, TripDetails, TripStatus},
    orchestrator::{AttachStatus, SubmitReport},
    selection::{CompositionSession, SelectionSet},
    snapshot::CatalogSnapshot,
};

/// A destination with everything its catalog offers.
///
/// Items in `selection`, if given, are marked as chosen.
pub struct CatalogView<'a> {
    pub snapshot: &'a CatalogSnapshot,
    pub selection: Option<&'a SelectionSet>,
}

impl<'a> CatalogView<'a> {
    pub fn new(snapshot: &'a CatalogSnapshot) -> Self {
        Self {
            snapshot,
            selection: None,
        }
    }

    pub fn with_selection(mut self, selection: &'a SelectionSet) -> Self {
        self.selection = Some(selection);
        self
    }

    fn fmt_items<T: CatalogItem>(&self, f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
        writeln!(f, "\n## {} ({})", heading(T::CATEGORY), items.len())?;
        writeln!(f)?;
        if items.is_empty() {
            return writeln!(f, "Nothing listed.");
        }
        for item in items {
            let mark = match self.selection {
                Some(selection) if selection.contains(item.item_ref()) => "[x] ",
                Some(_) => "[ ] ",
                None => "",
            };
            writeln!(f, "- {mark}{} (ID: {}) {}", item.label(), item.id(), item.cost())?;
        }
        Ok(())
    }
}

fn heading(category: Category) -> &'static str {
    match category {
        Category::Place => "Places",
        Category::Activity => "Activities",
        Category::Culinary => "Culinary",
    }
}

impl<'a> fmt::Display for CatalogView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.snapshot.destination)?;
        self.fmt_items(f, &self.snapshot.places)?;
        self.fmt_items(f, &self.snapshot.activities)?;
        self.fmt_items(f, &self.snapshot.culinary)
    }
}

/// The current state of a composition: selected items and the running budget.
pub struct CompositionView<'a>(pub &'a CompositionSession);

impl<'a> fmt::Display for CompositionView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let session = self.0;
        let snapshot = session.snapshot();

        writeln!(f, "# {}", session.trip_name())?;
        writeln!(f)?;
        writeln!(f, "- Destination: {}", snapshot.destination.name)?;
        writeln!(f, "- Selected items: {}", session.selected_count())?;

        for category in Category::ALL {
            let mut items = session.selection().items(category).peekable();
            if items.peek().is_none() {
                continue;
            }
            writeln!(f, "\n## {}", heading(category))?;
            writeln!(f)?;
            for item in items {
                let label = snapshot.label_of(item).unwrap_or("(unknown)");
                let cost = snapshot.cost_of(item).unwrap_or_default();
                writeln!(f, "- {label} (ID: {}) {cost}", item.id)?;
            }
        }

        writeln!(f, "\n## Budget")?;
        writeln!(f)?;
        write!(f, "{}", session.budget())
    }
}

impl fmt::Display for AttachStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttachStatus::Attached => write!(f, "attached"),
            AttachStatus::Failed { reason } => write!(f, "failed: {reason}"),
            AttachStatus::TimedOut => write!(f, "timed out"),
            AttachStatus::Skipped => write!(f, "skipped"),
        }
    }
}

impl fmt::Display for SubmitReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.attachments.is_empty() {
            writeln!(f, "| Item | ID | Result |")?;
            writeln!(f, "|:-|-:|:-|")?;
            for attachment in &self.attachments {
                writeln!(
                    f,
                    "| {} | {} | {} |",
                    attachment.item.category, attachment.item.id, attachment.status
                )?;
            }
            writeln!(f)?;
        }

        match &self.details {
            Some(details) => write!(f, "{details}"),
            None if self.compensated => Ok(()),
            None => write!(f, "{}", self.trip),
        }
    }
}

/// A trip after a lifecycle step.
pub struct TransitionResult {
    pub from: TripStatus,
    pub details: TripDetails,
}

impl fmt::Display for TransitionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Trip {} moved from {} to {}",
            self.details.trip.id, self.from, self.details.trip.status
        )?;
        writeln!(f)?;
        write!(f, "{}", self.details)
    }
}
