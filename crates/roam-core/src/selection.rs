//! Selection state for one composition session.
//!
//! A [`CompositionSession`] is the only place selection state lives. It is
//! created when a destination view opens, passed by reference to the budget
//! aggregator and the orchestrator, and simply dropped when the traveler
//! abandons composition.

use std::sync::Arc;

use serde::Serialize;

use crate::{
    budget::BudgetBreakdown,
    error::{RoamError, Result},
    models::{Category, ItemRef, SubmissionPhase},
    params::Caller,
    snapshot::CatalogSnapshot,
};

/// Chosen item ids per category.
///
/// An id appears at most once per category. Ids keep the order in which they
/// were selected, which is the order they are attached in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SelectionSet {
    places: Vec<u64>,
    activities: Vec<u64>,
    culinary: Vec<u64>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    fn ids_mut(&mut self, category: Category) -> &mut Vec<u64> {
        match category {
            Category::Place => &mut self.places,
            Category::Activity => &mut self.activities,
            Category::Culinary => &mut self.culinary,
        }
    }

    /// Selected ids of one category in selection order.
    pub fn ids(&self, category: Category) -> &[u64] {
        match category {
            Category::Place => &self.places,
            Category::Activity => &self.activities,
            Category::Culinary => &self.culinary,
        }
    }

    /// Removes the item if present, adds it otherwise. Returns whether the
    /// item is selected afterwards.
    pub fn toggle(&mut self, item: ItemRef) -> bool {
        let ids = self.ids_mut(item.category);
        match ids.iter().position(|&id| id == item.id) {
            Some(index) => {
                ids.remove(index);
                false
            }
            None => {
                ids.push(item.id);
                true
            }
        }
    }

    pub fn contains(&self, item: ItemRef) -> bool {
        self.ids(item.category).contains(&item.id)
    }

    /// Selected items of one category.
    pub fn items(&self, category: Category) -> impl Iterator<Item = ItemRef> + '_ {
        self.ids(category)
            .iter()
            .map(move |&id| ItemRef::new(category, id))
    }

    /// All selected items in attach order: places, then activities, then
    /// culinary items, each in selection order.
    pub fn iter(&self) -> impl Iterator<Item = ItemRef> + '_ {
        Category::ALL
            .into_iter()
            .flat_map(move |category| self.items(category))
    }

    /// Total number of selected items across the three categories.
    pub fn selected_count(&self) -> usize {
        self.places.len() + self.activities.len() + self.culinary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected_count() == 0
    }
}

/// Session-scoped composition state for one destination.
#[derive(Debug, Clone)]
pub struct CompositionSession {
    caller: Caller,
    snapshot: Arc<CatalogSnapshot>,
    selection: SelectionSet,
    budget: BudgetBreakdown,
    phase: SubmissionPhase,
    name: Option<String>,
}

impl CompositionSession {
    /// Opens a session with an empty selection.
    pub fn new(caller: Caller, snapshot: Arc<CatalogSnapshot>) -> Self {
        let selection = SelectionSet::new();
        let budget = BudgetBreakdown::compute(&snapshot, &selection);

        Self {
            caller,
            snapshot,
            selection,
            budget,
            phase: SubmissionPhase::Idle,
            name: None,
        }
    }

    /// Toggles one catalog item and recomputes the budget.
    ///
    /// Returns whether the item is selected afterwards.
    ///
    /// # Errors
    ///
    /// Returns `RoamError::SessionLocked` while a submission is in flight or
    /// after it completed, and `RoamError::UnknownCatalogItem` if the
    /// snapshot has no such item.
    pub fn toggle(&mut self, category: Category, id: u64) -> Result<bool> {
        self.ensure_editable()?;

        let item = ItemRef::new(category, id);
        if !self.snapshot.contains(item) {
            return Err(RoamError::UnknownCatalogItem { category, id });
        }

        let selected = self.selection.toggle(item);
        self.budget = BudgetBreakdown::compute(&self.snapshot, &self.selection);
        Ok(selected)
    }

    /// Overrides the default trip name.
    pub fn rename(&mut self, name: impl Into<String>) -> Result<()> {
        self.ensure_editable()?;

        let name = name.into();
        if name.trim().is_empty() {
            return Err(RoamError::invalid_input("name").with_reason("Trip name must not be empty"));
        }
        self.name = Some(name);
        Ok(())
    }

    /// Name the trip will be created with.
    pub fn trip_name(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("Trip to {}", self.snapshot.destination.name),
        }
    }

    pub fn caller(&self) -> &Caller {
        &self.caller
    }

    pub fn snapshot(&self) -> &CatalogSnapshot {
        &self.snapshot
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn budget(&self) -> &BudgetBreakdown {
        &self.budget
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.phase
    }

    pub fn selected_count(&self) -> usize {
        self.selection.selected_count()
    }

    pub(crate) fn set_phase(&mut self, phase: SubmissionPhase) {
        log::info!(
            "Session for {}: {} -> {}",
            self.snapshot.destination.name,
            self.phase.as_str(),
            phase.as_str()
        );
        self.phase = phase;
    }

    pub(crate) fn ensure_editable(&self) -> Result<()> {
        if self.phase.is_editable() {
            Ok(())
        } else {
            Err(RoamError::SessionLocked { phase: self.phase })
        }
    }
}
