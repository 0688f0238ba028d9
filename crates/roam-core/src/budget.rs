//! Budget aggregation over a catalog snapshot and a selection.

use serde::{Deserialize, Serialize};

use crate::{
    models::{Category, Money},
    selection::SelectionSet,
    snapshot::CatalogSnapshot,
};

/// Derived cost summary for a composition. Never stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetBreakdown {
    pub flight_cost: Money,
    pub stay_cost: Money,
    pub food_cost: Money,
    pub activities_cost: Money,
    pub places_cost: Money,
    pub culinary_cost: Money,
    pub total: Money,
}

impl BudgetBreakdown {
    /// Computes the breakdown for the current selection.
    ///
    /// Absent cost fields and ids the snapshot does not know count as zero.
    pub fn compute(snapshot: &CatalogSnapshot, selection: &SelectionSet) -> Self {
        let destination = &snapshot.destination;
        let subtotal = |category: Category| -> Money {
            selection
                .items(category)
                .filter_map(|item| snapshot.cost_of(item))
                .sum()
        };

        let flight_cost = Money::or_zero(destination.flight_cost);
        let stay_cost = Money::or_zero(destination.stay_cost);
        let food_cost = Money::or_zero(destination.food_cost);
        let activities_cost = subtotal(Category::Activity);
        let places_cost = subtotal(Category::Place);
        let culinary_cost = subtotal(Category::Culinary);

        Self {
            flight_cost,
            stay_cost,
            food_cost,
            activities_cost,
            places_cost,
            culinary_cost,
            total: flight_cost + stay_cost + food_cost + activities_cost + places_cost + culinary_cost,
        }
    }

    /// Flight, stay and food estimates together.
    pub fn base(&self) -> Money {
        self.flight_cost + self.stay_cost + self.food_cost
    }

    /// Subtotal of the selected items in one category.
    pub fn subtotal(&self, category: Category) -> Money {
        match category {
            Category::Place => self.places_cost,
            Category::Activity => self.activities_cost,
            Category::Culinary => self.culinary_cost,
        }
    }
}
