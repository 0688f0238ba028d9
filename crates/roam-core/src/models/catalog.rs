//! Catalog item models: places, activities and culinary items.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{Destination, Money};

/// Type-safe enumeration of catalog categories.
///
/// The declaration order is the order in which selected items are attached
/// to a newly created trip.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Sights and landmarks, priced by entry fee
    Place,

    /// Things to do, priced by estimated cost
    Activity,

    /// Local dishes, priced by average price
    Culinary,
}

impl Category {
    /// All categories in attach order.
    pub const ALL: [Category; 3] = [Category::Place, Category::Activity, Category::Culinary];

    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Place => "place",
            Category::Activity => "activity",
            Category::Culinary => "culinary",
        }
    }

    /// Key under which a join record nests the catalog row for this category.
    pub fn nested_key(&self) -> &'static str {
        match self {
            Category::Place => "places",
            Category::Activity => "activities",
            Category::Culinary => "culinary",
        }
    }

    /// Column name of the catalog reference in a join record.
    pub fn reference_key(&self) -> &'static str {
        match self {
            Category::Place => "place_id",
            Category::Activity => "activity_id",
            Category::Culinary => "culinary_id",
        }
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "place" | "places" => Ok(Category::Place),
            "activity" | "activities" => Ok(Category::Activity),
            "culinary" | "dish" | "dishes" => Ok(Category::Culinary),
            _ => Err(format!("Invalid category: {s}")),
        }
    }
}

/// A typed reference to one catalog item.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ItemRef {
    pub category: Category,
    pub id: u64,
}

impl ItemRef {
    pub fn new(category: Category, id: u64) -> Self {
        Self { category, id }
    }

    pub fn place(id: u64) -> Self {
        Self::new(Category::Place, id)
    }

    pub fn activity(id: u64) -> Self {
        Self::new(Category::Activity, id)
    }

    pub fn culinary(id: u64) -> Self {
        Self::new(Category::Culinary, id)
    }
}

/// Behaviour shared by every catalog item type.
pub trait CatalogItem {
    /// Category this item type belongs to.
    const CATEGORY: Category;

    fn id(&self) -> u64;

    fn destination_id(&self) -> u64;

    /// Display name of the item.
    fn label(&self) -> &str;

    /// The item's single cost field, absent meaning zero.
    fn cost(&self) -> Money;

    fn item_ref(&self) -> ItemRef {
        ItemRef::new(Self::CATEGORY, self.id())
    }
}

/// A place to visit at a destination.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Place {
    pub id: u64,
    pub destination_id: u64,
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub entry_fee: Option<Money>,
    #[serde(default)]
    pub best_time_to_visit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Something to do at a destination.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Activity {
    pub id: u64,
    pub destination_id: u64,
    pub name: String,
    pub description: Option<String>,
    /// Activity type such as "hiking" or "water sports"
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub estimated_cost: Option<Money>,
    /// Whether the cost is "optional" or "included"
    #[serde(default)]
    pub cost_type: Option<String>,
    #[serde(default)]
    pub duration_hours: Option<f64>,
}

/// A local dish worth trying.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CulinaryItem {
    pub id: u64,
    pub destination_id: u64,
    pub dish_name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub avg_price: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl CatalogItem for Place {
    const CATEGORY: Category = Category::Place;

    fn id(&self) -> u64 {
        self.id
    }

    fn destination_id(&self) -> u64 {
        self.destination_id
    }

    fn label(&self) -> &str {
        &self.name
    }

    fn cost(&self) -> Money {
        Money::or_zero(self.entry_fee)
    }
}

impl CatalogItem for Activity {
    const CATEGORY: Category = Category::Activity;

    fn id(&self) -> u64 {
        self.id
    }

    fn destination_id(&self) -> u64 {
        self.destination_id
    }

    fn label(&self) -> &str {
        &self.name
    }

    fn cost(&self) -> Money {
        Money::or_zero(self.estimated_cost)
    }
}

impl CatalogItem for CulinaryItem {
    const CATEGORY: Category = Category::Culinary;

    fn id(&self) -> u64 {
        self.id
    }

    fn destination_id(&self) -> u64 {
        self.destination_id
    }

    fn label(&self) -> &str {
        &self.dish_name
    }

    fn cost(&self) -> Money {
        Money::or_zero(self.avg_price)
    }
}

/// Catalog contents for bulk import, with explicit identifiers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogSeed {
    #[serde(default)]
    pub destinations: Vec<Destination>,
    #[serde(default)]
    pub places: Vec<Place>,
    #[serde(default)]
    pub activities: Vec<Activity>,
    #[serde(default)]
    pub culinary: Vec<CulinaryItem>,
}

impl CatalogSeed {
    /// Total number of rows in the seed.
    pub fn len(&self) -> usize {
        self.destinations.len() + self.places.len() + self.activities.len() + self.culinary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
