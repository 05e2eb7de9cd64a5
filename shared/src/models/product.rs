//! Product and recipe models

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Ingredient key -> quantity consumed per unit sold
pub type Recipe = BTreeMap<String, Decimal>;

/// A sellable item defined by its recipe
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub recipe: Recipe,
}

impl Product {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            recipe: Recipe::new(),
        }
    }

    /// Builder used for seeding: add one recipe line
    pub fn with_ingredient(mut self, key: &str, per_unit: Decimal) -> Self {
        self.recipe.insert(key.to_lowercase(), per_unit);
        self
    }
}
