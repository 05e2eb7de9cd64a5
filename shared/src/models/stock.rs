//! Stock item models and status classification

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A tracked raw ingredient
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StockItem {
    pub id: Uuid,
    pub name: String,
    /// Never negative; operations that would go below zero are rejected
    pub current_quantity: Decimal,
    /// Unit label, e.g. "ml", "g", "pcs"
    pub unit: String,
    pub minimum_threshold: Decimal,
}

impl StockItem {
    pub fn new(name: impl Into<String>, unit: impl Into<String>, minimum_threshold: Decimal) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            current_quantity: Decimal::ZERO,
            unit: unit.into(),
            minimum_threshold,
        }
    }

    /// Set the starting quantity (used for seeding)
    pub fn with_quantity(mut self, quantity: Decimal) -> Self {
        self.current_quantity = quantity;
        self
    }

    pub fn status(&self) -> StockStatus {
        classify(self)
    }

    /// Case-insensitive substring match of a recipe key against the item name
    pub fn matches_key(&self, key: &str) -> bool {
        let key = key.trim().to_lowercase();
        !key.is_empty() && self.name.to_lowercase().contains(&key)
    }
}

/// Stock health tier
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum StockStatus {
    /// Below the minimum threshold
    Low,
    /// At or above minimum, below 1.5x minimum
    Medium,
    Good,
}

impl StockStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StockStatus::Low => "low",
            StockStatus::Medium => "medium",
            StockStatus::Good => "good",
        }
    }
}

impl std::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify stock health from current quantity vs. minimum threshold
pub fn classify(item: &StockItem) -> StockStatus {
    classify_quantity(item.current_quantity, item.minimum_threshold)
}

/// Classification rule on raw quantities
pub fn classify_quantity(current: Decimal, minimum: Decimal) -> StockStatus {
    if current < minimum {
        return StockStatus::Low;
    }
    // No ceiling when minimum * 1.5 exceeds Decimal::MAX
    match minimum.checked_mul(Decimal::new(15, 1)) {
        Some(medium_ceiling) if current >= medium_ceiling => StockStatus::Good,
        _ => StockStatus::Medium,
    }
}
