//! Validation utilities for StockOptame
//!
//! Field-level checks shared by the ledger engine, the HTTP layer and the
//! browser client.

use rust_decimal::Decimal;

/// Longest accepted product or stock item name
pub const MAX_NAME_LENGTH: usize = 100;

// ============================================================================
// Catalog Validations
// ============================================================================

/// Validate a product or stock item name
pub fn validate_name(name: &str) -> Result<(), &'static str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("Name must not be empty");
    }
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err("Name must be at most 100 characters");
    }
    Ok(())
}

/// Validate a unit label such as "ml", "g" or "pcs"
pub fn validate_unit(unit: &str) -> Result<(), &'static str> {
    if unit.trim().is_empty() {
        return Err("Unit must not be empty");
    }
    Ok(())
}

/// Validate a minimum stock threshold
pub fn validate_minimum_threshold(minimum: Decimal) -> Result<(), &'static str> {
    if minimum < Decimal::ZERO {
        return Err("Minimum threshold cannot be negative");
    }
    Ok(())
}

/// Validate a recipe ingredient key (lowercase, no surrounding whitespace)
pub fn validate_ingredient_key(key: &str) -> Result<(), &'static str> {
    if key.trim().is_empty() {
        return Err("Ingredient key must not be empty");
    }
    if key != key.trim() {
        return Err("Ingredient key must not have surrounding whitespace");
    }
    Ok(())
}

/// Validate a per-unit recipe amount
pub fn validate_recipe_amount(amount: Decimal) -> Result<(), &'static str> {
    if amount <= Decimal::ZERO {
        return Err("Recipe amount must be positive");
    }
    Ok(())
}

// ============================================================================
// Ledger Validations
// ============================================================================

/// Validate the number of units in a sale
pub fn validate_sale_quantity(quantity: u32) -> Result<(), &'static str> {
    if quantity < 1 {
        return Err("Quantity must be at least 1");
    }
    Ok(())
}

/// Validate a restock amount
pub fn validate_restock_amount(amount: Decimal) -> Result<(), &'static str> {
    if amount <= Decimal::ZERO {
        return Err("Restock amount must be positive");
    }
    Ok(())
}

/// Check that a cancellation reason has content
pub fn has_reason(reason: &str) -> bool {
    !reason.trim().is_empty()
}
