//! Catalog management: stock items, products and their recipes
//!
//! Every function takes the current snapshot and returns a new one; the input
//! is never modified, so a rejected call leaves the caller's state as it was.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{InventorySnapshot, Product, StockItem};
use crate::validation::{
    validate_ingredient_key, validate_minimum_threshold, validate_name, validate_recipe_amount,
    validate_unit,
};

/// A recipe line that matches no stock item
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UnresolvedIngredient {
    pub product_id: Uuid,
    pub product_name: String,
    pub ingredient_key: String,
}

fn invalid(message: &str) -> LedgerError {
    LedgerError::InvalidInput(message.to_string())
}

/// Resolve a recipe key to the first stock item whose name contains it
pub fn resolve_ingredient<'a>(stock_items: &'a [StockItem], key: &str) -> Option<&'a StockItem> {
    stock_items.iter().find(|s| s.matches_key(key))
}

/// Recipe key derived from a stock item name: its first word, lowercased
pub fn ingredient_key_for(name: &str) -> String {
    name.split_whitespace()
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

// ============================================================================
// Products
// ============================================================================

/// Add a product with an empty recipe
pub fn add_product(
    snapshot: &InventorySnapshot,
    name: &str,
) -> LedgerResult<(InventorySnapshot, Product)> {
    validate_name(name).map_err(invalid)?;
    let name = name.trim();
    if snapshot.product_by_name(name).is_some() {
        return Err(LedgerError::DuplicateName(name.to_string()));
    }

    let product = Product::new(name);
    let mut next = snapshot.clone();
    next.products.push(product.clone());
    Ok((next, product))
}

pub fn remove_product(snapshot: &InventorySnapshot, product_id: Uuid) -> LedgerResult<InventorySnapshot> {
    if snapshot.product(product_id).is_none() {
        return Err(LedgerError::NotFound("Product".to_string()));
    }
    let mut next = snapshot.clone();
    next.products.retain(|p| p.id != product_id);
    Ok(next)
}

// ============================================================================
// Stock items
// ============================================================================

/// Add a stock item starting at zero quantity
pub fn add_stock_item(
    snapshot: &InventorySnapshot,
    name: &str,
    unit: &str,
    minimum_threshold: Decimal,
) -> LedgerResult<(InventorySnapshot, StockItem)> {
    validate_name(name).map_err(invalid)?;
    validate_unit(unit).map_err(invalid)?;
    validate_minimum_threshold(minimum_threshold).map_err(invalid)?;

    let name = name.trim();
    let lowered = name.to_lowercase();
    if snapshot
        .stock_items
        .iter()
        .any(|s| s.name.to_lowercase() == lowered)
    {
        return Err(LedgerError::DuplicateName(name.to_string()));
    }

    let item = StockItem::new(name, unit.trim(), minimum_threshold);
    let mut next = snapshot.clone();
    next.stock_items.push(item.clone());
    Ok((next, item))
}

/// Remove a stock item. Recipes keep their keys; see [`unresolved_ingredients`].
pub fn remove_stock_item(
    snapshot: &InventorySnapshot,
    stock_item_id: Uuid,
) -> LedgerResult<InventorySnapshot> {
    if snapshot.stock_item(stock_item_id).is_none() {
        return Err(LedgerError::NotFound("Stock item".to_string()));
    }
    let mut next = snapshot.clone();
    next.stock_items.retain(|s| s.id != stock_item_id);
    Ok(next)
}

// ============================================================================
// Recipes
// ============================================================================

fn product_mut(snapshot: &mut InventorySnapshot, product_id: Uuid) -> LedgerResult<&mut Product> {
    snapshot
        .products
        .iter_mut()
        .find(|p| p.id == product_id)
        .ok_or_else(|| LedgerError::NotFound("Product".to_string()))
}

/// Add an existing stock item to a product's recipe at 1 unit per sale.
///
/// Returns the key the line was stored under. An existing line for the same
/// key keeps its amount.
pub fn add_ingredient_to_recipe(
    snapshot: &InventorySnapshot,
    product_id: Uuid,
    stock_item_id: Uuid,
) -> LedgerResult<(InventorySnapshot, String)> {
    let item = snapshot
        .stock_item(stock_item_id)
        .ok_or_else(|| LedgerError::NotFound("Stock item".to_string()))?;
    let key = ingredient_key_for(&item.name);
    validate_ingredient_key(&key).map_err(invalid)?;

    let mut next = snapshot.clone();
    let product = product_mut(&mut next, product_id)?;
    product.recipe.entry(key.clone()).or_insert(Decimal::ONE);
    Ok((next, key))
}

/// Set the per-unit amount of an ingredient in a product's recipe
pub fn set_recipe_amount(
    snapshot: &InventorySnapshot,
    product_id: Uuid,
    ingredient_key: &str,
    amount: Decimal,
) -> LedgerResult<InventorySnapshot> {
    validate_ingredient_key(ingredient_key).map_err(invalid)?;
    validate_recipe_amount(amount).map_err(invalid)?;
    let key = ingredient_key.to_lowercase();
    if resolve_ingredient(&snapshot.stock_items, &key).is_none() {
        return Err(LedgerError::IngredientNotFound(key));
    }

    let mut next = snapshot.clone();
    let product = product_mut(&mut next, product_id)?;
    product.recipe.insert(key, amount);
    Ok(next)
}

pub fn remove_ingredient_from_recipe(
    snapshot: &InventorySnapshot,
    product_id: Uuid,
    ingredient_key: &str,
) -> LedgerResult<InventorySnapshot> {
    let key = ingredient_key.to_lowercase();
    let mut next = snapshot.clone();
    let product = product_mut(&mut next, product_id)?;
    if product.recipe.remove(&key).is_none() {
        return Err(LedgerError::NotFound(format!("Ingredient \"{}\"", key)));
    }
    Ok(next)
}

/// Recipe keys that currently resolve to no stock item
pub fn unresolved_ingredients(snapshot: &InventorySnapshot) -> Vec<UnresolvedIngredient> {
    snapshot
        .products
        .iter()
        .flat_map(|product| {
            product
                .recipe
                .keys()
                .filter(|key| resolve_ingredient(&snapshot.stock_items, key).is_none())
                .map(|key| UnresolvedIngredient {
                    product_id: product.id,
                    product_name: product.name.clone(),
                    ingredient_key: key.clone(),
                })
        })
        .collect()
}
