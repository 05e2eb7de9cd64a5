//! Ledger engine: sales, cancellations and restocking
//!
//! These are the only operations that change stock quantities or the sales
//! log. Each one validates everything against the input snapshot first and
//! only then builds the new snapshot, so a rejection never leaves a partially
//! applied state behind.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::resolve_ingredient;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{InventorySnapshot, SaleRecord, StockConsumption};
use crate::validation::{has_reason, validate_restock_amount, validate_sale_quantity};

/// Outcome of a successful cancellation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CancellationReport {
    pub sale: SaleRecord,
    /// Stock returned, per recipe key
    pub restored: Vec<StockConsumption>,
    /// Recipe keys whose stock item no longer exists
    pub skipped: Vec<String>,
}

/// Record a sale of `quantity` units of the named product.
///
/// All-or-nothing: if any ingredient is missing or short, no stock changes and
/// no record is written.
pub fn record_sale(
    snapshot: &InventorySnapshot,
    product_name: &str,
    quantity: u32,
    timestamp: DateTime<Utc>,
) -> LedgerResult<(InventorySnapshot, SaleRecord)> {
    validate_sale_quantity(quantity).map_err(|e| LedgerError::InvalidInput(e.to_string()))?;
    let product = snapshot
        .product_by_name(product_name)
        .ok_or_else(|| LedgerError::InvalidInput(format!("Unknown product \"{}\"", product_name)))?;
    let units = Decimal::from(quantity);

    let mut consumption = Vec::with_capacity(product.recipe.len());
    for (key, per_unit) in &product.recipe {
        let item = resolve_ingredient(&snapshot.stock_items, key)
            .ok_or_else(|| LedgerError::IngredientNotFound(key.clone()))?;
        let amount = per_unit
            .checked_mul(units)
            .ok_or_else(|| LedgerError::InvalidInput("Quantity is too large".to_string()))?;
        consumption.push(StockConsumption {
            ingredient_key: key.clone(),
            stock_item_id: item.id,
            amount,
        });
    }

    // Several keys may resolve to the same item; check against the total.
    let required = required_per_item(&consumption)?;
    for (stock_item_id, amount) in &required {
        let Some(item) = snapshot.stock_item(*stock_item_id) else {
            return Err(LedgerError::NotFound("Stock item".to_string()));
        };
        if item.current_quantity < *amount {
            return Err(LedgerError::InsufficientStock {
                stock_item: item.name.clone(),
                required: *amount,
                available: item.current_quantity,
            });
        }
    }

    let mut next = snapshot.clone();
    for (stock_item_id, amount) in &required {
        if let Some(item) = next.stock_items.iter_mut().find(|s| s.id == *stock_item_id) {
            item.current_quantity -= *amount;
        }
    }

    let sale = SaleRecord {
        id: Uuid::new_v4(),
        product_name: product.name.clone(),
        quantity,
        recipe_snapshot: product.recipe.clone(),
        consumption,
        timestamp,
        cancelled: false,
        cancel_reason: String::new(),
    };
    next.sales_log.insert(0, sale.clone());

    Ok((next, sale))
}

fn required_per_item(consumption: &[StockConsumption]) -> LedgerResult<Vec<(Uuid, Decimal)>> {
    let mut totals: Vec<(Uuid, Decimal)> = Vec::new();
    for line in consumption {
        match totals.iter_mut().find(|(id, _)| *id == line.stock_item_id) {
            Some((_, total)) => {
                *total = total
                    .checked_add(line.amount)
                    .ok_or_else(|| LedgerError::InvalidInput("Quantity is too large".to_string()))?;
            }
            None => totals.push((line.stock_item_id, line.amount)),
        }
    }
    Ok(totals)
}

/// Cancel a sale and return its ingredients to stock.
///
/// Stock is restored from the sale's own recipe snapshot, not the product's
/// current recipe. Each key goes back to the stock item it was taken from;
/// if that item is gone the key is re-resolved by name, and if nothing
/// matches it is reported in [`CancellationReport::skipped`].
pub fn cancel_sale(
    snapshot: &InventorySnapshot,
    sale_id: Uuid,
    reason: &str,
) -> LedgerResult<(InventorySnapshot, CancellationReport)> {
    if !has_reason(reason) {
        return Err(LedgerError::MissingReason);
    }
    let index = snapshot
        .sales_log
        .iter()
        .position(|s| s.id == sale_id)
        .ok_or_else(|| LedgerError::NotFound("Sale".to_string()))?;
    let sale = &snapshot.sales_log[index];
    if sale.cancelled {
        return Err(LedgerError::AlreadyCancelled(sale_id));
    }

    let units = Decimal::from(sale.quantity);
    let mut restored = Vec::new();
    let mut skipped = Vec::new();

    for (key, per_unit) in &sale.recipe_snapshot {
        let target = sale
            .consumed_item(key)
            .and_then(|id| snapshot.stock_item(id))
            .or_else(|| resolve_ingredient(&snapshot.stock_items, key));
        let Some(item) = target else {
            skipped.push(key.clone());
            continue;
        };
        let amount = per_unit
            .checked_mul(units)
            .ok_or_else(|| LedgerError::InvalidInput("Restored quantity is too large".to_string()))?;
        restored.push(StockConsumption {
            ingredient_key: key.clone(),
            stock_item_id: item.id,
            amount,
        });
    }

    // Every new quantity must fit before anything is written.
    let mut next_quantities: Vec<(Uuid, Decimal)> = Vec::new();
    for (stock_item_id, amount) in required_per_item(&restored)? {
        let current = snapshot
            .stock_item(stock_item_id)
            .map(|s| s.current_quantity)
            .ok_or_else(|| LedgerError::NotFound("Stock item".to_string()))?;
        let quantity = current
            .checked_add(amount)
            .ok_or_else(|| LedgerError::InvalidInput("Restored quantity is too large".to_string()))?;
        next_quantities.push((stock_item_id, quantity));
    }

    let mut next = snapshot.clone();
    for (stock_item_id, quantity) in next_quantities {
        if let Some(item) = next.stock_items.iter_mut().find(|s| s.id == stock_item_id) {
            item.current_quantity = quantity;
        }
    }

    let record = &mut next.sales_log[index];
    record.cancelled = true;
    record.cancel_reason = reason.trim().to_string();
    let sale = record.clone();

    Ok((
        next,
        CancellationReport {
            sale,
            restored,
            skipped,
        },
    ))
}

/// Add stock to an item. There is no upper bound.
pub fn restock(
    snapshot: &InventorySnapshot,
    stock_item_id: Uuid,
    added_amount: Decimal,
) -> LedgerResult<InventorySnapshot> {
    validate_restock_amount(added_amount).map_err(|e| LedgerError::InvalidInput(e.to_string()))?;

    let mut next = snapshot.clone();
    let item = next
        .stock_items
        .iter_mut()
        .find(|s| s.id == stock_item_id)
        .ok_or_else(|| LedgerError::NotFound("Stock item".to_string()))?;
    item.current_quantity = item
        .current_quantity
        .checked_add(added_amount)
        .ok_or_else(|| LedgerError::InvalidInput("Restock amount is too large".to_string()))?;

    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Product, StockItem};

    fn snapshot_with(items: Vec<StockItem>, products: Vec<Product>) -> InventorySnapshot {
        InventorySnapshot::new(items, products)
    }

    fn quantity_of(snapshot: &InventorySnapshot, name: &str) -> Decimal {
        snapshot
            .stock_items
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.current_quantity)
            .unwrap()
    }

    #[test]
    fn test_keys_sharing_an_item_are_summed() {
        // "kopi" and "coffee" both resolve to the same bag of beans
        let beans = StockItem::new("Kopi (Coffee)", "g", Decimal::ZERO).with_quantity(Decimal::from(30));
        let doppio = Product::new("Doppio")
            .with_ingredient("kopi", Decimal::from(18))
            .with_ingredient("coffee", Decimal::from(18));
        let snapshot = snapshot_with(vec![beans], vec![doppio]);

        let err = record_sale(&snapshot, "Doppio", 1, Utc::now()).unwrap_err();
        assert_eq!(
            err,
            LedgerError::InsufficientStock {
                stock_item: "Kopi (Coffee)".to_string(),
                required: Decimal::from(36),
                available: Decimal::from(30),
            }
        );
    }

    #[test]
    fn test_sale_stores_resolved_consumption() {
        let snapshot = InventorySnapshot::seeded();
        let (next, sale) = record_sale(&snapshot, "Latte", 2, Utc::now()).unwrap();

        assert_eq!(sale.consumption.len(), 2);
        let milk_id = next.stock_items.iter().find(|s| s.name == "Milk").unwrap().id;
        assert_eq!(sale.consumed_item("milk"), Some(milk_id));
        assert_eq!(quantity_of(&next, "Milk"), Decimal::from(2200 - 240));
        assert_eq!(next.sales_log[0].id, sale.id);
    }

    #[test]
    fn test_sales_log_is_newest_first() {
        let snapshot = InventorySnapshot::seeded();
        let (next, first) = record_sale(&snapshot, "Espresso", 1, Utc::now()).unwrap();
        let (next, second) = record_sale(&next, "Americano", 1, Utc::now()).unwrap();
        assert_eq!(next.sales_log[0].id, second.id);
        assert_eq!(next.sales_log[1].id, first.id);
    }

    #[test]
    fn test_cancel_uses_recipe_snapshot_not_current_recipe() {
        let snapshot = InventorySnapshot::seeded();
        let (mut next, sale) = record_sale(&snapshot, "Espresso", 1, Utc::now()).unwrap();

        // Recipe changes after the sale
        if let Some(p) = next.products.iter_mut().find(|p| p.name == "Espresso") {
            p.recipe.insert("coffee".to_string(), Decimal::from(30));
        }

        let (restored, _) = cancel_sale(&next, sale.id, "Ubah Pesanan").unwrap();
        assert_eq!(quantity_of(&restored, "Coffee"), Decimal::from(450));
    }

    #[test]
    fn test_cancel_follows_stored_item_after_rename() {
        let snapshot = InventorySnapshot::seeded();
        let (mut next, sale) = record_sale(&snapshot, "Espresso", 1, Utc::now()).unwrap();
        if let Some(item) = next.stock_items.iter_mut().find(|s| s.name == "Coffee") {
            item.name = "Biji Kopi".to_string();
        }

        let (restored, report) = cancel_sale(&next, sale.id, "Salah Input Produk").unwrap();
        assert!(report.skipped.is_empty());
        assert_eq!(quantity_of(&restored, "Biji Kopi"), Decimal::from(450));
    }

    #[test]
    fn test_cancel_reports_skipped_keys() {
        let snapshot = InventorySnapshot::seeded();
        let (mut next, sale) = record_sale(&snapshot, "Americano", 1, Utc::now()).unwrap();
        next.stock_items.retain(|s| s.name != "Water");

        let (restored, report) = cancel_sale(&next, sale.id, "Pembayaran Gagal").unwrap();
        assert_eq!(report.skipped, vec!["water".to_string()]);
        assert_eq!(report.restored.len(), 1);
        assert_eq!(quantity_of(&restored, "Coffee"), Decimal::from(450));
        assert!(report.sale.cancelled);
    }

    #[test]
    fn test_cancel_legacy_record_without_consumption() {
        let snapshot = InventorySnapshot::seeded();
        let (mut next, sale) = record_sale(&snapshot, "Espresso", 3, Utc::now()).unwrap();
        next.sales_log[0].consumption.clear();

        let (restored, report) = cancel_sale(&next, sale.id, "Ubah Pesanan").unwrap();
        assert!(report.skipped.is_empty());
        assert_eq!(quantity_of(&restored, "Coffee"), Decimal::from(450));
    }

    #[test]
    fn test_cancel_reason_is_trimmed() {
        let snapshot = InventorySnapshot::seeded();
        let (next, sale) = record_sale(&snapshot, "Espresso", 1, Utc::now()).unwrap();
        let (_, report) = cancel_sale(&next, sale.id, "  Ubah Pesanan ").unwrap();
        assert_eq!(report.sale.cancel_reason, "Ubah Pesanan");
    }

    #[test]
    fn test_restock_rejects_non_positive() {
        let snapshot = InventorySnapshot::seeded();
        let id = snapshot.stock_items[0].id;
        assert!(matches!(restock(&snapshot, id, Decimal::ZERO), Err(LedgerError::InvalidInput(_))));
        assert!(matches!(
            restock(&snapshot, Uuid::new_v4(), Decimal::ONE),
            Err(LedgerError::NotFound(_))
        ));
    }

    #[test]
    fn test_sale_of_empty_recipe_deducts_nothing() {
        let snapshot = snapshot_with(
            InventorySnapshot::seeded().stock_items,
            vec![Product::new("Air Putih")],
        );
        let (next, sale) = record_sale(&snapshot, "Air Putih", 1, Utc::now()).unwrap();
        assert!(sale.consumption.is_empty());
        assert_eq!(next.stock_items, snapshot.stock_items);
    }

    #[test]
    fn test_cancel_rejects_restore_past_decimal_max() {
        let snapshot = snapshot_with(
            vec![StockItem::new("Coffee", "g", Decimal::from(500)).with_quantity(Decimal::from(450))],
            vec![Product::new("Espresso").with_ingredient("coffee", Decimal::from(18))],
        );
        let (sold, sale) = record_sale(&snapshot, "Espresso", 1, Utc::now()).unwrap();
        let coffee = sold.stock_items[0].id;
        let full = restock(&sold, coffee, Decimal::MAX - Decimal::from(432)).unwrap();

        let err = cancel_sale(&full, sale.id, "Ubah Pesanan").unwrap_err();

        assert!(matches!(err, LedgerError::InvalidInput(_)));
        assert_eq!(quantity_of(&full, "Coffee"), Decimal::MAX);
        assert!(!full.sale(sale.id).unwrap().cancelled);
    }

    #[test]
    fn test_cancel_leaves_other_items_when_one_overflows() {
        let snapshot = InventorySnapshot::seeded();
        let (sold, sale) = record_sale(&snapshot, "Latte", 1, Utc::now()).unwrap();
        let milk = sold.stock_items[0].id;
        let full = restock(&sold, milk, Decimal::MAX - Decimal::from(2080)).unwrap();

        assert!(cancel_sale(&full, sale.id, "Ubah Pesanan").is_err());
        // Coffee sorts before milk and must not have been restored
        assert_eq!(quantity_of(&full, "Coffee"), Decimal::from(434));
    }

    #[test]
    fn test_sale_rejects_consumption_past_decimal_max() {
        let snapshot = snapshot_with(
            vec![StockItem::new("Coffee", "g", Decimal::ZERO).with_quantity(Decimal::MAX)],
            vec![Product::new("Espresso").with_ingredient("coffee", Decimal::MAX)],
        );

        let err = record_sale(&snapshot, "Espresso", 2, Utc::now()).unwrap_err();

        assert!(matches!(err, LedgerError::InvalidInput(_)));
        assert!(snapshot.sales_log.is_empty());
    }

    #[test]
    fn test_restock_rejects_past_decimal_max() {
        let snapshot = InventorySnapshot::seeded();
        let coffee = snapshot.stock_items[1].id;
        assert!(matches!(
            restock(&snapshot, coffee, Decimal::MAX),
            Err(LedgerError::InvalidInput(_))
        ));
    }
}
