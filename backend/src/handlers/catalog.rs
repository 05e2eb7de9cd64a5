//! HTTP handlers for catalog management (stock items, products, recipes)

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use shared::{Product, StockItem};
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::inventory::{
    AddRecipeIngredientInput, CreateProductInput, CreateStockItemInput, SetRecipeAmountInput,
};
use crate::AppState;

/// Add a stock item
pub async fn create_stock_item(
    State(state): State<AppState>,
    Json(input): Json<CreateStockItemInput>,
) -> AppResult<(StatusCode, Json<StockItem>)> {
    let item = state.inventory.add_stock_item(input).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// Remove a stock item
pub async fn delete_stock_item(
    State(state): State<AppState>,
    Path(stock_item_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.inventory.remove_stock_item(stock_item_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List products
pub async fn list_products(State(state): State<AppState>) -> Json<Vec<Product>> {
    Json(state.inventory.products().await)
}

/// Add a product
pub async fn create_product(
    State(state): State<AppState>,
    Json(input): Json<CreateProductInput>,
) -> AppResult<(StatusCode, Json<Product>)> {
    let product = state.inventory.add_product(input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Remove a product
pub async fn delete_product(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.inventory.remove_product(product_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Add a stock item to a product's recipe
pub async fn add_recipe_ingredient(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
    Json(input): Json<AddRecipeIngredientInput>,
) -> AppResult<Json<Product>> {
    let product = state.inventory.add_ingredient_to_recipe(product_id, input).await?;
    Ok(Json(product))
}

/// Change the per-unit amount of a recipe ingredient
pub async fn set_recipe_amount(
    State(state): State<AppState>,
    Path((product_id, ingredient_key)): Path<(Uuid, String)>,
    Json(input): Json<SetRecipeAmountInput>,
) -> AppResult<Json<Product>> {
    let product = state
        .inventory
        .set_recipe_amount(product_id, &ingredient_key, input)
        .await?;
    Ok(Json(product))
}

/// Remove an ingredient from a product's recipe
pub async fn remove_recipe_ingredient(
    State(state): State<AppState>,
    Path((product_id, ingredient_key)): Path<(Uuid, String)>,
) -> AppResult<Json<Product>> {
    let product = state
        .inventory
        .remove_ingredient_from_recipe(product_id, &ingredient_key)
        .await?;
    Ok(Json(product))
}
