//! Route definitions for the StockOptame API

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/snapshot", get(handlers::get_snapshot))
        .nest("/stocks", stock_routes())
        .nest("/products", product_routes())
        .nest("/sales", sales_routes())
        .nest("/reports", report_routes())
}

/// Stock item routes
fn stock_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_stock_levels).post(handlers::create_stock_item),
        )
        .route("/:stock_item_id", delete(handlers::delete_stock_item))
        .route("/:stock_item_id/restock", post(handlers::restock_item))
}

/// Product and recipe routes
fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_products).post(handlers::create_product))
        .route("/:product_id", delete(handlers::delete_product))
        .route("/:product_id/recipe", post(handlers::add_recipe_ingredient))
        .route(
            "/:product_id/recipe/:ingredient_key",
            put(handlers::set_recipe_amount).delete(handlers::remove_recipe_ingredient),
        )
}

/// Sales log routes
fn sales_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_sales).post(handlers::record_sale))
        .route("/cancel-reasons", get(handlers::list_cancel_reasons))
        .route("/:sale_id/cancel", post(handlers::cancel_sale))
}

/// Reporting routes
fn report_routes() -> Router<AppState> {
    Router::new().route("/daily", get(handlers::get_daily_report))
}
