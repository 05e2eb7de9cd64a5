//! HTTP handlers for the StockOptame API

pub mod catalog;
pub mod health;
pub mod inventory;
pub mod reporting;

pub use catalog::*;
pub use health::*;
pub use inventory::*;
pub use reporting::*;
