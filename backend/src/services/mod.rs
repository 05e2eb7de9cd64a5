//! Business logic services for the StockOptame server

pub mod inventory;
pub mod reporting;

pub use inventory::InventoryService;
pub use reporting::ReportingService;
