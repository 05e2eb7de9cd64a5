//! Domain models for the StockOptame inventory tracker

mod product;
mod sale;
mod snapshot;
mod stock;

pub use product::*;
pub use sale::*;
pub use snapshot::*;
pub use stock::*;
