//! Shared types and ledger engine for the StockOptame inventory tracker
//!
//! This crate contains the domain models and the pure inventory rules shared
//! between the backend server and the browser client (via WASM).

pub mod catalog;
pub mod error;
pub mod ledger;
pub mod models;
pub mod report;
pub mod types;
pub mod validation;

pub use catalog::*;
pub use error::*;
pub use ledger::*;
pub use models::*;
pub use report::*;
pub use types::*;
pub use validation::*;
