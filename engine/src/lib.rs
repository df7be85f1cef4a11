// Engine library root
// Loads food-delivery orders, derives per-order financial metrics and
// builds the dashboard report printed by the binary.

pub mod config;
pub mod data;
pub mod error;
pub mod metrics;
pub mod services;
pub mod stats;

pub use data::order_table::OrderTable;
pub use error::{EngineError, EngineResult};
