// Order metrics: discount extraction, per-order derivation and aggregation
pub mod aggregate;
pub mod derivation;
pub mod discount;

pub use aggregate::{aggregate, group_average, top_n};
pub use derivation::{derive, derive_all};
pub use discount::parse_discount_text;
