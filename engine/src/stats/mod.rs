// Statistics behind the dashboard panels
pub mod correlation;
pub mod histogram;
pub mod regression;
pub mod summary;

pub use correlation::{correlation_matrix, CorrelationMatrix};
pub use histogram::{histogram, HistogramBin};
pub use regression::{linear_fit, LinearFit};
pub use summary::{box_summary_by, GroupSummary};

use shared::models::{DerivedOrderRecord, OrderField};

pub(crate) fn column(records: &[DerivedOrderRecord], field: OrderField) -> Vec<f64> {
    records.iter().map(|r| field.value(r)).collect()
}

pub(crate) fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}
