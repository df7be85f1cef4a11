// Equal-width histogram
use crate::error::{EngineError, EngineResult};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Splits `[min, max]` of `values` into `bins` equal-width bins.
///
/// Every bin is half-open except the last, which also holds `max`. A
/// constant column is spread over `[value - 0.5, value + 0.5]`.
pub fn histogram(values: &[f64], bins: usize) -> EngineResult<Vec<HistogramBin>> {
    if bins == 0 {
        return Err(EngineError::StatisticsError("Histogram needs at least one bin".to_string()));
    }
    if values.is_empty() {
        return Ok(Vec::new());
    }

    let (mut min, mut max) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    if min == max {
        min -= 0.5;
        max += 0.5;
    }
    let width = (max - min) / bins as f64;

    let mut result: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            lower: min + width * i as f64,
            upper: if i + 1 == bins { max } else { min + width * (i + 1) as f64 },
            count: 0,
        })
        .collect();

    for &value in values {
        let idx = (((value - min) / width) as usize).min(bins - 1);
        result[idx].count += 1;
    }
    Ok(result)
}
