// Least-squares line through two order columns
use super::{column, mean};
use serde::Serialize;
use shared::models::{DerivedOrderRecord, OrderField};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    /// Pearson coefficient of the two columns; `None` when `y` is constant.
    pub r: Option<f64>,
}

impl LinearFit {
    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

/// Fits `y = intercept + slope * x`. Needs two points and some spread in `x`.
pub fn linear_fit(records: &[DerivedOrderRecord], x: OrderField, y: OrderField) -> Option<LinearFit> {
    if records.len() < 2 {
        return None;
    }
    let xs = column(records, x);
    let ys = column(records, y);
    let mean_x = mean(&xs)?;
    let mean_y = mean(&ys)?;

    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (a, b) in xs.iter().zip(&ys) {
        let dx = a - mean_x;
        let dy = b - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    if sxx == 0.0 {
        return None;
    }

    let slope = sxy / sxx;
    let r = (syy > 0.0).then(|| (sxy / (sxx.sqrt() * syy.sqrt())).clamp(-1.0, 1.0));
    Some(LinearFit {
        slope,
        intercept: mean_y - slope * mean_x,
        r,
    })
}
