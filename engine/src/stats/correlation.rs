// Pearson correlation between numeric order columns
use super::{column, mean};
use serde::Serialize;
use shared::models::{DerivedOrderRecord, OrderField};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub fields: Vec<OrderField>,
    /// Row-major; `None` where a column has no variance.
    pub values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    pub fn get(&self, a: OrderField, b: OrderField) -> Option<f64> {
        let i = self.fields.iter().position(|f| *f == a)?;
        let j = self.fields.iter().position(|f| *f == b)?;
        self.values[i][j]
    }
}

pub fn correlation_matrix(records: &[DerivedOrderRecord], fields: &[OrderField]) -> CorrelationMatrix {
    let columns: Vec<Vec<f64>> = fields.iter().map(|f| column(records, *f)).collect();
    let values = columns
        .iter()
        .map(|x| columns.iter().map(|y| pearson(x, y)).collect())
        .collect();
    CorrelationMatrix {
        fields: fields.to_vec(),
        values,
    }
}

fn pearson(x: &[f64], y: &[f64]) -> Option<f64> {
    let mean_x = mean(x)?;
    let mean_y = mean(y)?;

    let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for (a, b) in x.iter().zip(y) {
        let dx = a - mean_x;
        let dy = b - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }
    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }
    Some((cov / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0))
}
