// Five-number summaries per category (box plot data)
use super::mean;
use serde::Serialize;
use shared::models::{DerivedOrderRecord, GroupKey, OrderField};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSummary {
    pub key: String,
    pub count: usize,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub mean: f64,
}

/// Summarises `field` for each distinct `key`, ordered by key.
pub fn box_summary_by(records: &[DerivedOrderRecord], key: GroupKey, field: OrderField) -> Vec<GroupSummary> {
    let mut groups: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for record in records {
        groups.entry(key.key(record)).or_default().push(field.value(record));
    }

    groups
        .into_iter()
        .filter_map(|(group, mut values)| {
            values.sort_by(f64::total_cmp);
            Some(GroupSummary {
                key: group.to_string(),
                count: values.len(),
                min: *values.first()?,
                q1: quantile(&values, 0.25)?,
                median: quantile(&values, 0.5)?,
                q3: quantile(&values, 0.75)?,
                max: *values.last()?,
                mean: mean(&values)?,
            })
        })
        .collect()
}

// Linear interpolation between closest ranks; `sorted` must be ascending.
fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let pos = q * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let frac = pos - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * frac)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::derivation::{derive_all, tests::order};

    #[test]
    fn test_quantile_interpolates() {
        let values = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile(&values, 0.5), Some(2.5));
        assert_eq!(quantile(&values, 0.25), Some(1.75));
        assert_eq!(quantile(&values, 0.0), Some(1.0));
        assert_eq!(quantile(&values, 1.0), Some(4.0));
        assert_eq!(quantile(&[], 0.5), None);
    }

    #[test]
    fn test_summary_per_payment_method() {
        let mut records = Vec::new();
        for value in [100.0, 400.0, 200.0, 300.0, 500.0] {
            let mut record = order(value, "");
            record.payment_method = "UPI".to_string();
            records.push(record);
        }
        let mut card = order(1000.0, "");
        card.payment_method = "Credit Card".to_string();
        records.push(card);

        let summaries = box_summary_by(&derive_all(records), GroupKey::PaymentMethod, OrderField::Profit);
        assert_eq!(summaries.len(), 2);

        assert_eq!(summaries[0].key, "Credit Card");
        assert_eq!(summaries[0].count, 1);
        assert_eq!(summaries[0].median, 1000.0);
        assert_eq!(summaries[0].q1, 1000.0);

        let upi = &summaries[1];
        assert_eq!(upi.key, "UPI");
        assert_eq!(upi.count, 5);
        assert_eq!(upi.min, 100.0);
        assert_eq!(upi.q1, 200.0);
        assert_eq!(upi.median, 300.0);
        assert_eq!(upi.q3, 400.0);
        assert_eq!(upi.max, 500.0);
        assert_eq!(upi.mean, 300.0);
    }

    #[test]
    fn test_summary_empty() {
        assert!(box_summary_by(&[], GroupKey::PaymentMethod, OrderField::Profit).is_empty());
    }
}
