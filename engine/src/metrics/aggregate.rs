// Totals and per-group averages over derived orders
use shared::models::{DerivedOrderRecord, FinancialTotals, GroupAverage, GroupKey, OrderField};
use std::collections::HashMap;

/// Sums revenue, cost, profit and discount across all records.
pub fn aggregate(records: &[DerivedOrderRecord]) -> FinancialTotals {
    records.iter().fold(
        FinancialTotals::default(),
        |mut totals, record| {
            totals.order_count += 1;
            totals.total_revenue += record.revenue;
            totals.total_cost += record.cost;
            totals.total_profit += record.profit;
            totals.total_discount += record.discount_amount;
            totals
        },
    )
}

/// Mean of `value` per distinct `key`, highest mean first.
///
/// Groups with equal means are ordered by key so the output is stable.
pub fn group_average(records: &[DerivedOrderRecord], key: GroupKey, value: OrderField) -> Vec<GroupAverage> {
    let mut sums: HashMap<&str, (f64, usize)> = HashMap::new();
    for record in records {
        let entry = sums.entry(key.key(record)).or_insert((0.0, 0));
        entry.0 += value.value(record);
        entry.1 += 1;
    }

    let mut averages: Vec<GroupAverage> = sums
        .into_iter()
        .map(|(group, (sum, count))| GroupAverage {
            key: group.to_string(),
            mean: sum / count as f64,
            count,
        })
        .collect();

    averages.sort_by(|a, b| b.mean.total_cmp(&a.mean).then_with(|| a.key.cmp(&b.key)));
    averages
}

/// Keeps the first `n` entries of an already ranked list.
pub fn top_n(mut averages: Vec<GroupAverage>, n: usize) -> Vec<GroupAverage> {
    averages.truncate(n);
    averages
}
