// Per-order financial derivation
use super::discount::parse_discount_text;
use shared::models::{DerivedOrderRecord, DiscountTerms, OrderRecord};

/// Computes discount, revenue, cost and profit for one order.
///
/// A parsed percentage greater than zero always decides the discount amount,
/// even when the text also carried a fixed "N off" amount.
pub fn derive(record: OrderRecord) -> DerivedOrderRecord {
    let terms = parse_discount_text(&record.discount_text);
    derive_with_terms(record, terms)
}

/// Derives a whole batch, preserving length and order.
pub fn derive_all(records: Vec<OrderRecord>) -> Vec<DerivedOrderRecord> {
    records.into_iter().map(derive).collect()
}

fn derive_with_terms(record: OrderRecord, terms: DiscountTerms) -> DerivedOrderRecord {
    let discount_percentage = terms.percentage_or_zero();
    let fixed_discount = terms.fixed_or_zero();

    let discount_amount = if discount_percentage > 0.0 {
        record.order_value * discount_percentage / 100.0
    } else {
        fixed_discount
    };

    let revenue = record.order_value + record.delivery_fee;
    let cost = record.commission_fee + record.payment_processing_fee + record.refunds_chargebacks;
    let profit = revenue - cost;

    DerivedOrderRecord {
        order: record,
        discount_percentage,
        fixed_discount,
        discount_amount,
        revenue,
        cost,
        profit,
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn order(order_value: f64, discount_text: &str) -> OrderRecord {
        OrderRecord {
            order_id: "1".to_string(),
            customer_id: None,
            restaurant_id: "R1".to_string(),
            order_timestamp: None,
            delivery_timestamp: None,
            order_value,
            delivery_fee: 40.0,
            commission_fee: 30.0,
            payment_processing_fee: 10.0,
            refunds_chargebacks: 0.0,
            payment_method: "Cash on Delivery".to_string(),
            discount_text: discount_text.to_string(),
        }
    }

    #[test]
    fn test_worked_example() {
        let derived = derive(order(500.0, "20% off"));
        assert_eq!(derived.discount_percentage, 20.0);
        assert_eq!(derived.fixed_discount, 0.0);
        assert_eq!(derived.discount_amount, 100.0);
        assert_eq!(derived.revenue, 540.0);
        assert_eq!(derived.cost, 40.0);
        assert_eq!(derived.profit, 500.0);
    }

    #[test]
    fn test_fixed_discount_used_without_percentage() {
        let derived = derive(order(500.0, "50 off"));
        assert_eq!(derived.discount_percentage, 0.0);
        assert_eq!(derived.fixed_discount, 50.0);
        assert_eq!(derived.discount_amount, 50.0);
    }

    #[test]
    fn test_no_discount_text_means_zero_discount() {
        assert_eq!(derive(order(500.0, "")).discount_amount, 0.0);
        assert_eq!(derive(order(500.0, "Free delivery")).discount_amount, 0.0);
    }

    // Deliberate tie-break: a parsed percentage always beats a parsed fixed amount.
    #[test]
    fn test_percentage_wins_when_both_present() {
        let derived = derive(order(500.0, "10% off, 50 off"));
        assert_eq!(derived.discount_percentage, 10.0);
        assert_eq!(derived.fixed_discount, 50.0);
        assert_eq!(derived.discount_amount, 50.0);

        let derived = derive(order(1000.0, "10% off, 50 off"));
        assert_eq!(derived.discount_amount, 100.0);
    }

    #[test]
    fn test_zero_percentage_falls_back_to_fixed() {
        let derived = derive(order(500.0, "0% today, 25 off"));
        assert_eq!(derived.discount_percentage, 0.0);
        assert_eq!(derived.discount_amount, 25.0);
    }

    #[test]
    fn test_formulas_hold_for_every_record() {
        let mut records = Vec::new();
        for (i, text) in ["5% on App", "50 off Promo", "", "15% New User", "None"].iter().enumerate() {
            let mut record = order(100.0 + 137.0 * i as f64, text);
            record.delivery_fee = 10.0 * i as f64;
            record.commission_fee = 12.5 + i as f64;
            record.payment_processing_fee = 3.0 * i as f64;
            record.refunds_chargebacks = if i % 2 == 0 { 0.0 } else { 75.0 };
            records.push(record);
        }

        let derived = derive_all(records.clone());
        assert_eq!(derived.len(), records.len());
        for (source, d) in records.iter().zip(&derived) {
            assert_eq!(&d.order, source);
            assert!(d.discount_amount >= 0.0);
            assert_eq!(d.revenue, source.order_value + source.delivery_fee);
            assert_eq!(
                d.cost,
                source.commission_fee + source.payment_processing_fee + source.refunds_chargebacks
            );
            assert_eq!(d.profit, d.revenue - d.cost);
        }
    }

    #[test]
    fn test_derive_all_empty() {
        assert!(derive_all(Vec::new()).is_empty());
    }
}
