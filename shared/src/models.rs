use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One row of the food-delivery orders table, as read from the input file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub order_id: String,
    pub customer_id: Option<String>,
    pub restaurant_id: String,
    /// Absent when the source value could not be parsed as a date-time.
    pub order_timestamp: Option<NaiveDateTime>,
    pub delivery_timestamp: Option<NaiveDateTime>,
    pub order_value: f64,
    pub delivery_fee: f64,
    pub commission_fee: f64,
    pub payment_processing_fee: f64,
    pub refunds_chargebacks: f64,
    pub payment_method: String,
    /// Free text such as "20% off" or "50 off Promo". Empty when the order had no offer.
    pub discount_text: String,
}

/// Discount values extracted from an order's free-text offer description.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DiscountTerms {
    pub percentage: Option<f64>,
    pub fixed: Option<f64>,
}

impl DiscountTerms {
    pub fn percentage_or_zero(&self) -> f64 {
        self.percentage.unwrap_or(0.0)
    }

    pub fn fixed_or_zero(&self) -> f64 {
        self.fixed.unwrap_or(0.0)
    }
}

/// An order together with the financial metrics derived from it.
///
/// Built once per load by the metrics deriver and only read afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedOrderRecord {
    #[serde(flatten)]
    pub order: OrderRecord,
    pub discount_percentage: f64,
    pub fixed_discount: f64,
    pub discount_amount: f64,
    pub revenue: f64,
    pub cost: f64,
    pub profit: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialTotals {
    pub order_count: usize,
    pub total_revenue: f64,
    pub total_cost: f64,
    pub total_profit: f64,
    pub total_discount: f64,
}

/// Mean of a numeric field over every record sharing a group key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupAverage {
    pub key: String,
    pub mean: f64,
    pub count: usize,
}

/// Numeric columns of a derived order that statistics can be computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderField {
    OrderValue,
    DeliveryFee,
    CommissionFee,
    PaymentProcessingFee,
    RefundsChargebacks,
    DiscountAmount,
    Revenue,
    Cost,
    Profit,
}

impl OrderField {
    pub fn value(&self, record: &DerivedOrderRecord) -> f64 {
        match self {
            OrderField::OrderValue => record.order.order_value,
            OrderField::DeliveryFee => record.order.delivery_fee,
            OrderField::CommissionFee => record.order.commission_fee,
            OrderField::PaymentProcessingFee => record.order.payment_processing_fee,
            OrderField::RefundsChargebacks => record.order.refunds_chargebacks,
            OrderField::DiscountAmount => record.discount_amount,
            OrderField::Revenue => record.revenue,
            OrderField::Cost => record.cost,
            OrderField::Profit => record.profit,
        }
    }

    /// Human readable column name, matching the source file where one exists.
    pub fn label(&self) -> &'static str {
        match self {
            OrderField::OrderValue => "Order Value",
            OrderField::DeliveryFee => "Delivery Fee",
            OrderField::CommissionFee => "Commission Fee",
            OrderField::PaymentProcessingFee => "Payment Processing Fee",
            OrderField::RefundsChargebacks => "Refunds/Chargebacks",
            OrderField::DiscountAmount => "Discount Amount",
            OrderField::Revenue => "Revenue",
            OrderField::Cost => "Costs",
            OrderField::Profit => "Profit",
        }
    }
}

/// Categorical columns orders can be grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupKey {
    RestaurantId,
    PaymentMethod,
}

impl GroupKey {
    pub fn key<'a>(&self, record: &'a DerivedOrderRecord) -> &'a str {
        match self {
            GroupKey::RestaurantId => &record.order.restaurant_id,
            GroupKey::PaymentMethod => &record.order.payment_method,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GroupKey::RestaurantId => "Restaurant ID",
            GroupKey::PaymentMethod => "Payment Method",
        }
    }
}
