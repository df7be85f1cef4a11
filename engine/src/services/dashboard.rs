use crate::config::{EngineSettings, OutputFormat};
use crate::data::order_table::OrderTable;
use crate::error::{EngineError, EngineResult};
use crate::metrics::top_n;
use crate::stats::{
    box_summary_by, column, correlation_matrix, histogram, linear_fit, CorrelationMatrix, GroupSummary,
    HistogramBin, LinearFit,
};
use serde::Serialize;
use shared::models::{DerivedOrderRecord, FinancialTotals, GroupAverage, GroupKey, OrderField};
use shared::utils::amount_format::{format_currency, format_grouped};
use std::fmt::{self, Write};
use tracing::debug;

const DISTRIBUTION_FIELDS: [OrderField; 3] = [OrderField::OrderValue, OrderField::Profit, OrderField::DiscountAmount];

const CORRELATION_FIELDS: [OrderField; 5] = [
    OrderField::OrderValue,
    OrderField::DeliveryFee,
    OrderField::Revenue,
    OrderField::Cost,
    OrderField::Profit,
];

const BAR_WIDTH: usize = 40;

#[derive(Debug, Clone, Serialize)]
pub struct Distribution {
    pub field: OrderField,
    pub bins: Vec<HistogramBin>,
}

/// Everything the order dashboard shows, computed from one loaded table.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardReport {
    pub order_count: usize,
    pub unparsed_timestamps: usize,
    pub preview: Vec<DerivedOrderRecord>,
    pub totals: FinancialTotals,
    pub distributions: Vec<Distribution>,
    pub correlation: CorrelationMatrix,
    pub profit_by_payment_method: Vec<GroupSummary>,
    pub order_value_vs_profit: Option<LinearFit>,
    pub top_restaurants: Vec<GroupAverage>,
}

impl DashboardReport {
    pub fn build(table: &OrderTable, settings: &EngineSettings) -> EngineResult<Self> {
        let records = table.records();

        let distributions = DISTRIBUTION_FIELDS
            .iter()
            .map(|field| {
                histogram(&column(records, *field), settings.histogram_bins)
                    .map(|bins| Distribution { field: *field, bins })
            })
            .collect::<EngineResult<Vec<_>>>()?;

        let ranked = table.group_average(GroupKey::RestaurantId, OrderField::Profit);
        debug!(groups = ranked.len(), top = settings.top_restaurants, "Ranked restaurants by average profit");

        Ok(DashboardReport {
            order_count: table.len(),
            unparsed_timestamps: table.unparsed_timestamps(),
            preview: records.iter().take(settings.preview_rows).cloned().collect(),
            totals: table.totals(),
            distributions,
            correlation: correlation_matrix(records, &CORRELATION_FIELDS),
            profit_by_payment_method: box_summary_by(records, GroupKey::PaymentMethod, OrderField::Profit),
            order_value_vs_profit: linear_fit(records, OrderField::OrderValue, OrderField::Profit),
            top_restaurants: top_n(ranked, settings.top_restaurants),
        })
    }

    pub fn render(&self, settings: &EngineSettings) -> EngineResult<String> {
        match settings.output {
            OutputFormat::Text => self.render_text(&settings.currency_symbol),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(self)?),
        }
    }

    pub fn render_text(&self, currency_symbol: &str) -> EngineResult<String> {
        let mut out = String::new();
        self.write_text(&mut out, currency_symbol)
            .map_err(|e| EngineError::ProcessingError(format!("Failed to render report: {}", e)))?;
        Ok(out)
    }

    // Smallest and largest order value, read off the order value histogram.
    fn order_value_range(&self) -> Option<(f64, f64)> {
        let bins = &self
            .distributions
            .iter()
            .find(|d| d.field == OrderField::OrderValue)?
            .bins;
        Some((bins.first()?.lower, bins.last()?.upper))
    }

    fn write_text(&self, out: &mut impl Write, symbol: &str) -> fmt::Result {
        let money = |v: f64| format_currency(v, symbol);

        writeln!(out, "Food Delivery Data Analysis Dashboard")?;
        writeln!(out, "=====================================")?;
        writeln!(out, "{} orders loaded", self.order_count)?;
        if self.unparsed_timestamps > 0 {
            writeln!(out, "{} orders have no parseable order timestamp", self.unparsed_timestamps)?;
        }

        writeln!(out, "\n### Data Preview")?;
        writeln!(
            out,
            "{:<10} {:<13} {:<20} {:<18} {:>12} {:>12} {:>12} {:>12} {:>12}",
            "Order ID", "Restaurant ID", "Order Date and Time", "Payment Method", "Order Value", "Discount",
            "Revenue", "Costs", "Profit"
        )?;
        for record in &self.preview {
            let timestamp = record
                .order
                .order_timestamp
                .map(|ts| ts.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_else(|| "-".to_string());
            writeln!(
                out,
                "{:<10} {:<13} {:<20} {:<18} {:>12.2} {:>12.2} {:>12.2} {:>12.2} {:>12.2}",
                record.order.order_id,
                record.order.restaurant_id,
                timestamp,
                record.order.payment_method,
                record.order.order_value,
                record.discount_amount,
                record.revenue,
                record.cost,
                record.profit
            )?;
        }

        writeln!(out, "\n### Key Metrics")?;
        writeln!(out, "Total Revenue: {}", money(self.totals.total_revenue))?;
        writeln!(out, "Total Costs: {}", money(self.totals.total_cost))?;
        writeln!(out, "Total Profit: {}", money(self.totals.total_profit))?;
        writeln!(out, "Total Discounts: {}", money(self.totals.total_discount))?;

        for distribution in &self.distributions {
            writeln!(out, "\n### {} Distribution", distribution.field.label())?;
            write_histogram(out, &distribution.bins)?;
        }

        writeln!(out, "\n### Correlation of Financial Variables")?;
        write!(out, "{:<24}", "")?;
        for field in &self.correlation.fields {
            write!(out, " {:>14}", field.label())?;
        }
        writeln!(out)?;
        for (field, row) in self.correlation.fields.iter().zip(&self.correlation.values) {
            write!(out, "{:<24}", field.label())?;
            for value in row {
                match value {
                    Some(r) => write!(out, " {:>14.3}", r)?,
                    None => write!(out, " {:>14}", "n/a")?,
                }
            }
            writeln!(out)?;
        }

        writeln!(out, "\n### Profit by {}", GroupKey::PaymentMethod.label())?;
        for summary in &self.profit_by_payment_method {
            writeln!(
                out,
                "{:<18} n={:<6} min={} q1={} median={} q3={} max={} mean={}",
                summary.key,
                summary.count,
                money(summary.min),
                money(summary.q1),
                money(summary.median),
                money(summary.q3),
                money(summary.max),
                money(summary.mean)
            )?;
        }

        writeln!(out, "\n### Order Value vs Profit")?;
        match &self.order_value_vs_profit {
            Some(fit) => {
                let r = fit.r.map(|r| format!("{:.3}", r)).unwrap_or_else(|| "n/a".to_string());
                writeln!(out, "Profit = {:.4} x Order Value + {:.2} (r = {})", fit.slope, fit.intercept, r)?;
                if let Some((low, high)) = self.order_value_range() {
                    writeln!(
                        out,
                        "Fitted profit: {} at {}, {} at {}",
                        money(fit.predict(low)),
                        money(low),
                        money(fit.predict(high)),
                        money(high)
                    )?;
                }
            }
            None => writeln!(out, "Not enough spread in order value to fit a line")?,
        }

        writeln!(out, "\n### Top {} Restaurants by Average Profit", self.top_restaurants.len())?;
        for (rank, entry) in self.top_restaurants.iter().enumerate() {
            writeln!(
                out,
                "{:>3}. {:<13} {} ({} orders)",
                rank + 1,
                entry.key,
                money(entry.mean),
                entry.count
            )?;
        }
        Ok(())
    }
}

fn write_histogram(out: &mut impl Write, bins: &[HistogramBin]) -> fmt::Result {
    let peak = bins.iter().map(|b| b.count).max().unwrap_or(0);
    if peak == 0 {
        return writeln!(out, "(no data)");
    }
    for bin in bins {
        let bar = "#".repeat(bin.count * BAR_WIDTH / peak);
        writeln!(
            out,
            "{:>12} .. {:<12} {:>6} {}",
            format_grouped(bin.lower, 2),
            format_grouped(bin.upper, 2),
            bin.count,
            bar
        )?;
    }
    Ok(())
}
