// Holds the derived orders for one load of the input file
use crate::data::csv_parser::OrderCsvParser;
use crate::error::{EngineError, EngineResult};
use crate::metrics::{aggregate, derive_all, group_average};
use shared::models::{DerivedOrderRecord, FinancialTotals, GroupAverage, GroupKey, OrderField, OrderRecord};
use std::path::Path;
use tracing::{error, info, warn};

/// Derived orders and their totals, computed once when the table is built.
///
/// The table never changes after construction; callers that want a fresh
/// view of the file build a new table.
#[derive(Debug, Clone)]
pub struct OrderTable {
    records: Vec<DerivedOrderRecord>,
    totals: FinancialTotals,
}

impl OrderTable {
    pub fn load(path: impl AsRef<Path>, delimiter: u8) -> EngineResult<Self> {
        let path = path.as_ref();
        let orders = OrderCsvParser::load_orders_from_csv(path, delimiter).map_err(|e| {
            error!(path = %path.display(), error = %format!("{:#}", e), "Failed to load orders");
            Self::classify_load_error(path, e)
        })?;
        Ok(Self::from_records(orders))
    }

    // Reader and file failures keep their source; anything else is bad order data.
    fn classify_load_error(path: &Path, e: anyhow::Error) -> EngineError {
        match e.downcast::<std::io::Error>() {
            Ok(source) => EngineError::IoError { source },
            Err(e) => match e.downcast::<csv::Error>() {
                Ok(source) => EngineError::CsvSystemError { source },
                Err(e) => EngineError::CsvDataFormatError(format!("{}: {:#}", path.display(), e)),
            },
        }
    }

    pub fn from_records(orders: Vec<OrderRecord>) -> Self {
        let records = derive_all(orders);
        let totals = aggregate(&records);

        let table = OrderTable { records, totals };
        let unparsed = table.unparsed_timestamps();
        if unparsed > 0 {
            warn!(unparsed, total = table.len(), "Some order timestamps could not be parsed");
        }
        info!(
            orders = table.len(),
            total_revenue = totals.total_revenue,
            total_profit = totals.total_profit,
            "Derived order metrics"
        );
        table
    }

    pub fn records(&self) -> &[DerivedOrderRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn totals(&self) -> FinancialTotals {
        self.totals
    }

    pub fn group_average(&self, key: GroupKey, value: OrderField) -> Vec<GroupAverage> {
        group_average(&self.records, key, value)
    }

    /// Number of orders whose order timestamp was left empty by the loader.
    pub fn unparsed_timestamps(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.order.order_timestamp.is_none())
            .count()
    }
}
