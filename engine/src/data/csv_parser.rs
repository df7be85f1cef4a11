use anyhow::{anyhow, Context, Result};
use csv::{ReaderBuilder, StringRecord};
use shared::models::OrderRecord;
use shared::utils::amount_format::parse_amount;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, info};

// Tolerant date-time handling for the order and delivery timestamp columns
pub mod order_format {
    use chrono::{DateTime, NaiveDate, NaiveDateTime};

    const DATETIME_FORMATS: &[&str] = &[
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        // Slash dates are month-first
        "%m/%d/%Y %H:%M:%S",
        "%m/%d/%Y %H:%M",
    ];

    const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];

    // Returns None for anything that is not a recognizable date-time; never an error.
    pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(dt.naive_utc());
        }
        if let Some(dt) = DATETIME_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        {
            return Some(dt);
        }
        DATE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
            .and_then(|date| date.and_hms_opt(0, 0, 0))
    }

}

const ORDER_ID: &str = "Order ID";
const CUSTOMER_ID: &str = "Customer ID";
const RESTAURANT_ID: &str = "Restaurant ID";
const ORDER_TIMESTAMP: &str = "Order Date and Time";
const DELIVERY_TIMESTAMP: &str = "Delivery Date and Time";
const ORDER_VALUE: &str = "Order Value";
const DELIVERY_FEE: &str = "Delivery Fee";
const PAYMENT_METHOD: &str = "Payment Method";
const DISCOUNTS: &str = "Discounts and Offers";
const COMMISSION_FEE: &str = "Commission Fee";
const PROCESSING_FEE: &str = "Payment Processing Fee";
const REFUNDS: &str = "Refunds/Chargebacks";

// Placeholders pandas-style exports write for a missing offer
const EMPTY_DISCOUNT_MARKERS: &[&str] = &["none", "nan", "n/a"];

pub struct OrderCsvParser;

impl OrderCsvParser {
    // CSV Header: Order ID,Customer ID,Restaurant ID,Order Date and Time,Delivery Date and Time,Order Value,
    //             Delivery Fee,Payment Method,Discounts and Offers,Commission Fee,Payment Processing Fee,Refunds/Chargebacks
    // Example Row: 1,C8270,R2924,2024-02-01 01:11:52,2024-02-01 02:39:52,1914,0,Credit Card,5% on App,150,47,0
    pub fn load_orders_from_csv(file_path: impl AsRef<Path>, delimiter: u8) -> Result<Vec<OrderRecord>> {
        let file_path = file_path.as_ref();
        let file = File::open(file_path)
            .with_context(|| format!("Failed to open CSV file '{}'", file_path.display()))?;
        let orders = Self::load_orders_from_reader(BufReader::new(file), delimiter)?;
        info!(path = %file_path.display(), count = orders.len(), "Loaded orders from CSV");
        Ok(orders)
    }

    pub fn load_orders_from_reader<R: Read>(reader: R, delimiter: u8) -> Result<Vec<OrderRecord>> {
        let mut rdr = ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        let mut orders = Vec::new();

        for (idx, result) in rdr.records().enumerate() {
            let record = result.with_context(|| format!("Error reading CSV record {}", idx + 1))?;
            // Quoted fields may span lines, so take the line from the reader's position
            let line = record.position().map_or(idx + 2, |p| p.line() as usize);

            let order_id = Self::get_field(&record, &headers, ORDER_ID)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| (idx + 1).to_string());
            let customer_id = Self::get_field(&record, &headers, CUSTOMER_ID)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty());
            let restaurant_id = Self::required_field(&record, &headers, RESTAURANT_ID, line)?.trim().to_string();

            let order_timestamp_str = Self::required_field(&record, &headers, ORDER_TIMESTAMP, line)?;
            let order_timestamp = order_format::parse_timestamp(order_timestamp_str);
            if order_timestamp.is_none() {
                debug!(line, value = order_timestamp_str, "Unparseable order timestamp, keeping it empty");
            }
            let delivery_timestamp = Self::get_field(&record, &headers, DELIVERY_TIMESTAMP)
                .and_then(order_format::parse_timestamp);

            let order_value = Self::amount_field(&record, &headers, ORDER_VALUE, line)?;
            let delivery_fee = Self::amount_field(&record, &headers, DELIVERY_FEE, line)?;
            let commission_fee = Self::amount_field(&record, &headers, COMMISSION_FEE, line)?;
            let payment_processing_fee = Self::amount_field(&record, &headers, PROCESSING_FEE, line)?;
            let refunds_chargebacks = Self::amount_field(&record, &headers, REFUNDS, line)?;

            let payment_method = Self::required_field(&record, &headers, PAYMENT_METHOD, line)?.trim().to_string();
            let discount_text = Self::discount_text(Self::required_field(&record, &headers, DISCOUNTS, line)?);

            orders.push(OrderRecord {
                order_id,
                customer_id,
                restaurant_id,
                order_timestamp,
                delivery_timestamp,
                order_value,
                delivery_fee,
                commission_fee,
                payment_processing_fee,
                refunds_chargebacks,
                payment_method,
                discount_text,
            });
        }
        Ok(orders)
    }

    // Looks a field up by header name so column order in the file does not matter.
    fn get_field<'a>(record: &'a StringRecord, headers: &StringRecord, name: &str) -> Option<&'a str> {
        headers
            .iter()
            .position(|header| header == name)
            .and_then(|pos| record.get(pos))
    }

    fn required_field<'a>(
        record: &'a StringRecord,
        headers: &StringRecord,
        name: &str,
        line: usize,
    ) -> Result<&'a str> {
        Self::get_field(record, headers, name)
            .ok_or_else(|| anyhow!("Missing '{}' field in CSV record at line {}", name, line))
    }

    fn amount_field(record: &StringRecord, headers: &StringRecord, name: &str, line: usize) -> Result<f64> {
        let raw = Self::required_field(record, headers, name, line)?;
        parse_amount(raw).map_err(|e| anyhow!("Error parsing '{}' at line {}: {}", name, line, e))
    }

    fn discount_text(raw: &str) -> String {
        let trimmed = raw.trim();
        if EMPTY_DISCOUNT_MARKERS.iter().any(|marker| trimmed.eq_ignore_ascii_case(marker)) {
            String::new()
        } else {
            trimmed.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "Order ID,Customer ID,Restaurant ID,Order Date and Time,Delivery Date and Time,Order Value,Delivery Fee,Payment Method,Discounts and Offers,Commission Fee,Payment Processing Fee,Refunds/Chargebacks";

    fn create_test_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_load_orders_from_csv_valid_data() {
        let csv_content = format!(
            "{}\n\
1,C8270,R2924,2024-02-01 01:11:52,2024-02-01 02:39:52,1914,0,Credit Card,5% on App,150,47,0\n\
2,C1860,R2054,2024-02-02 22:11:04,2024-02-02 22:46:04,986,40,Digital Wallet,10%,198,23,0\n\
3,C6390,R2870,2024-01-31 05:54:35,2024-01-31 06:52:35,937,30,Cash on Delivery,15% New User,195,45,0\n\
4,C6191,R2642,2024-01-16 22:52:49,2024-01-16 23:38:49,1463,50,Cash on Delivery,,146,27,0\n\
5,C6734,R2799,2024-01-29 01:19:30,2024-01-29 02:48:30,1992,30,Cash on Delivery,50 off Promo,130,50,130",
            HEADER
        );
        let tmp_file = create_test_csv(&csv_content);
        let orders = OrderCsvParser::load_orders_from_csv(tmp_file.path(), b',').unwrap();

        assert_eq!(orders.len(), 5);

        assert_eq!(orders[0].order_id, "1");
        assert_eq!(orders[0].customer_id.as_deref(), Some("C8270"));
        assert_eq!(orders[0].restaurant_id, "R2924");
        assert_eq!(orders[0].order_timestamp, order_format::parse_timestamp("2024-02-01 01:11:52"));
        assert!(orders[0].delivery_timestamp.is_some());
        assert_eq!(orders[0].order_value, 1914.0);
        assert_eq!(orders[0].commission_fee, 150.0);
        assert_eq!(orders[0].payment_processing_fee, 47.0);
        assert_eq!(orders[0].payment_method, "Credit Card");
        assert_eq!(orders[0].discount_text, "5% on App");

        assert_eq!(orders[3].discount_text, "");
        assert_eq!(orders[4].refunds_chargebacks, 130.0);
        assert_eq!(orders[4].discount_text, "50 off Promo");
    }

    #[test]
    fn test_load_orders_from_csv_empty_file() {
        let tmp_file = create_test_csv(HEADER); // Only header
        let orders = OrderCsvParser::load_orders_from_csv(tmp_file.path(), b',').unwrap();
        assert!(orders.is_empty());
    }

    #[test]
    fn test_load_orders_missing_required_column() {
        let csv_content = "\
Order ID,Restaurant ID,Order Date and Time,Order Value,Delivery Fee,Payment Method,Discounts and Offers,Commission Fee,Payment Processing Fee
1,R2924,2024-02-01 01:11:52,1914,0,Credit Card,5% on App,150,47"; // Missing Refunds/Chargebacks
        let tmp_file = create_test_csv(csv_content);
        let result = OrderCsvParser::load_orders_from_csv(tmp_file.path(), b',');
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Missing 'Refunds/Chargebacks' field"));
    }

    #[test]
    fn test_load_orders_invalid_amount() {
        let csv_content = format!(
            "{}\n1,C8270,R2924,2024-02-01 01:11:52,,abc,0,Credit Card,5% on App,150,47,0",
            HEADER
        );
        let tmp_file = create_test_csv(&csv_content);
        let err = OrderCsvParser::load_orders_from_csv(tmp_file.path(), b',').unwrap_err();
        assert!(err.to_string().contains("Error parsing 'Order Value' at line 2"));
    }

    #[test]
    fn test_load_orders_bad_timestamp_keeps_record() {
        let csv_content = format!(
            "{}\n1,C8270,R2924,yesterday-ish,garbage,1914,0,Credit Card,None,150,47,0",
            HEADER
        );
        let tmp_file = create_test_csv(&csv_content);
        let orders = OrderCsvParser::load_orders_from_csv(tmp_file.path(), b',').unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].order_timestamp, None);
        assert_eq!(orders[0].delivery_timestamp, None);
        assert_eq!(orders[0].discount_text, "");
    }

    #[test]
    fn test_load_orders_without_optional_columns() {
        let csv_content = "\
Restaurant ID;Order Date and Time;Order Value;Delivery Fee;Commission Fee;Payment Processing Fee;Refunds/Chargebacks;Payment Method;Discounts and Offers
R1;2024-02-01 01:11:52;500;40;30;10;0;UPI;20% off
R2;2024-02-01 02:00:00;\"1,250.50\";0;30;10;0;UPI;";
        let orders = OrderCsvParser::load_orders_from_reader(csv_content.as_bytes(), b';').unwrap();
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].order_id, "1");
        assert_eq!(orders[1].order_id, "2");
        assert_eq!(orders[0].customer_id, None);
        assert_eq!(orders[0].delivery_timestamp, None);
        assert_eq!(orders[1].order_value, 1250.5);
    }

    #[test]
    fn test_error_line_accounts_for_multiline_fields() {
        let csv_content = "\
Restaurant ID,Order Date and Time,Order Value,Delivery Fee,Commission Fee,Payment Processing Fee,Refunds/Chargebacks,Payment Method,Discounts and Offers
R1,2024-02-01 01:11:52,500,40,30,10,0,UPI,\"20% off
first order only\"
R2,2024-02-01 02:00:00,oops,0,30,10,0,UPI,";
        let err = OrderCsvParser::load_orders_from_reader(csv_content.as_bytes(), b',').unwrap_err();
        assert!(err.to_string().contains("Error parsing 'Order Value' at line 4"), "{}", err);
    }

    #[test]
    fn test_load_orders_missing_file() {
        let err = OrderCsvParser::load_orders_from_csv("/no/such/orders.csv", b',').unwrap_err();
        assert!(err.to_string().contains("Failed to open CSV file"));
        assert!(err.downcast_ref::<std::io::Error>().is_some());
    }
}
