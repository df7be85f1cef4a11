// Amount parsing and currency formatting shared by the engine and its report renderer.

pub mod amount_format {
    use anyhow::{anyhow, Result};
    use std::str::FromStr;

    // Parses amounts like "1914", "47.50" or "1,234.50" into f64.
    pub fn parse_amount(s: &str) -> Result<f64> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(anyhow!("Empty amount"));
        }
        let normalized = trimmed.replace(',', "");

        let value = f64::from_str(&normalized)
            .map_err(|e| anyhow!("Failed to parse amount '{}': {}", s, e))?;
        if !value.is_finite() {
            return Err(anyhow!("Amount '{}' is not a finite number", s));
        }
        Ok(value)
    }

    /// Formats `value` with `decimals` places and comma thousands separators.
    pub fn format_grouped(value: f64, decimals: usize) -> String {
        let formatted = format!("{:.decimals$}", value.abs(), decimals = decimals);
        let (int_part, frac_part) = match formatted.split_once('.') {
            Some((int_part, frac_part)) => (int_part, Some(frac_part)),
            None => (formatted.as_str(), None),
        };

        let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
        for (i, ch) in int_part.chars().enumerate() {
            if i > 0 && (int_part.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        if let Some(frac_part) = frac_part {
            grouped.push('.');
            grouped.push_str(frac_part);
        }

        if value.is_sign_negative() && grouped.chars().any(|c| c.is_ascii_digit() && c != '0') {
            format!("-{}", grouped)
        } else {
            grouped
        }
    }

    /// Renders a currency amount with two decimals, e.g. `₹1,234,567.89`.
    pub fn format_currency(value: f64, symbol: &str) -> String {
        let grouped = format_grouped(value, 2);
        match grouped.strip_prefix('-') {
            Some(magnitude) => format!("-{}{}", symbol, magnitude),
            None => format!("{}{}", symbol, grouped),
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_parse_amount_plain() {
            assert_eq!(parse_amount("1914").unwrap(), 1914.0);
            assert_eq!(parse_amount(" 47.5 ").unwrap(), 47.5);
        }

        #[test]
        fn test_parse_amount_with_thousands() {
            assert_eq!(parse_amount("1,234.50").unwrap(), 1234.5);
        }

        #[test]
        fn test_parse_amount_rejects_garbage() {
            assert!(parse_amount("").is_err());
            assert!(parse_amount("abc").is_err());
            assert!(parse_amount("NaN").is_err());
        }

        #[test]
        fn test_format_grouped() {
            assert_eq!(format_grouped(0.0, 2), "0.00");
            assert_eq!(format_grouped(999.5, 2), "999.50");
            assert_eq!(format_grouped(1234567.891, 2), "1,234,567.89");
            assert_eq!(format_grouped(100000.0, 0), "100,000");
        }

        #[test]
        fn test_format_currency_negative() {
            assert_eq!(format_currency(-1234.5, "₹"), "-₹1,234.50");
            assert_eq!(format_currency(540.0, "₹"), "₹540.00");
        }

        #[test]
        fn test_format_currency_negative_zero() {
            assert_eq!(format_currency(-0.001, "$"), "$0.00");
        }
    }
}
