// Extraction of discount terms from free-text offer descriptions
use regex::Regex;
use shared::models::DiscountTerms;
use std::sync::LazyLock;

static PERCENTAGE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+(?:\.\d+)?)%").expect("percentage pattern is valid"));

static FIXED_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*off").expect("fixed discount pattern is valid"));

const MAX_PERCENTAGE: f64 = 100.0;

/// Pulls a percentage ("20%") and a fixed amount ("50 off") out of an offer text.
///
/// Each pattern is matched independently against the first occurrence, so a
/// text such as "10% off, 50 off" yields both values. A pattern that does not
/// match leaves its side as `None`. Percentages are capped at 100.
pub fn parse_discount_text(text: &str) -> DiscountTerms {
    let percentage = first_number(&PERCENTAGE_PATTERN, text).map(|p| p.min(MAX_PERCENTAGE));
    let fixed = first_number(&FIXED_PATTERN, text);
    DiscountTerms { percentage, fixed }
}

fn first_number(pattern: &Regex, text: &str) -> Option<f64> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
}
