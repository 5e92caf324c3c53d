//! Fuzzy numeric normalization shared by the parser and the engine

use bigdecimal::{BigDecimal, RoundingMode};

/// Parse monetary text into a decimal, tolerating thousands separators and
/// dollar signs. Anything that still fails to parse is zero — callers rely
/// on that to drop unusable rows rather than abort a batch.
pub fn parse_amount(raw: &str) -> BigDecimal {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| *c != ',' && *c != '$')
        .collect();

    cleaned.parse().unwrap_or_else(|_| BigDecimal::from(0))
}

/// Format a decimal with exactly two fraction digits (half-up rounding)
pub fn format_fixed2(value: &BigDecimal) -> String {
    let mut text = value.with_scale_round(2, RoundingMode::HalfUp).to_string();

    // `with_scale_round` normalizes zero to scale 0, so pad the rendered
    // text until both fraction digits are present.
    match text.find('.') {
        Some(dot) => {
            while text.len() - dot - 1 < 2 {
                text.push('0');
            }
        }
        None => text.push_str(".00"),
    }

    text
}

/// Fixed 2-decimal formatting with the export sign convention: negative
/// values render as `-` followed by the absolute value.
pub fn format_signed_fixed2(value: &BigDecimal) -> String {
    if *value < BigDecimal::from(0) {
        format!("-{}", format_fixed2(&value.abs()))
    } else {
        format_fixed2(value)
    }
}
