//! Formatting helpers for rendered pages

use chrono::NaiveDate;
use finboard_config::{CurrencyConfig, SymbolPosition};
use rust_decimal::{Decimal, RoundingStrategy};

/// Group the digits of an integer part with a separator
pub fn group_thousands(digits: &str, separator: &str) -> String {
    let mut result = String::new();
    let mut count = 0;
    for c in digits.chars().rev() {
        if count == 3 {
            result.push_str(&separator.chars().rev().collect::<String>());
            count = 0;
        }
        result.push(c);
        count += 1;
    }
    result.chars().rev().collect()
}

/// Format an amount using the configured currency, e.g. `$1,200.00` or `-$5.75`
pub fn format_currency(amount: Decimal, currency: &CurrencyConfig) -> String {
    let rounded = amount
        .round_dp_with_strategy(currency.decimal_places, RoundingStrategy::MidpointAwayFromZero)
        .abs();
    let text = format!("{:.*}", currency.decimal_places as usize, rounded);
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text.as_str(), None),
    };

    let mut number = group_thousands(int_part, &currency.thousands_separator);
    if let Some(frac) = frac_part {
        number.push_str(&currency.decimal_separator);
        number.push_str(frac);
    }

    let sign = if amount.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    match currency.symbol_position {
        SymbolPosition::Before => format!("{}{}{}", sign, currency.symbol, number),
        SymbolPosition::After => format!("{}{} {}", sign, number, currency.symbol),
    }
}

/// Format with an explicit `+` for positive amounts
pub fn format_signed_currency(amount: Decimal, currency: &CurrencyConfig) -> String {
    if amount > Decimal::ZERO {
        format!("+{}", format_currency(amount, currency))
    } else {
        format_currency(amount, currency)
    }
}

/// Display form of a record date, e.g. `Jun 15, 2023`; unparsable input is returned as is
pub fn format_date(date: &str) -> String {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map(|d| d.format("%b %-d, %Y").to_string())
        .unwrap_or_else(|_| date.to_string())
}

/// Escape text for inclusion in HTML bodies and attribute values
pub fn escape_html(content: &str) -> String {
    let mut escaped = String::with_capacity(content.len());
    for c in content.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
