//! Human-readable rendering of increase specifications

use crate::contract::IncreaseType;
use rust_decimal::{Decimal, RoundingStrategy};

/// `"{value}%"` for percentages, a currency string such as `"$1,250.00"` for
/// fixed amounts.
pub fn format_increase_display(increase_type: IncreaseType, value: Decimal, currency_symbol: &str) -> String {
    match increase_type {
        IncreaseType::Percentage => format!("{}%", value.normalize()),
        IncreaseType::FixedAmount => format_currency(value, currency_symbol),
    }
}

/// Two decimal places with comma thousands separators
pub fn format_currency(value: Decimal, currency_symbol: &str) -> String {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded < Decimal::ZERO;
    rounded = rounded.abs();
    rounded.rescale(2);

    let text = rounded.to_string();
    let (integer, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!(
        "{}{}{}.{}",
        if negative { "-" } else { "" },
        currency_symbol,
        grouped,
        fraction
    )
}
