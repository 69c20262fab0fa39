//! Currency display. Kept apart from the pricing engine so locale changes
//! never touch the rounding law.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::types::Money;

/// How an amount is rendered for customers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrencyFormat {
    /// Glyph placed before the amount
    pub symbol: String,
    pub thousands_separator: String,
    pub decimal_separator: String,
    /// Digits after the decimal separator (0 for guaraníes)
    pub fraction_digits: u32,
    /// Put a space between the glyph and the digits
    pub symbol_spacing: bool,
}

impl CurrencyFormat {
    /// Paraguayan guaraní: `₲ 1.250.000`
    pub fn guarani() -> Self {
        Self {
            symbol: "₲".into(),
            thousands_separator: ".".into(),
            decimal_separator: ",".into(),
            fraction_digits: 0,
            symbol_spacing: true,
        }
    }
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self::guarani()
    }
}

/// Render `amount` with grouped thousands and the currency glyph.
///
/// The amount is rounded half away from zero to `fraction_digits`. A
/// negative amount keeps its sign in front of the glyph.
pub fn format_amount(amount: Money, format: &CurrencyFormat) -> String {
    let rounded =
        amount.round_dp_with_strategy(format.fraction_digits, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded < Decimal::ZERO;

    let digits = rounded.abs().to_string();
    let (integer, fraction) = match digits.split_once('.') {
        Some((i, f)) => (i.to_string(), f.to_string()),
        None => (digits.clone(), String::new()),
    };

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&format.symbol);
    if format.symbol_spacing && !format.symbol.is_empty() {
        out.push(' ');
    }
    out.push_str(&group_thousands(&integer, &format.thousands_separator));

    if format.fraction_digits > 0 {
        let width = format.fraction_digits as usize;
        out.push_str(&format.decimal_separator);
        out.push_str(&format!("{fraction:0<width$}"));
    }

    out
}

/// Shorthand for [`format_amount`] with [`CurrencyFormat::guarani`].
pub fn format_guarani(amount: Money) -> String {
    format_amount(amount, &CurrencyFormat::guarani())
}

fn group_thousands(digits: &str, separator: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3 * separator.len());
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push_str(separator);
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_guarani_grouping() {
        assert_eq!(format_guarani(dec!(120000)), "₲ 120.000");
        assert_eq!(format_guarani(dec!(1250000)), "₲ 1.250.000");
        assert_eq!(format_guarani(dec!(5000)), "₲ 5.000");
        assert_eq!(format_guarani(dec!(999)), "₲ 999");
    }

    #[test]
    fn test_zero() {
        assert_eq!(format_guarani(Decimal::ZERO), "₲ 0");
    }

    #[test]
    fn test_fraction_rounded_away() {
        assert_eq!(format_guarani(dec!(24166.5)), "₲ 24.167");
        assert_eq!(format_guarani(dec!(24166.49)), "₲ 24.166");
    }

    #[test]
    fn test_negative_keeps_sign() {
        assert_eq!(format_guarani(dec!(-5000)), "-₲ 5.000");
    }

    #[test]
    fn test_two_fraction_digits() {
        let usd = CurrencyFormat {
            symbol: "$".into(),
            thousands_separator: ",".into(),
            decimal_separator: ".".into(),
            fraction_digits: 2,
            symbol_spacing: false,
        };
        assert_eq!(format_amount(dec!(1234567.5), &usd), "$1,234,567.50");
        assert_eq!(format_amount(dec!(10), &usd), "$10.00");
        assert_eq!(format_amount(dec!(0.005), &usd), "$0.01");
    }

    #[test]
    fn test_empty_symbol_has_no_leading_space() {
        let plain = CurrencyFormat {
            symbol: String::new(),
            ..CurrencyFormat::guarani()
        };
        assert_eq!(format_amount(dec!(35000), &plain), "35.000");
    }
}
