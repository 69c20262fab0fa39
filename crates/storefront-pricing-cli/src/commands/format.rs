use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use storefront_pricing_core::format::{format_amount, CurrencyFormat};

/// Arguments for currency formatting
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct FormatArgs {
    /// Amount to format
    #[arg(long)]
    pub amount: Decimal,

    /// Currency glyph (defaults to ₲)
    #[arg(long)]
    pub symbol: Option<String>,

    /// Digits after the decimal separator
    #[arg(long)]
    pub fraction_digits: Option<u32>,
}

pub fn run_format(args: FormatArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut currency = CurrencyFormat::guarani();
    if let Some(symbol) = args.symbol {
        currency.symbol = symbol;
    }
    if let Some(digits) = args.fraction_digits {
        currency.fraction_digits = digits;
    }

    Ok(json!({
        "amount": args.amount.to_string(),
        "formatted": format_amount(args.amount, &currency),
    }))
}
