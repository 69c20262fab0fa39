use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use storefront_pricing_core::pricing::{quote_record, HouseDefaults, ProductPricingRecord};

use crate::input;

/// Arguments for a single-product quote. `--cost` is required; omitted
/// percentages take the house defaults.
#[derive(Args)]
pub struct QuoteArgs {
    /// Acquisition cost (e.g. 100000)
    #[arg(long)]
    pub cost: Option<Decimal>,

    /// Margin over cost for the cash price, in percent (e.g. 18)
    #[arg(long)]
    pub margin: Option<Decimal>,

    /// 6-month plan surcharge in percent (0 disables the plan)
    #[arg(long)]
    pub interest_6: Option<Decimal>,

    /// 12-month plan surcharge in percent (0 disables the plan)
    #[arg(long)]
    pub interest_12: Option<Decimal>,

    /// 15-month plan surcharge in percent (0 disables the plan)
    #[arg(long)]
    pub interest_15: Option<Decimal>,

    /// 18-month plan surcharge in percent (0 disables the plan)
    #[arg(long)]
    pub interest_18: Option<Decimal>,

    /// Path to a JSON product pricing record (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_quote(args: QuoteArgs, defaults: &HouseDefaults) -> Result<Value, Box<dyn std::error::Error>> {
    let record: ProductPricingRecord = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(record) = input::stdin::read_stdin()? {
        record
    } else {
        if args.cost.is_none() {
            return Err("--cost is required (or provide --input)".into());
        }
        ProductPricingRecord {
            cost: args.cost,
            margin_percent: args.margin,
            interest_6_percent: args.interest_6,
            interest_12_percent: args.interest_12,
            interest_15_percent: args.interest_15,
            interest_18_percent: args.interest_18,
        }
    };

    tracing::debug!(cost = ?record.cost, margin = ?record.margin_percent, "quoting product");

    let result = quote_record(&record, defaults)?;
    Ok(serde_json::to_value(result)?)
}
