use clap::Args;
use serde_json::Value;

use storefront_pricing_core::cart::{self, CartInput};
use storefront_pricing_core::pricing::HouseDefaults;

use crate::input;

/// Arguments for cart totals
#[derive(Args)]
pub struct CartArgs {
    /// Path to JSON cart file ({"lines": [{"product_id", "pricing", "quantity"}]})
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_cart_total(args: CartArgs, defaults: &HouseDefaults) -> Result<Value, Box<dyn std::error::Error>> {
    let mut cart_input: CartInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        data
    } else {
        return Err("--input <cart.json> is required (or pipe JSON on stdin)".into());
    };

    if cart_input.house_defaults.is_none() {
        cart_input.house_defaults = Some(defaults.clone());
    }
    tracing::debug!(lines = cart_input.lines.len(), "pricing cart");

    let result = cart::price_cart(&cart_input)?;
    Ok(serde_json::to_value(result)?)
}
