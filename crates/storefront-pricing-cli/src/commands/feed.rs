use clap::Args;
use serde_json::Value;

use storefront_pricing_core::feed::{self, CatalogFeedInput};
use storefront_pricing_core::pricing::HouseDefaults;

use crate::input;

/// Arguments for the catalog export feed
#[derive(Args)]
pub struct FeedArgs {
    /// Path to JSON catalog file ({"products": [{"id", "name", "pricing"}]})
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_feed(args: FeedArgs, defaults: &HouseDefaults) -> Result<Value, Box<dyn std::error::Error>> {
    let mut feed_input: CatalogFeedInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        data
    } else {
        return Err("--input <catalog.json> is required (or pipe JSON on stdin)".into());
    };

    if feed_input.house_defaults.is_none() {
        feed_input.house_defaults = Some(defaults.clone());
    }
    tracing::debug!(products = feed_input.products.len(), "building catalog feed");

    let result = feed::build_catalog_feed(&feed_input)?;
    Ok(serde_json::to_value(result)?)
}
