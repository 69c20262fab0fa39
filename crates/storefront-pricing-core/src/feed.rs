//! Machine-readable catalog export. Uses the same engine as every other
//! caller, so feed figures always match in-app quotes.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Instant;

use crate::error::PricingError;
use crate::format::{format_amount, CurrencyFormat};
use crate::pricing::{
    apply_house_defaults, compute_prices, validate_pricing_input, HouseDefaults,
    ProductPricingRecord,
};
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::PricingResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogProduct {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub pricing: ProductPricingRecord,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogFeedInput {
    pub products: Vec<CatalogProduct>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub house_defaults: Option<HouseDefaults>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency_format: Option<CurrencyFormat>,
}

/// An offered financing plan, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedPlan {
    pub months: u32,
    pub installment: Money,
    pub total: Money,
    /// e.g. "12 x ₲ 20.000"
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedEntry {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
    pub cash_price: Money,
    pub cash_price_display: String,
    /// Only available tenors, shortest first
    pub plans: Vec<FeedPlan>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogFeed {
    pub entries: Vec<FeedEntry>,
    pub product_count: usize,
    /// Products offering at least one financing plan
    pub financed_count: usize,
}

/// Build the export feed for a list of product records.
pub fn build_catalog_feed(
    input: &CatalogFeedInput,
) -> PricingResult<ComputationOutput<CatalogFeed>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let defaults = input.house_defaults.clone().unwrap_or_default();
    defaults.validate()?;
    let currency = input.currency_format.clone().unwrap_or_default();

    let mut seen: HashSet<&str> = HashSet::new();
    let mut entries = Vec::with_capacity(input.products.len());

    for product in &input.products {
        if !seen.insert(product.id.as_str()) {
            return Err(PricingError::InvalidInput {
                field: "products.id".into(),
                reason: format!("Duplicate product id '{}'", product.id),
            });
        }
        if product.pricing.cost.is_none() {
            warnings.push(format!("Product {} has no cost; priced at 0", product.id));
        }

        let pricing = apply_house_defaults(&product.pricing, &defaults);
        validate_pricing_input(&pricing)?;
        let prices = compute_prices(&pricing);

        let plans = prices
            .available_tenors()
            .map(|q| FeedPlan {
                months: q.tenor.months(),
                installment: q.installment,
                total: q.total,
                label: format!(
                    "{} x {}",
                    q.tenor.months(),
                    format_amount(q.installment, &currency)
                ),
            })
            .collect();

        entries.push(FeedEntry {
            id: product.id.clone(),
            name: product.name.clone(),
            category: product.category.clone(),
            stock: product.stock,
            cash_price: prices.cash_price,
            cash_price_display: format_amount(prices.cash_price, &currency),
            plans,
        });
    }

    let financed_count = entries.iter().filter(|e| !e.plans.is_empty()).count();
    let output = CatalogFeed {
        product_count: entries.len(),
        financed_count,
        entries,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Catalog export priced with the shared engine",
        input,
        warnings,
        elapsed,
        output,
    ))
}
