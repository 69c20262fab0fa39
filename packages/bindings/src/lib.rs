use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;

use storefront_pricing_core::pricing::{self, HouseDefaults, ProductPricingRecord};
use storefront_pricing_core::{cart, feed, format};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn house_defaults_from(defaults_json: Option<String>) -> NapiResult<HouseDefaults> {
    match defaults_json {
        Some(json) => HouseDefaults::from_json_str(&json).map_err(to_napi_error),
        None => Ok(HouseDefaults::default()),
    }
}

// ---------------------------------------------------------------------------
// Pricing
// ---------------------------------------------------------------------------

/// Validated quote wrapped in the computation envelope.
#[napi]
pub fn quote_prices(input_json: String) -> NapiResult<String> {
    let input: pricing::PricingInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = pricing::quote_prices(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Bare breakdown without the envelope. Input is still validated so an
/// out-of-range cost surfaces as a JS error.
#[napi]
pub fn compute_prices(input_json: String) -> NapiResult<String> {
    let input: pricing::PricingInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    pricing::validate_pricing_input(&input).map_err(to_napi_error)?;
    let output = pricing::compute_prices(&input);
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn apply_house_defaults(record_json: String, defaults_json: Option<String>) -> NapiResult<String> {
    let record: ProductPricingRecord = serde_json::from_str(&record_json).map_err(to_napi_error)?;
    let defaults = house_defaults_from(defaults_json)?;
    let input = pricing::apply_house_defaults(&record, &defaults);
    serde_json::to_string(&input).map_err(to_napi_error)
}

/// Default a stored product record and quote it in one call. Negative
/// record values are quoted as 0 and reported in `warnings`.
#[napi]
pub fn quote_product(record_json: String, defaults_json: Option<String>) -> NapiResult<String> {
    let record: ProductPricingRecord = serde_json::from_str(&record_json).map_err(to_napi_error)?;
    let defaults = house_defaults_from(defaults_json)?;
    let output = pricing::quote_record(&record, &defaults).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Checkout & export
// ---------------------------------------------------------------------------

#[napi]
pub fn price_cart(input_json: String) -> NapiResult<String> {
    let input: cart::CartInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = cart::price_cart(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn build_catalog_feed(input_json: String) -> NapiResult<String> {
    let input: feed::CatalogFeedInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = feed::build_catalog_feed(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

/// `amount` is a decimal string; `format_json` a CurrencyFormat (guaraní if omitted).
#[napi]
pub fn format_amount(amount: String, format_json: Option<String>) -> NapiResult<String> {
    let amount: Decimal = amount.trim().parse().map_err(to_napi_error)?;
    let currency = match format_json {
        Some(json) => serde_json::from_str(&json).map_err(to_napi_error)?,
        None => format::CurrencyFormat::guarani(),
    };
    Ok(format::format_amount(amount, &currency))
}
