pub mod defaults;
pub mod engine;

pub use defaults::{
    apply_house_defaults, clamped_fields, quote_record, HouseDefaults, ProductPricingRecord,
};
pub use engine::{
    compute_prices, quote_prices, validate_pricing_input, PricingInput, PricingOutput, Tenor,
    TenorQuote,
};
