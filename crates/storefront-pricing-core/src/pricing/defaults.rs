use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::PricingError;
use crate::pricing::engine::{quote_prices, PricingInput, PricingOutput, Tenor};
use crate::types::{ComputationOutput, Money, Percent};
use crate::PricingResult;

/// Fallback percentages used when a product record leaves a field empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HouseDefaults {
    pub margin_percent: Percent,
    pub interest_6_percent: Percent,
    pub interest_12_percent: Percent,
    pub interest_15_percent: Percent,
    pub interest_18_percent: Percent,
}

impl Default for HouseDefaults {
    fn default() -> Self {
        Self {
            margin_percent: dec!(18),
            interest_6_percent: dec!(45),
            interest_12_percent: dec!(65),
            interest_15_percent: dec!(75),
            interest_18_percent: dec!(85),
        }
    }
}

impl HouseDefaults {
    /// Parse a YAML document; missing keys keep the built-in value.
    pub fn from_yaml_str(s: &str) -> PricingResult<Self> {
        let defaults: HouseDefaults = serde_yaml::from_str(s)?;
        defaults.validate()?;
        Ok(defaults)
    }

    /// Parse a JSON document; missing keys keep the built-in value.
    pub fn from_json_str(s: &str) -> PricingResult<Self> {
        let defaults: HouseDefaults = serde_json::from_str(s)?;
        defaults.validate()?;
        Ok(defaults)
    }

    pub fn interest_percent(&self, tenor: Tenor) -> Percent {
        match tenor {
            Tenor::Months6 => self.interest_6_percent,
            Tenor::Months12 => self.interest_12_percent,
            Tenor::Months15 => self.interest_15_percent,
            Tenor::Months18 => self.interest_18_percent,
        }
    }

    pub fn validate(&self) -> PricingResult<()> {
        let fields = [
            ("margin_percent", self.margin_percent),
            ("interest_6_percent", self.interest_6_percent),
            ("interest_12_percent", self.interest_12_percent),
            ("interest_15_percent", self.interest_15_percent),
            ("interest_18_percent", self.interest_18_percent),
        ];
        for (field, value) in fields {
            if value < Decimal::ZERO {
                return Err(PricingError::Config(format!(
                    "house default {field} must be non-negative, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Pricing fields as read from a stored product row. Any of them may be
/// missing or null upstream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductPricingRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_percent: Option<Percent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interest_6_percent: Option<Percent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interest_12_percent: Option<Percent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interest_15_percent: Option<Percent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interest_18_percent: Option<Percent>,
}

/// Turn a stored record into a complete [`PricingInput`].
///
/// Missing cost becomes 0 and missing percentages take the house default.
/// Negative values clamp to 0. An explicit 0 percentage is kept, so a
/// tenor disabled on the record stays disabled.
pub fn apply_house_defaults(
    record: &ProductPricingRecord,
    defaults: &HouseDefaults,
) -> PricingInput {
    PricingInput {
        cost: coerce(record.cost, Decimal::ZERO),
        margin_percent: coerce(record.margin_percent, defaults.margin_percent),
        interest_6_percent: coerce(record.interest_6_percent, defaults.interest_6_percent),
        interest_12_percent: coerce(record.interest_12_percent, defaults.interest_12_percent),
        interest_15_percent: coerce(record.interest_15_percent, defaults.interest_15_percent),
        interest_18_percent: coerce(record.interest_18_percent, defaults.interest_18_percent),
    }
}

/// Names of the record fields holding a negative value.
pub fn clamped_fields(record: &ProductPricingRecord) -> Vec<&'static str> {
    [
        ("cost", record.cost),
        ("margin_percent", record.margin_percent),
        ("interest_6_percent", record.interest_6_percent),
        ("interest_12_percent", record.interest_12_percent),
        ("interest_15_percent", record.interest_15_percent),
        ("interest_18_percent", record.interest_18_percent),
    ]
    .into_iter()
    .filter(|(_, value)| value.is_some_and(|v| v < Decimal::ZERO))
    .map(|(field, _)| field)
    .collect()
}

/// Default a stored record and quote it, warning for every negative field
/// that was clamped to 0.
pub fn quote_record(
    record: &ProductPricingRecord,
    defaults: &HouseDefaults,
) -> PricingResult<ComputationOutput<PricingOutput>> {
    let mut quoted = quote_prices(&apply_house_defaults(record, defaults))?;
    for field in clamped_fields(record) {
        quoted
            .warnings
            .push(format!("{field} is negative on the record; quoted as 0"));
    }
    Ok(quoted)
}

fn coerce(value: Option<Decimal>, fallback: Decimal) -> Decimal {
    value.unwrap_or(fallback).max(Decimal::ZERO)
}
