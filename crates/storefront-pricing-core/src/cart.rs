use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::PricingError;
use crate::pricing::{
    apply_house_defaults, compute_prices, validate_pricing_input, HouseDefaults,
    ProductPricingRecord,
};
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::PricingResult;

/// One product in the cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: String,
    /// Pricing fields of the product record, defaulted before pricing
    #[serde(default)]
    pub pricing: ProductPricingRecord,
    pub quantity: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartInput {
    pub lines: Vec<CartLine>,
    /// Falls back to the built-in house defaults
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub house_defaults: Option<HouseDefaults>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricedLine {
    pub product_id: String,
    pub quantity: u32,
    /// Cash price of one unit
    pub unit_price: Money,
    pub line_total: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartTotals {
    pub lines: Vec<PricedLine>,
    pub item_count: u64,
    /// Sum of cash-price line totals; this is the amount charged at checkout
    pub total: Money,
}

/// Price every line at its cash price and sum the cart.
///
/// Financing plans never enter the checkout total.
pub fn price_cart(input: &CartInput) -> PricingResult<ComputationOutput<CartTotals>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.lines.is_empty() {
        return Err(PricingError::InsufficientData(
            "Cart must contain at least one line".into(),
        ));
    }

    let defaults = input.house_defaults.clone().unwrap_or_default();
    defaults.validate()?;

    let mut lines = Vec::with_capacity(input.lines.len());
    let mut total = Decimal::ZERO;
    let mut item_count: u64 = 0;

    for line in &input.lines {
        if line.quantity == 0 {
            return Err(PricingError::InvalidInput {
                field: format!("lines[{}].quantity", line.product_id),
                reason: "Quantity must be at least 1".into(),
            });
        }
        if line.pricing.cost.is_none() {
            warnings.push(format!(
                "Product {} has no cost; priced at 0",
                line.product_id
            ));
        }

        let pricing = apply_house_defaults(&line.pricing, &defaults);
        validate_pricing_input(&pricing)?;
        let unit_price = compute_prices(&pricing).cash_price;
        let line_total = unit_price
            .checked_mul(Decimal::from(line.quantity))
            .ok_or_else(|| overflow(&format!("lines[{}].quantity", line.product_id)))?;

        total = total
            .checked_add(line_total)
            .ok_or_else(|| overflow("total"))?;
        item_count += u64::from(line.quantity);
        lines.push(PricedLine {
            product_id: line.product_id.clone(),
            quantity: line.quantity,
            unit_price,
            line_total,
        });
    }

    let output = CartTotals {
        lines,
        item_count,
        total,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Sum of cash price times quantity per line",
        input,
        warnings,
        elapsed,
        output,
    ))
}

fn overflow(field: &str) -> PricingError {
    PricingError::InvalidInput {
        field: field.into(),
        reason: "Cart amount exceeds the representable range".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn whole(units: i128) -> Money {
        Decimal::from_i128_with_scale(units, 0)
    }

    fn line(id: &str, cost: Money, quantity: u32) -> CartLine {
        CartLine {
            product_id: id.into(),
            pricing: ProductPricingRecord {
                cost: Some(cost),
                ..Default::default()
            },
            quantity,
        }
    }

    #[test]
    fn test_single_line() {
        let input = CartInput {
            lines: vec![line("p1", dec!(100000), 2)],
            house_defaults: None,
        };
        let out = price_cart(&input).unwrap().result;
        assert_eq!(out.lines[0].unit_price, dec!(120000));
        assert_eq!(out.total, dec!(240000));
        assert_eq!(out.item_count, 2);
    }

    #[test]
    fn test_empty_cart_rejected() {
        let input = CartInput {
            lines: vec![],
            house_defaults: None,
        };
        assert!(matches!(
            price_cart(&input),
            Err(PricingError::InsufficientData(_))
        ));
    }

    #[test]
    fn test_zero_quantity_rejected() {
        let input = CartInput {
            lines: vec![line("p1", dec!(100000), 0)],
            house_defaults: None,
        };
        match price_cart(&input).unwrap_err() {
            PricingError::InvalidInput { field, .. } => assert!(field.contains("quantity")),
            e => panic!("Expected InvalidInput, got {e:?}"),
        }
    }

    #[test]
    fn test_line_total_beyond_decimal_range_is_an_error() {
        let input = CartInput {
            lines: vec![line("bulk", whole(10i128.pow(25)), u32::MAX)],
            house_defaults: None,
        };
        match price_cart(&input).unwrap_err() {
            PricingError::InvalidInput { field, .. } => assert_eq!(field, "lines[bulk].quantity"),
            e => panic!("Expected InvalidInput, got {e:?}"),
        }
    }

    #[test]
    fn test_cart_total_beyond_decimal_range_is_an_error() {
        let input = CartInput {
            // each line fits (5.9e28), their sum does not
            lines: vec![
                line("a", whole(5 * 10i128.pow(26)), 100),
                line("b", whole(5 * 10i128.pow(26)), 100),
            ],
            house_defaults: None,
        };
        match price_cart(&input).unwrap_err() {
            PricingError::InvalidInput { field, .. } => assert_eq!(field, "total"),
            e => panic!("Expected InvalidInput, got {e:?}"),
        }
    }

    #[test]
    fn test_cost_beyond_decimal_range_is_an_error() {
        let input = CartInput {
            lines: vec![line("huge", Decimal::MAX / dec!(10), 1)],
            house_defaults: None,
        };
        assert!(matches!(
            price_cart(&input),
            Err(PricingError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_custom_house_margin() {
        let input = CartInput {
            lines: vec![line("p1", dec!(100000), 1)],
            house_defaults: Some(HouseDefaults {
                margin_percent: dec!(30),
                ..Default::default()
            }),
        };
        let out = price_cart(&input).unwrap().result;
        assert_eq!(out.total, dec!(130000));
    }

    #[test]
    fn test_missing_cost_warns() {
        let input = CartInput {
            lines: vec![CartLine {
                product_id: "ghost".into(),
                pricing: ProductPricingRecord::default(),
                quantity: 1,
            }],
            house_defaults: None,
        };
        let result = price_cart(&input).unwrap();
        assert_eq!(result.result.total, Decimal::ZERO);
        assert!(result.warnings.iter().any(|w| w.contains("ghost")));
    }
}
