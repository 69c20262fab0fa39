use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Instant;

use crate::error::PricingError;
use crate::rounding::{round_up_5000, ROUNDING_STEP};
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::PricingResult;

/// Financing term offered at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum Tenor {
    Months6,
    Months12,
    Months15,
    Months18,
}

impl Tenor {
    /// Every offered tenor, shortest first.
    pub const ALL: [Tenor; 4] = [
        Tenor::Months6,
        Tenor::Months12,
        Tenor::Months15,
        Tenor::Months18,
    ];

    pub fn months(self) -> u32 {
        match self {
            Tenor::Months6 => 6,
            Tenor::Months12 => 12,
            Tenor::Months15 => 15,
            Tenor::Months18 => 18,
        }
    }

    fn index(self) -> usize {
        match self {
            Tenor::Months6 => 0,
            Tenor::Months12 => 1,
            Tenor::Months15 => 2,
            Tenor::Months18 => 3,
        }
    }
}

impl TryFrom<u32> for Tenor {
    type Error = PricingError;

    fn try_from(months: u32) -> Result<Self, Self::Error> {
        Tenor::ALL
            .into_iter()
            .find(|t| t.months() == months)
            .ok_or(PricingError::InvalidTenor(months))
    }
}

impl From<Tenor> for u32 {
    fn from(tenor: Tenor) -> Self {
        tenor.months()
    }
}

impl fmt::Display for Tenor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} months", self.months())
    }
}

/// Cost basis and percentage configuration for one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingInput {
    /// Acquisition cost in whole currency units
    pub cost: Money,
    /// Markup over cost for the one-time cash price
    pub margin_percent: Percent,
    /// Surcharge over cost for the 6-month plan (0 disables the plan)
    pub interest_6_percent: Percent,
    /// Surcharge over cost for the 12-month plan (0 disables the plan)
    pub interest_12_percent: Percent,
    /// Surcharge over cost for the 15-month plan (0 disables the plan)
    pub interest_15_percent: Percent,
    /// Surcharge over cost for the 18-month plan (0 disables the plan)
    pub interest_18_percent: Percent,
}

impl PricingInput {
    pub fn interest_percent(&self, tenor: Tenor) -> Percent {
        match tenor {
            Tenor::Months6 => self.interest_6_percent,
            Tenor::Months12 => self.interest_12_percent,
            Tenor::Months15 => self.interest_15_percent,
            Tenor::Months18 => self.interest_18_percent,
        }
    }
}

/// One financing plan. `total` and `installment` are zero when the plan is
/// not offered, so check `available` before displaying them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenorQuote {
    pub tenor: Tenor,
    pub available: bool,
    /// Total financed amount, rounded up to the next 5000
    pub total: Money,
    /// Monthly payment: the rounded total over the term, rounded up again
    pub installment: Money,
}

/// Display-ready price breakdown for one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingOutput {
    /// One-time payment price, rounded up to the next 5000
    pub cash_price: Money,
    /// Plans in `Tenor::ALL` order
    pub tenors: [TenorQuote; 4],
}

impl PricingOutput {
    pub fn tenor(&self, tenor: Tenor) -> &TenorQuote {
        &self.tenors[tenor.index()]
    }

    pub fn available(&self, tenor: Tenor) -> bool {
        self.tenor(tenor).available
    }

    /// Plans that can actually be offered, shortest first.
    pub fn available_tenors(&self) -> impl Iterator<Item = &TenorQuote> {
        self.tenors.iter().filter(|q| q.available)
    }
}

/// Derive the cash price and every financing plan from a product's cost.
///
/// cash_price = roundUp5000(cost + cost * margin / 100)
/// total_T    = roundUp5000(cost + cost * interest_T / 100)
/// install_T  = roundUp5000(total_T / T)
///
/// A tenor whose interest is exactly zero is unavailable and reports zero
/// for both figures. The function is pure and total over non-negative input;
/// validation lives in [`quote_prices`].
pub fn compute_prices(input: &PricingInput) -> PricingOutput {
    PricingOutput {
        cash_price: round_up_5000(apply_percent(input.cost, input.margin_percent)),
        tenors: Tenor::ALL.map(|t| quote_tenor(input.cost, t, input.interest_percent(t))),
    }
}

/// Validate the input and compute prices wrapped in the standard envelope.
pub fn quote_prices(input: &PricingInput) -> PricingResult<ComputationOutput<PricingOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_pricing_input(input)?;

    let output = compute_prices(input);

    if input.cost.is_zero() && output.available_tenors().next().is_some() {
        warnings.push(
            "Zero cost: financing plans are offered with a total of 0; \
             disable the tenors if the product is free"
                .into(),
        );
    }
    if output.available_tenors().next().is_none() {
        warnings.push("No financing plan available: all interest percentages are 0".into());
    }
    for quote in output.available_tenors() {
        if quote.total < output.cash_price {
            warnings.push(format!(
                "{} plan total ({}) is below the cash price ({})",
                quote.tenor, quote.total, output.cash_price
            ));
        }
    }

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Cost-plus pricing rounded up to 5000, per-tenor financing surcharge",
        input,
        warnings,
        elapsed,
        output,
    ))
}

/// Reject negative cost or percentages, and any combination whose marked-up
/// and rounded figure would not fit in a `Decimal`.
pub fn validate_pricing_input(input: &PricingInput) -> PricingResult<()> {
    check_non_negative("cost", input.cost)?;
    check_non_negative("margin_percent", input.margin_percent)?;
    check_representable("margin_percent", input.cost, input.margin_percent)?;
    for tenor in Tenor::ALL {
        let field = format!("interest_{}_percent", tenor.months());
        let percent = input.interest_percent(tenor);
        check_non_negative(&field, percent)?;
        check_representable(&field, input.cost, percent)?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn quote_tenor(cost: Money, tenor: Tenor, interest: Percent) -> TenorQuote {
    if interest.is_zero() {
        return TenorQuote {
            tenor,
            available: false,
            total: Decimal::ZERO,
            installment: Decimal::ZERO,
        };
    }

    let total = round_up_5000(apply_percent(cost, interest));
    let installment = round_up_5000(total / Decimal::from(tenor.months()));

    TenorQuote {
        tenor,
        available: true,
        total,
        installment,
    }
}

fn apply_percent(cost: Money, percent: Percent) -> Money {
    cost + cost * percent / dec!(100)
}

fn check_representable(field: &str, cost: Money, percent: Percent) -> PricingResult<()> {
    cost.checked_mul(percent)
        .and_then(|markup| markup.checked_div(dec!(100)))
        .and_then(|markup| markup.checked_add(cost))
        .and_then(|raw| raw.checked_add(ROUNDING_STEP))
        .map(|_| ())
        .ok_or_else(|| PricingError::InvalidInput {
            field: field.into(),
            reason: format!("cost {cost} with {percent}% exceeds the representable range"),
        })
}

fn check_non_negative(field: &str, value: Decimal) -> PricingResult<()> {
    if value < Decimal::ZERO {
        return Err(PricingError::InvalidInput {
            field: field.into(),
            reason: format!("must be non-negative, got {value}"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn house_input(cost: Money) -> PricingInput {
        PricingInput {
            cost,
            margin_percent: dec!(18),
            interest_6_percent: dec!(45),
            interest_12_percent: dec!(65),
            interest_15_percent: dec!(75),
            interest_18_percent: dec!(85),
        }
    }

    #[test]
    fn test_house_configuration_breakdown() {
        let out = compute_prices(&house_input(dec!(100000)));

        assert_eq!(out.cash_price, dec!(120000));
        assert_eq!(
            out.tenor(Tenor::Months6),
            &TenorQuote {
                tenor: Tenor::Months6,
                available: true,
                total: dec!(145000),
                installment: dec!(25000),
            }
        );
        // 165000 / 12 = 13750 -> 15000
        assert_eq!(out.tenor(Tenor::Months12).total, dec!(165000));
        assert_eq!(out.tenor(Tenor::Months12).installment, dec!(15000));
        // 175000 / 15 = 11666.67 -> 15000
        assert_eq!(out.tenor(Tenor::Months15).total, dec!(175000));
        assert_eq!(out.tenor(Tenor::Months15).installment, dec!(15000));
        // 185000 / 18 = 10277.78 -> 15000
        assert_eq!(out.tenor(Tenor::Months18).total, dec!(185000));
        assert_eq!(out.tenor(Tenor::Months18).installment, dec!(15000));
    }

    #[test]
    fn test_tenors_in_fixed_order() {
        let out = compute_prices(&house_input(dec!(50000)));
        let months: Vec<u32> = out.tenors.iter().map(|q| q.tenor.months()).collect();
        assert_eq!(months, vec![6, 12, 15, 18]);
    }

    #[test]
    fn test_zero_interest_disables_tenor() {
        let mut input = house_input(dec!(100000));
        input.interest_12_percent = Decimal::ZERO;
        let out = compute_prices(&input);

        assert!(!out.available(Tenor::Months12));
        assert_eq!(out.tenor(Tenor::Months12).total, Decimal::ZERO);
        assert_eq!(out.tenor(Tenor::Months12).installment, Decimal::ZERO);
        assert_eq!(out.available_tenors().count(), 3);
    }

    #[test]
    fn test_tiny_interest_still_available() {
        let mut input = house_input(dec!(100000));
        input.interest_6_percent = dec!(0.0001);
        let out = compute_prices(&input);
        assert!(out.available(Tenor::Months6));
        assert_eq!(out.tenor(Tenor::Months6).total, dec!(105000));
    }

    #[test]
    fn test_installment_may_overshoot_total() {
        let out = compute_prices(&house_input(dec!(100000)));
        let q = out.tenor(Tenor::Months18);
        assert!(q.installment * Decimal::from(18u32) > q.total);
    }

    #[test]
    fn test_tenor_from_months() {
        assert_eq!(Tenor::try_from(15u32).unwrap(), Tenor::Months15);
        match Tenor::try_from(24u32) {
            Err(PricingError::InvalidTenor(24)) => {}
            other => panic!("Expected InvalidTenor(24), got {other:?}"),
        }
    }

    #[test]
    fn test_tenor_serializes_as_months() {
        let json = serde_json::to_string(&Tenor::Months12).unwrap();
        assert_eq!(json, "12");
        let back: Tenor = serde_json::from_str("18").unwrap();
        assert_eq!(back, Tenor::Months18);
        assert!(serde_json::from_str::<Tenor>("9").is_err());
    }

    #[test]
    fn test_quote_rejects_negative_cost() {
        let input = house_input(dec!(-1));
        match quote_prices(&input).unwrap_err() {
            PricingError::InvalidInput { field, .. } => assert_eq!(field, "cost"),
            e => panic!("Expected InvalidInput, got {e:?}"),
        }
    }

    #[test]
    fn test_quote_rejects_negative_interest() {
        let mut input = house_input(dec!(100000));
        input.interest_15_percent = dec!(-5);
        match quote_prices(&input).unwrap_err() {
            PricingError::InvalidInput { field, .. } => {
                assert_eq!(field, "interest_15_percent")
            }
            e => panic!("Expected InvalidInput, got {e:?}"),
        }
    }

    #[test]
    fn test_quote_rejects_cost_beyond_decimal_range() {
        let input = house_input(Decimal::MAX / dec!(10));
        match quote_prices(&input).unwrap_err() {
            PricingError::InvalidInput { field, reason } => {
                assert_eq!(field, "margin_percent");
                assert!(reason.contains("representable"));
            }
            e => panic!("Expected InvalidInput, got {e:?}"),
        }
    }

    #[test]
    fn test_quote_accepts_large_realistic_cost() {
        let quoted = quote_prices(&house_input(dec!(1_000_000_000_000))).unwrap();
        assert_eq!(quoted.result.cash_price, dec!(1_180_000_000_000));
    }

    #[test]
    fn test_quote_matches_compute() {
        let input = house_input(dec!(333333));
        let quoted = quote_prices(&input).unwrap();
        assert_eq!(quoted.result, compute_prices(&input));
        assert!(quoted.warnings.is_empty());
    }

    #[test]
    fn test_quote_warns_on_zero_cost_financing() {
        let quoted = quote_prices(&house_input(Decimal::ZERO)).unwrap();
        assert!(quoted.warnings.iter().any(|w| w.contains("Zero cost")));
    }

    #[test]
    fn test_quote_warns_when_no_tenor_available() {
        let input = PricingInput {
            interest_6_percent: Decimal::ZERO,
            interest_12_percent: Decimal::ZERO,
            interest_15_percent: Decimal::ZERO,
            interest_18_percent: Decimal::ZERO,
            ..house_input(dec!(100000))
        };
        let quoted = quote_prices(&input).unwrap();
        assert!(quoted
            .warnings
            .iter()
            .any(|w| w.contains("No financing plan")));
    }

    #[test]
    fn test_quote_warns_when_plan_cheaper_than_cash() {
        let mut input = house_input(dec!(100000));
        input.margin_percent = dec!(60);
        let quoted = quote_prices(&input).unwrap();
        // cash 160000 vs 6-month total 145000
        assert!(quoted
            .warnings
            .iter()
            .any(|w| w.starts_with("6 months plan total")));
    }
}
