use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::types::Money;

/// Every customer-facing amount is a multiple of this step.
pub const ROUNDING_STEP: Money = dec!(5000);

/// Round `value` up to the next multiple of `step`: `ceil(value / step) * step`.
///
/// Exact multiples (including zero) are returned unchanged. A non-positive
/// step disables rounding.
pub fn round_up_to_step(value: Money, step: Money) -> Money {
    if step <= Decimal::ZERO {
        return value;
    }
    (value / step).ceil() * step
}

/// Round up to the next multiple of [`ROUNDING_STEP`].
pub fn round_up_5000(value: Money) -> Money {
    round_up_to_step(value, ROUNDING_STEP)
}

/// True when `value` is a non-negative whole multiple of [`ROUNDING_STEP`].
pub fn is_rounded(value: Money) -> bool {
    value >= Decimal::ZERO && (value % ROUNDING_STEP).is_zero()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_stays_zero() {
        assert_eq!(round_up_5000(Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_exact_multiple_unchanged() {
        assert_eq!(round_up_5000(dec!(145000)), dec!(145000));
        assert_eq!(round_up_5000(dec!(5000)), dec!(5000));
    }

    #[test]
    fn test_rounds_up_not_to_nearest() {
        assert_eq!(round_up_5000(dec!(118000)), dec!(120000));
        assert_eq!(round_up_5000(dec!(115001)), dec!(120000));
        assert_eq!(round_up_5000(dec!(0.01)), dec!(5000));
    }

    #[test]
    fn test_fractional_values() {
        assert_eq!(round_up_5000(dec!(616666.05)), dec!(620000));
        assert_eq!(round_up_5000(dec!(145000) / dec!(6)), dec!(25000));
    }

    #[test]
    fn test_custom_step() {
        assert_eq!(round_up_to_step(dec!(1234), dec!(100)), dec!(1300));
        assert_eq!(round_up_to_step(dec!(1234), Decimal::ZERO), dec!(1234));
    }

    #[test]
    fn test_is_rounded() {
        assert!(is_rounded(dec!(0)));
        assert!(is_rounded(dec!(620000)));
        assert!(!is_rounded(dec!(620001)));
        assert!(!is_rounded(dec!(-5000)));
    }
}
