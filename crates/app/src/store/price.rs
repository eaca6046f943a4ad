//! Prices are kept as minor units of a single currency.

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::iso::Currency;

/// Convert an amount in major units (e.g. `12.5` pesos) to minor units,
/// rounding half-way values away from zero.
///
/// Returns `None` for negative amounts and amounts that overflow `u64`.
pub(crate) fn minor_units(amount: Decimal, currency: &Currency) -> Option<u64> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return None;
    }

    Decimal::from(10_u64.checked_pow(currency.exponent)?)
        .checked_mul(amount)
        .and_then(|value| {
            value
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
                .to_u64()
        })
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::{ARS, JPY};
    use testresult::TestResult;

    use super::*;

    #[test]
    fn scales_by_the_currency_exponent() -> TestResult {
        assert_eq!(minor_units("12.5".parse()?, ARS), Some(1_250));
        assert_eq!(minor_units("700".parse()?, ARS), Some(70_000));
        assert_eq!(minor_units("700".parse()?, JPY), Some(700));

        Ok(())
    }

    #[test]
    fn negative_amounts_have_no_minor_units() -> TestResult {
        assert_eq!(minor_units("-0.4".parse()?, ARS), None);
        assert_eq!(minor_units("-3".parse()?, ARS), None);
        assert_eq!(minor_units(Decimal::ZERO, ARS), Some(0));

        Ok(())
    }
}
