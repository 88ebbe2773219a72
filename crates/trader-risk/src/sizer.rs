//! Risk-based position sizing.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use trader_core::{RiskError, SymbolLimits};

/// Converts balance, risk percent and stop distance into a lot size.
///
/// The result is rounded down to the symbol's volume step and clamped
/// into its min/max volume range. Missing or degenerate inputs produce
/// [`RiskError::SizingUnavailable`] instead of a guessed fallback size.
#[derive(Debug, Clone, Copy, Default)]
pub struct PositionSizer;

impl PositionSizer {
    pub fn new() -> Self {
        Self
    }

    /// `stop_distance` is the entry-to-stop distance in price units;
    /// `contract_value` is the account-currency value of a 1.0 price-unit
    /// move per 1.0 lot.
    pub fn size(
        &self,
        balance: Decimal,
        risk_percent: Decimal,
        stop_distance: f64,
        contract_value: f64,
        limits: &SymbolLimits,
    ) -> Result<Decimal, RiskError> {
        if balance <= Decimal::ZERO {
            return Err(RiskError::SizingUnavailable(
                "account balance unavailable".to_string(),
            ));
        }
        if risk_percent <= Decimal::ZERO {
            return Err(RiskError::SizingUnavailable(
                "risk percent is not positive".to_string(),
            ));
        }
        if !stop_distance.is_finite() || stop_distance <= 0.0 {
            return Err(RiskError::SizingUnavailable(
                "stop distance is not positive".to_string(),
            ));
        }
        if !contract_value.is_finite() || contract_value <= 0.0 {
            return Err(RiskError::SizingUnavailable(
                "contract value is not positive".to_string(),
            ));
        }
        if limits.volume_min <= Decimal::ZERO
            || limits.volume_max < limits.volume_min
            || limits.volume_step < Decimal::ZERO
        {
            return Err(RiskError::SizingUnavailable(
                "symbol volume limits unavailable".to_string(),
            ));
        }

        let per_lot_risk = Decimal::try_from(stop_distance * contract_value).map_err(|_| {
            RiskError::SizingUnavailable("stop distance does not convert to a money amount".to_string())
        })?;
        if per_lot_risk <= Decimal::ZERO {
            return Err(RiskError::SizingUnavailable(
                "per-lot risk is not positive".to_string(),
            ));
        }

        let risk_amount = balance * risk_percent / dec!(100);
        let lots = risk_amount / per_lot_risk;

        let step = if limits.volume_step > Decimal::ZERO {
            limits.volume_step
        } else {
            dec!(0.01)
        };
        let stepped = (lots / step).floor() * step;

        Ok(stepped.clamp(limits.volume_min, limits.volume_max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forex_limits() -> SymbolLimits {
        SymbolLimits {
            volume_min: dec!(0.01),
            volume_max: dec!(100),
            volume_step: dec!(0.01),
            point: 0.00001,
        }
    }

    #[test]
    fn test_textbook_sizing() {
        let sizer = PositionSizer::new();

        // $10,000 at 1% risks $100; a 20-pip stop on a major costs
        // $200 per lot, so half a lot.
        let lots = sizer
            .size(dec!(10000), dec!(1.0), 20.0 * 0.0001, 100_000.0, &forex_limits())
            .unwrap();
        assert_eq!(lots, dec!(0.5));
    }

    #[test]
    fn test_rounds_down_to_volume_step() {
        let sizer = PositionSizer::new();

        // $3,140 at 1% / $200 per lot = 0.157 lots.
        let lots = sizer
            .size(dec!(3140), dec!(1.0), 20.0 * 0.0001, 100_000.0, &forex_limits())
            .unwrap();
        assert_eq!(lots, dec!(0.15));
    }

    #[test]
    fn test_tiny_account_clamps_to_volume_min() {
        let sizer = PositionSizer::new();

        let lots = sizer
            .size(dec!(100), dec!(0.5), 20.0 * 0.0001, 100_000.0, &forex_limits())
            .unwrap();
        assert_eq!(lots, dec!(0.01));
    }

    #[test]
    fn test_huge_account_clamps_to_volume_max() {
        let sizer = PositionSizer::new();
        let limits = SymbolLimits {
            volume_max: dec!(1),
            ..forex_limits()
        };

        let lots = sizer
            .size(dec!(10_000_000), dec!(3.0), 20.0 * 0.0001, 100_000.0, &limits)
            .unwrap();
        assert_eq!(lots, dec!(1));
    }

    #[test]
    fn test_result_respects_limits_and_step() {
        let sizer = PositionSizer::new();
        let limits = forex_limits();

        for balance in [dec!(50), dec!(1000), dec!(10000), dec!(250_000)] {
            for risk in [dec!(0.5), dec!(1.0), dec!(2.5)] {
                for stop_pips in [5.0, 20.0, 80.0] {
                    let lots = sizer
                        .size(balance, risk, stop_pips * 0.0001, 100_000.0, &limits)
                        .unwrap();
                    assert!(lots >= limits.volume_min);
                    assert!(lots <= limits.volume_max);
                    assert_eq!(lots % limits.volume_step, Decimal::ZERO);
                }
            }
        }
    }

    #[test]
    fn test_missing_inputs_fail_instead_of_guessing() {
        let sizer = PositionSizer::new();
        let limits = forex_limits();

        assert!(sizer
            .size(Decimal::ZERO, dec!(1.0), 0.002, 100_000.0, &limits)
            .is_err());
        assert!(sizer
            .size(dec!(10000), dec!(1.0), 0.0, 100_000.0, &limits)
            .is_err());
        assert!(sizer
            .size(dec!(10000), dec!(1.0), f64::NAN, 100_000.0, &limits)
            .is_err());
        assert!(sizer
            .size(dec!(10000), dec!(1.0), 0.002, 0.0, &limits)
            .is_err());

        let broken = SymbolLimits {
            volume_min: Decimal::ZERO,
            ..forex_limits()
        };
        let err = sizer
            .size(dec!(10000), dec!(1.0), 0.002, 100_000.0, &broken)
            .unwrap_err();
        assert!(matches!(err, RiskError::SizingUnavailable(_)));
    }
}
