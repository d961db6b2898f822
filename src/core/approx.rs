//! Reduced-precision copies of π: cut or rounded at a decimal place.

use std::fmt;

use crate::core::{
    decimal::{Decimal, RoundingMode},
    error::ComputeError,
};

/// How the digits past the cut are disposed of.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    Truncate,
    Round(RoundingMode),
}

impl Strategy {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Truncate => "Truncation",
            Self::Round(_) => "Rounding",
        }
    }

    /// Apply this strategy to `pi` at `decimals` places.
    pub fn apply(self, pi: &Decimal, decimals: u32) -> Result<Decimal, ComputeError> {
        match self {
            Self::Truncate => truncate(pi, decimals),
            Self::Round(mode) => round(pi, decimals, mode),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn ensure_available(pi: &Decimal, decimals: u32) -> Result<(), ComputeError> {
    if decimals > pi.scale() {
        return Err(ComputeError::InsufficientPrecision {
            decimals,
            available: pi.scale(),
        });
    }
    Ok(())
}

/// Keep exactly `decimals` digits after the point; the tail is dropped, never
/// rounded.
pub fn truncate(pi: &Decimal, decimals: u32) -> Result<Decimal, ComputeError> {
    ensure_available(pi, decimals)?;
    Ok(pi.truncate(decimals))
}

/// Round to `decimals` digits after the point.
pub fn round(pi: &Decimal, decimals: u32, mode: RoundingMode) -> Result<Decimal, ComputeError> {
    ensure_available(pi, decimals)?;
    Ok(pi.round(decimals, mode))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{decimal::ten_pow, pi::pi};
    use rstest::{fixture, rstest};

    #[fixture]
    fn true_pi() -> Decimal {
        pi(150).unwrap()
    }

    #[rstest]
    fn one_place_agrees(true_pi: Decimal) {
        let three_one: Decimal = "3.1".parse().unwrap();
        assert_eq!(truncate(&true_pi, 1).unwrap(), three_one);
        assert_eq!(
            round(&true_pi, 1, RoundingMode::HalfAwayFromZero).unwrap(),
            three_one
        );
    }

    #[rstest]
    fn strategies_diverge_on_a_high_tail(true_pi: Decimal) {
        // 3.1415|9265...: the discarded tail starts with a 9.
        assert_eq!(truncate(&true_pi, 4).unwrap().to_string(), "3.1415");
        assert_eq!(
            round(&true_pi, 4, RoundingMode::HalfAwayFromZero)
                .unwrap()
                .to_string(),
            "3.1416"
        );
    }

    #[rstest]
    fn truncation_never_rounds_up(
        true_pi: Decimal,
        #[values(1, 2, 20, 40, 60, 100, 139)] d: u32,
    ) {
        let t = truncate(&true_pi, d).unwrap();
        assert_eq!(t.scale(), d);
        assert_eq!(t.to_string().split_once('.').unwrap().1.len(), d as usize);
        assert!(t <= true_pi);
    }

    #[rstest]
    fn rounding_stays_within_half_a_unit(
        true_pi: Decimal,
        #[values(1, 20, 40, 60, 100)] d: u32,
        #[values(RoundingMode::HalfAwayFromZero, RoundingMode::HalfEven)] mode: RoundingMode,
    ) {
        let t = truncate(&true_pi, d).unwrap();
        let r = round(&true_pi, d, mode).unwrap();
        let unit = Decimal::new(ten_pow(0), d);
        // rounding up moves exactly one unit past the truncation
        assert!((&r - &t).abs() <= unit);
        let off = (&r - &true_pi).abs();
        assert!(&off + &off <= unit);
        assert_eq!(r.scale(), d);
    }

    #[rstest]
    #[case(40)]
    #[case(60)]
    #[case(100)]
    fn rounding_up_lands_one_unit_above_truncation(true_pi: Decimal, #[case] d: u32) {
        // the digit after each of these cuts is at least 5
        let t = truncate(&true_pi, d).unwrap();
        let r = round(&true_pi, d, RoundingMode::HalfAwayFromZero).unwrap();
        assert_eq!(&r - &t, Decimal::new(ten_pow(0), d));
    }

    #[rstest]
    fn idempotent(true_pi: Decimal) {
        let strategy = Strategy::Round(RoundingMode::HalfAwayFromZero);
        let a = strategy.apply(&true_pi, 60).unwrap();
        let b = strategy.apply(&true_pi, 60).unwrap();
        assert_eq!(a.mantissa(), b.mantissa());
        assert_eq!(a.scale(), b.scale());
    }

    #[rstest]
    fn refuses_to_cut_past_available_digits(true_pi: Decimal) {
        let err = truncate(&true_pi, 150).unwrap_err();
        assert!(matches!(
            err,
            ComputeError::InsufficientPrecision {
                decimals: 150,
                available: 149
            }
        ));
        assert!(Strategy::Round(RoundingMode::HalfEven).apply(&true_pi, 149).is_ok());
    }
}
