//! High-precision π.
//!
//! Machin's formula, summed in scaled-integer arithmetic:
//!
//! ```text
//! π = 16·arctan(1/5) − 4·arctan(1/239)
//! ```
//!
//! Each series term is truncated, so the sum is carried with
//! [`GUARD_DIGITS`] extra digits and rounded once at the end.

use std::time::Instant;

use num::{BigInt, Zero};
use tracing::debug;

use crate::core::{
    constants::{GUARD_DIGITS, MAX_SIGNIFICANT_DIGITS},
    decimal::{Decimal, RoundingMode, ten_pow},
    error::PrecisionError,
};

/// Working precision, passed explicitly to every computation that needs it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PrecisionContext {
    digits: u32,
}

impl PrecisionContext {
    pub fn new(significant_digits: u32) -> Result<Self, PrecisionError> {
        match significant_digits {
            0 => Err(PrecisionError::Zero),
            d if d > MAX_SIGNIFICANT_DIGITS => Err(PrecisionError::Unavailable {
                requested: d,
                max: MAX_SIGNIFICANT_DIGITS,
            }),
            d => Ok(Self { digits: d }),
        }
    }

    #[inline]
    #[must_use]
    pub fn significant_digits(self) -> u32 {
        self.digits
    }

    /// Fractional digits of π at this precision (one digit sits before the
    /// point).
    #[inline]
    #[must_use]
    pub fn decimal_places(self) -> u32 {
        self.digits - 1
    }

    #[must_use]
    pub fn pi(self) -> Decimal {
        let t0 = Instant::now();
        let places = self.decimal_places();
        let wide = places + GUARD_DIGITS;
        let unity = ten_pow(wide);

        let mantissa = (arctan_inv(5, &unity) * 4u8 - arctan_inv(239, &unity)) * 4u8;
        let pi = Decimal::new(mantissa, wide).round(places, RoundingMode::HalfAwayFromZero);

        debug!(
            digits = self.digits,
            elapsed_us = t0.elapsed().as_micros(),
            "computed π"
        );
        pi
    }
}

/// π to `significant_digits` significant digits.
pub fn pi(significant_digits: u32) -> Result<Decimal, PrecisionError> {
    Ok(PrecisionContext::new(significant_digits)?.pi())
}

/// `arctan(1/x) · unity`, truncated term by term.
fn arctan_inv(x: u32, unity: &BigInt) -> BigInt {
    let x_sq = u64::from(x) * u64::from(x);
    let mut power = unity / x; // unity / x^(2k+1)
    let mut sum = power.clone();
    let mut k: u64 = 1;

    loop {
        power /= x_sq;
        if power.is_zero() {
            break;
        }
        let term = &power / (2 * k + 1);
        if k % 2 == 1 {
            sum -= term;
        } else {
            sum += term;
        }
        k += 1;
    }
    sum
}
