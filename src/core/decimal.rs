//! Exact fixed-point decimals: a big-integer mantissa and a count of
//! fractional digits.
//!
//! `value = mantissa / 10^scale`
//!
//! Addition, subtraction and multiplication are exact (the scale grows as
//! needed), so nothing here ever rounds behind the caller's back.  The only
//! lossy operations are the explicit ones: [`Decimal::truncate`],
//! [`Decimal::round`] and [`Decimal::round_significant`].

use std::{
    cmp::Ordering,
    fmt,
    ops::{Add, Mul, Sub},
    str::FromStr,
};

use num::{BigInt, Integer, Signed, Zero, traits::Pow};

use crate::core::error::DecimalError;

/// Tie-breaking rule used when the discarded tail is exactly one half.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RoundingMode {
    /// 2.5 -> 3, -2.5 -> -3
    #[default]
    HalfAwayFromZero,
    /// 2.5 -> 2, 3.5 -> 4 (banker's rounding)
    HalfEven,
}

impl RoundingMode {
    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            Self::HalfAwayFromZero => "round-half-away-from-zero",
            Self::HalfEven => "round-half-to-even",
        }
    }
}

impl fmt::Display for RoundingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::HalfAwayFromZero => "half-away",
            Self::HalfEven => "half-even",
        })
    }
}

impl FromStr for RoundingMode {
    type Err = DecimalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "half-away" | "half-up" | "away" => Ok(Self::HalfAwayFromZero),
            "half-even" | "even" | "bankers" => Ok(Self::HalfEven),
            other => Err(DecimalError::UnknownRounding(other.to_owned())),
        }
    }
}

/// `10^n` as a big integer.
#[inline]
pub(crate) fn ten_pow(n: u32) -> BigInt {
    Pow::pow(BigInt::from(10u8), n)
}

/// Drop the last `drop` digits of `mantissa`, rounding per `mode`.
fn round_mantissa(mantissa: &BigInt, drop: u32, mode: RoundingMode) -> BigInt {
    if drop == 0 {
        return mantissa.clone();
    }
    let divisor = ten_pow(drop);
    // Truncating division: `rem` carries the sign of `mantissa`.
    let (quot, rem) = mantissa.div_rem(&divisor);
    if rem.is_zero() {
        return quot;
    }

    let twice = rem.abs() * 2u8;
    let bump = match twice.cmp(&divisor) {
        Ordering::Greater => true,
        Ordering::Less => false,
        Ordering::Equal => match mode {
            RoundingMode::HalfAwayFromZero => true,
            RoundingMode::HalfEven => quot.is_odd(),
        },
    };

    match (bump, mantissa.is_negative()) {
        (false, _) => quot,
        (true, false) => quot + 1u8,
        (true, true) => quot - 1u8,
    }
}

#[derive(Clone, Debug)]
pub struct Decimal {
    mantissa: BigInt,
    scale: u32,
}

impl Decimal {
    #[must_use]
    pub fn new(mantissa: BigInt, scale: u32) -> Self {
        Self { mantissa, scale }
    }

    #[must_use]
    pub fn zero() -> Self {
        Self::new(BigInt::zero(), 0)
    }

    #[inline]
    #[must_use]
    pub fn mantissa(&self) -> &BigInt {
        &self.mantissa
    }

    /// Number of digits after the decimal point.
    #[inline]
    #[must_use]
    pub fn scale(&self) -> u32 {
        self.scale
    }

    #[inline]
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.mantissa.is_zero()
    }

    #[inline]
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.mantissa.is_negative()
    }

    #[inline]
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.mantissa.is_positive()
    }

    #[must_use]
    pub fn abs(&self) -> Self {
        Self::new(self.mantissa.abs(), self.scale)
    }

    /// Same value with at least `scale` fractional digits (exact).
    fn widen(&self, scale: u32) -> Self {
        if scale <= self.scale {
            return self.clone();
        }
        Self::new(&self.mantissa * ten_pow(scale - self.scale), scale)
    }

    /// Both mantissas expressed at the larger of the two scales.
    fn aligned(&self, other: &Self) -> (BigInt, BigInt, u32) {
        let scale = self.scale.max(other.scale);
        (
            self.widen(scale).mantissa,
            other.widen(scale).mantissa,
            scale,
        )
    }

    /// Keep exactly `decimals` fractional digits, discarding the rest
    /// (toward zero).  Asking for more digits than are present pads with
    /// zeros.
    #[must_use]
    pub fn truncate(&self, decimals: u32) -> Self {
        if decimals >= self.scale {
            return self.widen(decimals);
        }
        // BigInt division truncates toward zero.
        let mantissa = &self.mantissa / ten_pow(self.scale - decimals);
        Self::new(mantissa, decimals)
    }

    /// Round to exactly `decimals` fractional digits.
    #[must_use]
    pub fn round(&self, decimals: u32, mode: RoundingMode) -> Self {
        if decimals >= self.scale {
            return self.widen(decimals);
        }
        let mantissa = round_mantissa(&self.mantissa, self.scale - decimals, mode);
        Self::new(mantissa, decimals)
    }

    /// Decimal exponent of the leading digit, i.e. `floor(log10(|self|))`.
    /// `None` for zero.
    #[must_use]
    pub fn exponent(&self) -> Option<i64> {
        if self.is_zero() {
            return None;
        }
        let digits = self.mantissa.magnitude().to_string().len();
        Some(digits as i64 - 1 - i64::from(self.scale))
    }

    /// Round to `digits` significant digits.
    #[must_use]
    pub fn round_significant(&self, digits: u32, mode: RoundingMode) -> Self {
        let Some(exp) = self.exponent() else {
            return self.clone();
        };
        let keep = i64::from(digits.max(1)) - 1 - exp;
        if keep >= i64::from(self.scale) {
            return self.clone();
        }
        if let Ok(keep) = u32::try_from(keep) {
            return self.round(keep, mode);
        }
        // Rounding lands left of the decimal point (e.g. 12345 -> 12000).
        let shift = u32::try_from(-keep).unwrap_or(u32::MAX);
        let drop = self.scale.saturating_add(shift);
        let mantissa = round_mantissa(&self.mantissa, drop, mode) * ten_pow(shift);
        Self::new(mantissa, 0)
    }

    /// The digits after the decimal point, most significant first.
    #[must_use]
    pub fn fractional_digits(&self) -> Vec<u8> {
        let scale = self.scale as usize;
        if scale == 0 {
            return Vec::new();
        }
        let text = self.mantissa.magnitude().to_string();
        let mut digits = vec![0u8; scale.saturating_sub(text.len())];
        let tail_start = text.len().saturating_sub(scale);
        digits.extend(text.as_bytes()[tail_start..].iter().map(|b| b - b'0'));
        digits
    }

    /// Scientific notation with at most `digits` significant digits,
    /// trailing zeros removed: `1.0573533118e-18`.
    #[must_use]
    pub fn to_scientific(&self, digits: u32) -> String {
        let rounded = self.round_significant(digits, RoundingMode::HalfAwayFromZero);
        let Some(exp) = rounded.exponent() else {
            return "0".to_owned();
        };

        let text = rounded.mantissa.magnitude().to_string();
        let significant = text.trim_end_matches('0');
        let (lead, rest) = significant.split_at(1);

        let mut out = String::with_capacity(significant.len() + 8);
        if rounded.is_negative() {
            out.push('-');
        }
        out.push_str(lead);
        if !rest.is_empty() {
            out.push('.');
            out.push_str(rest);
        }
        out.push('e');
        out.push_str(&exp.to_string());
        out
    }

    /// `log10(self)` as an `f64`, computed from the decimal exponent so it
    /// stays finite far below `f64::MIN_POSITIVE`.  `None` unless positive.
    #[must_use]
    pub fn log10(&self) -> Option<f64> {
        if !self.is_positive() {
            return None;
        }
        let sci = self.to_scientific(17);
        let (lead, exp) = sci.split_once('e')?;
        let lead = lexical_core::parse::<f64>(lead.as_bytes()).ok()?;
        let exp: i64 = exp.parse().ok()?;
        Some(lead.log10() + exp as f64)
    }
}

impl From<i64> for Decimal {
    fn from(v: i64) -> Self {
        Self::new(BigInt::from(v), 0)
    }
}

impl From<u32> for Decimal {
    fn from(v: u32) -> Self {
        Self::new(BigInt::from(v), 0)
    }
}

// --- Arithmetic (exact) ---

impl Add for &Decimal {
    type Output = Decimal;

    fn add(self, rhs: &Decimal) -> Decimal {
        let (a, b, scale) = self.aligned(rhs);
        Decimal::new(a + b, scale)
    }
}

impl Sub for &Decimal {
    type Output = Decimal;

    fn sub(self, rhs: &Decimal) -> Decimal {
        let (a, b, scale) = self.aligned(rhs);
        Decimal::new(a - b, scale)
    }
}

impl Mul for &Decimal {
    type Output = Decimal;

    fn mul(self, rhs: &Decimal) -> Decimal {
        Decimal::new(&self.mantissa * &rhs.mantissa, self.scale + rhs.scale)
    }
}

// --- Comparison (numeric, scale-insensitive) ---

impl PartialEq for Decimal {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Decimal {}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Decimal {
    fn cmp(&self, other: &Self) -> Ordering {
        let (a, b, _) = self.aligned(other);
        a.cmp(&b)
    }
}

// --- Text ---

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scale = self.scale as usize;
        let mut digits = self.mantissa.magnitude().to_string();
        if scale > 0 && digits.len() <= scale {
            digits.insert_str(0, &"0".repeat(scale + 1 - digits.len()));
        }
        if self.is_negative() {
            f.write_str("-")?;
        }
        if scale == 0 {
            return f.write_str(&digits);
        }
        let (int, frac) = digits.split_at(digits.len() - scale);
        write!(f, "{int}.{frac}")
    }
}

impl FromStr for Decimal {
    type Err = DecimalError;

    /// Plain decimal notation: `10`, `-3.25`, `+0.5`, `.5`, `7.`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let (negative, body) = match text.as_bytes().first() {
            Some(b'-') => (true, &text[1..]),
            Some(b'+') => (false, &text[1..]),
            _ => (false, text),
        };
        let (int, frac) = body.split_once('.').unwrap_or((body, ""));
        if int.is_empty() && frac.is_empty() {
            return Err(DecimalError::Empty);
        }
        if !int.bytes().chain(frac.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(DecimalError::InvalidDigit(s.to_owned()));
        }

        let digits = format!("{int}{frac}");
        let magnitude: BigInt = digits
            .parse()
            .map_err(|_| DecimalError::InvalidDigit(s.to_owned()))?;
        let scale = u32::try_from(frac.len()).map_err(|_| DecimalError::TooLong)?;
        let mantissa = if negative { -magnitude } else { magnitude };
        Ok(Self::new(mantissa, scale))
    }
}
