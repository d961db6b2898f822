//! Truncation vs rounding, checkpoint by checkpoint.
//!
//! For every checkpoint `d` the working π is cut both ways, the sphere area is
//! re-evaluated with each copy, and the absolute deviation from the
//! full-precision area becomes one [`ErrorSample`].

use std::{cmp::Ordering, fmt, time::Instant};

use tracing::{debug, info, info_span};

use crate::core::{
    approx::Strategy,
    area::surface_area,
    config::RunConfig,
    decimal::{Decimal, RoundingMode},
    error::ComputeError,
};

/// Which strategy came closer at one checkpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Verdict {
    TruncationBetter,
    RoundingBetter,
    Tie,
}

impl Verdict {
    /// Exact comparison of the two errors.
    #[must_use]
    pub fn between(truncated: &Decimal, rounded: &Decimal) -> Self {
        match truncated.cmp(rounded) {
            Ordering::Less => Self::TruncationBetter,
            Ordering::Greater => Self::RoundingBetter,
            Ordering::Equal => Self::Tie,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::TruncationBetter => "Truncation",
            Self::RoundingBetter => "Rounding",
            Self::Tie => "Tie",
        })
    }
}

/// Absolute area errors of both strategies at one checkpoint.
#[derive(Clone, Debug)]
pub struct ErrorSample {
    pub decimals: u32,
    pub truncated: Decimal,
    pub rounded: Decimal,
}

impl ErrorSample {
    #[must_use]
    pub fn verdict(&self) -> Verdict {
        Verdict::between(&self.truncated, &self.rounded)
    }

    /// `|errT − errR|`
    #[must_use]
    pub fn difference(&self) -> Decimal {
        (&self.truncated - &self.rounded).abs()
    }

    #[must_use]
    pub fn error(&self, strategy: Strategy) -> &Decimal {
        match strategy {
            Strategy::Truncate => &self.truncated,
            Strategy::Round(_) => &self.rounded,
        }
    }
}

/// Checkpoint → `log10(error)`, one array per strategy, index-aligned with
/// `checkpoints`.  `None` marks an exact zero error.
#[derive(Clone, Debug, PartialEq)]
pub struct ErrorSeries {
    pub checkpoints: Vec<u32>,
    pub truncated: Vec<Option<f64>>,
    pub rounded: Vec<Option<f64>>,
}

/// Everything one run produces.
#[derive(Clone, Debug)]
pub struct Analysis {
    pub radius: Decimal,
    pub significant_digits: u32,
    pub rounding: RoundingMode,
    /// π at working precision.
    pub pi: Decimal,
    pub true_area: Decimal,
    /// One entry per checkpoint, in checkpoint order.
    pub samples: Vec<ErrorSample>,
}

impl Analysis {
    #[must_use]
    pub fn checkpoints(&self) -> Vec<u32> {
        self.samples.iter().map(|s| s.decimals).collect()
    }

    #[must_use]
    pub fn error_series(&self) -> ErrorSeries {
        ErrorSeries {
            checkpoints: self.checkpoints(),
            truncated: self.samples.iter().map(|s| s.truncated.log10()).collect(),
            rounded: self.samples.iter().map(|s| s.rounded.log10()).collect(),
        }
    }

    /// How many checkpoints ended with `verdict`.
    #[must_use]
    pub fn tally(&self, verdict: Verdict) -> usize {
        self.samples.iter().filter(|s| s.verdict() == verdict).count()
    }

    /// Leading decimal digits of the working π (after the point), at most
    /// `count` of them.
    #[must_use]
    pub fn digits(&self, count: usize) -> Vec<u8> {
        let mut digits = self.pi.fractional_digits();
        digits.truncate(count);
        digits
    }
}

/// Errors of both strategies at `decimals` places.
pub fn sample_at(
    pi: &Decimal,
    radius: &Decimal,
    true_area: &Decimal,
    decimals: u32,
    rounding: RoundingMode,
) -> Result<ErrorSample, ComputeError> {
    let error = |strategy: Strategy| -> Result<Decimal, ComputeError> {
        let approx = strategy.apply(pi, decimals)?;
        Ok((true_area - &surface_area(radius, &approx)).abs())
    };

    Ok(ErrorSample {
        decimals,
        truncated: error(Strategy::Truncate)?,
        rounded: error(Strategy::Round(rounding))?,
    })
}

/// Run the whole experiment.  The first failing checkpoint aborts the run.
pub fn analyze(cfg: &RunConfig) -> Result<Analysis, ComputeError> {
    let _span = info_span!("analyze", radius = %cfg.radius).entered();
    info!(
        digits = cfg.precision.significant_digits(),
        checkpoints = ?cfg.checkpoints,
        rounding = %cfg.rounding,
        "starting analysis"
    );

    let pi = cfg.precision.pi();
    let true_area = surface_area(&cfg.radius, &pi);

    let mut samples = Vec::with_capacity(cfg.checkpoints.len());
    for &decimals in &cfg.checkpoints {
        let t0 = Instant::now();
        let sample = sample_at(&pi, &cfg.radius, &true_area, decimals, cfg.rounding).map_err(
            |e| ComputeError::Checkpoint {
                decimals,
                source: Box::new(e),
            },
        )?;
        debug!(
            decimals,
            verdict = %sample.verdict(),
            elapsed_us = t0.elapsed().as_micros(),
            "checkpoint done"
        );
        samples.push(sample);
    }

    Ok(Analysis {
        radius: cfg.radius.clone(),
        significant_digits: cfg.precision.significant_digits(),
        rounding: cfg.rounding,
        pi,
        true_area,
        samples,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::pi::PrecisionContext;
    use rstest::{fixture, rstest};

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[fixture]
    fn standard() -> Analysis {
        analyze(&RunConfig::standard().unwrap()).unwrap()
    }

    #[rstest]
    fn samples_follow_checkpoint_order(standard: Analysis) {
        assert_eq!(standard.checkpoints(), vec![20, 40, 60, 100]);
    }

    #[rstest]
    fn true_area_is_400_pi(standard: Analysis) {
        assert_eq!(standard.true_area.truncate(6), dec("1256.637061"));
        assert_eq!(standard.true_area, &standard.pi * &Decimal::from(400u32));
    }

    #[rstest]
    fn errors_are_non_negative(standard: Analysis) {
        for s in &standard.samples {
            assert!(!s.truncated.is_negative());
            assert!(!s.rounded.is_negative());
        }
    }

    #[rstest]
    #[case(0, 17)]
    #[case(3, 97)]
    fn errors_below_bound(standard: Analysis, #[case] index: usize, #[case] exp: u32) {
        let bound = Decimal::new(1u8.into(), exp);
        let s = &standard.samples[index];
        assert!(s.truncated < bound, "{}", s.truncated.to_scientific(5));
        assert!(s.rounded < bound, "{}", s.rounded.to_scientific(5));
    }

    #[rstest]
    fn errors_shrink_with_more_places(standard: Analysis) {
        let first = &standard.samples[0];
        let last = &standard.samples[3];
        assert!(last.truncated <= first.truncated);
        assert!(last.rounded <= first.rounded);
    }

    #[rstest]
    fn verdicts_for_the_standard_run(standard: Analysis) {
        // Digit after the cut: 20 -> 2, 40 -> 6, 60 -> 5, 100 -> 8.
        let verdicts: Vec<_> = standard.samples.iter().map(ErrorSample::verdict).collect();
        assert_eq!(
            verdicts,
            vec![
                Verdict::Tie,
                Verdict::RoundingBetter,
                Verdict::RoundingBetter,
                Verdict::RoundingBetter,
            ]
        );
        assert_eq!(standard.tally(Verdict::RoundingBetter), 3);
        assert_eq!(standard.tally(Verdict::Tie), 1);
        assert!(standard.samples[0].difference().is_zero());
    }

    #[rstest]
    fn truncation_error_at_twenty_places(standard: Analysis) {
        // 400 · 0.2643383279502884...e-20
        assert_eq!(
            standard.samples[0].truncated.to_scientific(8),
            "1.0573533e-18"
        );
    }

    #[rstest]
    fn series_mirrors_samples(standard: Analysis) {
        let series = standard.error_series();
        assert_eq!(series.checkpoints, vec![20, 40, 60, 100]);
        assert_eq!(series.truncated.len(), 4);
        assert!(series.rounded.iter().all(|e| e.is_some_and(|y| y < -17.0)));
        // 1.0573533e-18
        let first = series.truncated[0].unwrap();
        assert!((first - (-17.975_78)).abs() < 1e-4);
    }

    #[rstest]
    fn digit_sequence(standard: Analysis) {
        assert_eq!(standard.digits(10), vec![1, 4, 1, 5, 9, 2, 6, 5, 3, 5]);
        assert_eq!(standard.digits(1_000).len(), 149);
    }

    #[test]
    fn verdict_is_exact() {
        assert_eq!(Verdict::between(&dec("1.0"), &dec("1")), Verdict::Tie);
        assert_eq!(
            Verdict::between(&dec("0.1"), &dec("0.2")),
            Verdict::TruncationBetter
        );
        assert_eq!(
            Verdict::between(&dec("0.3"), &dec("0.2")),
            Verdict::RoundingBetter
        );
    }

    #[test]
    fn verdicts_on_short_cuts() {
        // 3.141|59...: rounding goes to 3.142, and 0.00041 < 0.00059.
        let pi = PrecisionContext::new(30).unwrap().pi();
        let r = Decimal::from(1u32);
        let area = surface_area(&r, &pi);
        let s = sample_at(&pi, &r, &area, 3, RoundingMode::HalfAwayFromZero).unwrap();
        assert_eq!(s.verdict(), Verdict::RoundingBetter);

        // 3.1|41...: rounding and truncation coincide.
        let s = sample_at(&pi, &r, &area, 1, RoundingMode::HalfAwayFromZero).unwrap();
        assert_eq!(s.verdict(), Verdict::Tie);
    }

    #[test]
    fn failing_checkpoint_is_named() {
        // Bypass the builder to reach the numeric guard.
        let cfg = RunConfig {
            radius: Decimal::from(10u32),
            precision: PrecisionContext::new(30).unwrap(),
            checkpoints: vec![10, 35],
            rounding: RoundingMode::HalfAwayFromZero,
        };
        let err = analyze(&cfg).unwrap_err();
        assert!(matches!(err, ComputeError::Checkpoint { decimals: 35, .. }));
        assert!(err.to_string().contains("checkpoint 35"));
    }
}
