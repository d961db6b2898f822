//! Experiment parameters and their validating builder.

use crate::core::{
    constants::{DEFAULT_CHECKPOINTS, DEFAULT_PRECISION, DEFAULT_RADIUS, SAFETY_MARGIN},
    decimal::{Decimal, RoundingMode},
    error::ConfigError,
    pi::PrecisionContext,
};

/// Immutable, validated parameters of one experiment run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub radius: Decimal,
    pub precision: PrecisionContext,
    /// Decimal places to compare at, in report order.
    pub checkpoints: Vec<u32>,
    pub rounding: RoundingMode,
}

impl RunConfig {
    #[inline]
    #[must_use]
    pub fn builder() -> RunConfigBuilder {
        RunConfigBuilder::default()
    }

    /// The standard run: r = 10, 150 digits, checkpoints 20/40/60/100.
    pub fn standard() -> Result<Self, ConfigError> {
        Self::builder().build()
    }

    /// Largest checkpoint the working precision can support.
    #[inline]
    #[must_use]
    pub fn max_checkpoint(&self) -> u32 {
        max_checkpoint_for(self.precision)
    }
}

#[inline]
fn max_checkpoint_for(precision: PrecisionContext) -> u32 {
    precision.significant_digits().saturating_sub(SAFETY_MARGIN)
}

/// Fluent builder; unset fields fall back to the standard run.
#[derive(Debug, Default)]
pub struct RunConfigBuilder {
    radius: Option<Decimal>,
    precision: Option<u32>,
    checkpoints: Option<Vec<u32>>,
    rounding: Option<RoundingMode>,
}

impl RunConfigBuilder {
    #[inline]
    #[must_use]
    pub fn radius(mut self, r: Decimal) -> Self {
        self.radius = Some(r);
        self
    }
    #[inline]
    #[must_use]
    pub fn precision(mut self, significant_digits: u32) -> Self {
        self.precision = Some(significant_digits);
        self
    }
    #[inline]
    #[must_use]
    pub fn checkpoints(mut self, c: impl Into<Vec<u32>>) -> Self {
        self.checkpoints = Some(c.into());
        self
    }
    #[inline]
    #[must_use]
    pub fn rounding(mut self, mode: RoundingMode) -> Self {
        self.rounding = Some(mode);
        self
    }

    /// Every parameter is checked here; a built `RunConfig` is always valid.
    pub fn build(self) -> Result<RunConfig, ConfigError> {
        let precision = PrecisionContext::new(self.precision.unwrap_or(DEFAULT_PRECISION))?;

        let radius = self
            .radius
            .unwrap_or_else(|| Decimal::from(DEFAULT_RADIUS));
        if !radius.is_positive() {
            return Err(ConfigError::InvalidRadius(radius.to_string()));
        }

        let checkpoints = self
            .checkpoints
            .unwrap_or_else(|| DEFAULT_CHECKPOINTS.to_vec());
        if checkpoints.is_empty() {
            return Err(ConfigError::NoCheckpoints);
        }
        let max = max_checkpoint_for(precision);
        if let Some(&bad) = checkpoints.iter().find(|&&d| d == 0 || d > max) {
            return Err(ConfigError::InvalidCheckpoint { decimals: bad, max });
        }

        Ok(RunConfig {
            radius,
            precision,
            checkpoints,
            rounding: self.rounding.unwrap_or_default(),
        })
    }
}

/// Ergonomic `?` on a builder chain.
impl From<RunConfigBuilder> for Result<RunConfig, ConfigError> {
    fn from(b: RunConfigBuilder) -> Self {
        b.build()
    }
}
